//! Field descriptor resolution
//!
//! Every [`Composite`](crate::Composite) exposes a static table of
//! [`FieldMeta`] entries, one per field in declaration order. Each entry
//! carries the field's name, the [`FieldKind`] of the Rust type that holds it,
//! and a raw option string such as `position = 3, width = 10` (exactly as it
//! was written in a `#[sinli(...)]` attribute, when the table was derived).
//!
//! [`Schema::resolve`] parses such a table into [`Descriptor`]s ordered by
//! ascending position, checking along the way that the layout is coherent:
//!
//!   * every field has a unique, positive `position`
//!   * every scalar field has a positive `width`
//!   * literal-kind fields carry `literal` text, containers never do
//!   * no option key other than `position`, `width` and `literal` appears
//!
//! A scalar-kind field that carries a `literal` option becomes a literal
//! field, and its value is never read.
//!
//! Option values may be bare (`literal = FANDE`) or double-quoted
//! (`literal = "FANDE"`); commas and `=` inside quotes are part of the value.

use std::fmt::{Display, Formatter};

use crate::error::SchemaError;

/// Kind of a field, as determined by the Rust type that holds it
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum FieldKind {
    /// A single value rendered into a fixed-width column
    Scalar,
    /// A placeholder for fixed text; the text itself comes from the options
    Literal,
    /// A nested composite whose lines are spliced in place
    Nested,
    /// A repeated group of composites, one or more lines each
    Sequence,
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FieldKind::Scalar => "scalar",
            FieldKind::Literal => "literal",
            FieldKind::Nested => "nested",
            FieldKind::Sequence => "sequence",
        })
    }
}

/// Static layout metadata of one field of a composite
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldMeta {
    pub name: &'static str,
    pub tag: &'static str,
    pub kind: FieldKind,
}

impl FieldMeta {
    #[must_use]
    pub const fn new(name: &'static str, tag: &'static str, kind: FieldKind) -> Self {
        Self { name, tag, kind }
    }
}

/// Resolved shape of a field
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Shape {
    Scalar { width: usize },
    Literal { text: String },
    Nested,
    Sequence,
}

/// A fully parsed field layout
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Descriptor {
    /// Index of the field in declaration order, as understood by
    /// [`Composite::value`](crate::Composite::value)
    pub index: usize,
    pub name: &'static str,
    pub position: u32,
    pub shape: Shape,
}

/// Field descriptors of one composite, sorted by ascending position
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Schema {
    descriptors: Vec<Descriptor>,
}

impl Schema {
    /// Parses a field table into descriptors ordered by position.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found, in declaration order.
    pub fn resolve(fields: &[FieldMeta]) -> Result<Self, SchemaError> {
        let mut descriptors = fields
            .iter()
            .enumerate()
            .map(|(index, meta)| Descriptor::parse(index, meta))
            .collect::<Result<Vec<_>, _>>()?;

        descriptors.sort_by_key(|d| d.position);
        if let Some(pair) = descriptors.windows(2).find(|w| w[0].position == w[1].position) {
            let (first, second) = if pair[0].index < pair[1].index {
                (pair[0].name, pair[1].name)
            } else {
                (pair[1].name, pair[0].name)
            };
            return Err(SchemaError::DuplicatePosition {
                position: pair[0].position,
                first,
                second,
            });
        }

        Ok(Self { descriptors })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Descriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Returns the number of columns of the line described by this schema,
    /// or `None` if it contains nested composites or sequences.
    ///
    /// Signed numerics and dates can render wider or narrower than their
    /// declared width, so this is the nominal width only.
    pub fn line_width(&self) -> Option<usize> {
        self.iter().try_fold(0, |acc, d| match &d.shape {
            Shape::Scalar { width } => Some(acc + width),
            Shape::Literal { text } => Some(acc + text.chars().count()),
            Shape::Nested | Shape::Sequence => None,
        })
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Descriptor;
    type IntoIter = std::slice::Iter<'a, Descriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Descriptor {
    fn parse(index: usize, meta: &FieldMeta) -> Result<Self, SchemaError> {
        let field = meta.name;
        let mut position: Option<u32> = None;
        let mut width: Option<usize> = None;
        let mut literal: Option<String> = None;

        for option in split_options(meta.tag) {
            let (key, value) = option
                .split_once('=')
                .map(|(k, v)| (k.trim(), unquote(v.trim())))
                .ok_or_else(|| SchemaError::MalformedOption {
                    field,
                    option: option.to_owned(),
                })?;
            match key {
                "position" => {
                    position = Some(positive(&value).ok_or(SchemaError::InvalidPosition {
                        field,
                        value: value.clone(),
                    })?);
                }
                "width" => {
                    width = Some(positive(&value).ok_or(SchemaError::InvalidWidth {
                        field,
                        value: value.clone(),
                    })? as usize);
                }
                "literal" => literal = Some(value),
                _ => {
                    return Err(SchemaError::UnknownKey {
                        field,
                        key: key.to_owned(),
                    })
                }
            }
        }

        let position = position.ok_or(SchemaError::MissingPosition { field })?;
        let shape = match (meta.kind, literal) {
            (FieldKind::Scalar | FieldKind::Literal, Some(text)) => Shape::Literal { text },
            (FieldKind::Literal, None) => return Err(SchemaError::MissingLiteral { field }),
            (FieldKind::Scalar, None) => Shape::Scalar {
                width: width.ok_or(SchemaError::MissingWidth { field })?,
            },
            (FieldKind::Nested | FieldKind::Sequence, Some(_)) => {
                return Err(SchemaError::LiteralOnContainer { field })
            }
            (FieldKind::Nested, None) => Shape::Nested,
            (FieldKind::Sequence, None) => Shape::Sequence,
        };

        Ok(Self {
            index,
            name: field,
            position,
            shape,
        })
    }
}

fn positive(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Splits an option string on commas that are not enclosed in double quotes,
/// dropping blank segments (such as the one after a trailing comma).
fn split_options(tag: &str) -> impl Iterator<Item = &str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (i, ch) in tag.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ',' if !quoted => {
                parts.push(&tag[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tag[start..]);
    parts.into_iter().map(str::trim).filter(|s| !s.is_empty())
}

/// Strips one pair of enclosing double quotes, resolving backslash escapes
/// (`\n`, `\r`, `\t`, `\0` and `\u{..}`; any other escaped character stands
/// for itself).
fn unquote(value: &str) -> String {
    match value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => {
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(ch) = chars.next() {
                if ch != '\\' {
                    out.push(ch);
                    continue;
                }
                match chars.next() {
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some('0') => out.push('\0'),
                    Some('u') => match unicode_escape(chars.as_str()) {
                        Some((ch, rest)) => {
                            out.push(ch);
                            chars = rest.chars();
                        }
                        None => out.push('u'),
                    },
                    Some(other) => out.push(other),
                    None => out.push('\\'),
                }
            }
            out
        }
        None => value.to_owned(),
    }
}

/// Decodes the `{XXXX}` tail of a `\u{XXXX}` escape at the start of `text`,
/// returning the character and the text after it.
fn unicode_escape(text: &str) -> Option<(char, &str)> {
    let (hex, rest) = text.strip_prefix('{')?.split_once('}')?;
    let ch = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)?;
    Some((ch, rest))
}
