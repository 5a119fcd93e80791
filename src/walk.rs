//! Composite walker
//!
//! Renders composites into CRLF-terminated lines of text. Each composite's
//! layout table is resolved into a [`Schema`], and its fields are visited in
//! ascending position: scalar and literal fields extend the current line,
//! while nested composites and sequences contribute whole lines of their own.
//!
//! A line is closed with exactly one `\r\n`: before the lines of a nested
//! composite or sequence are spliced in, and after the last field, unless
//! the text already ends with one. A composite that writes no text at all
//! (for instance, one holding only an empty sequence) adds no line.

use tracing::trace;

use crate::conv::{Composite, Value};
use crate::error::{Error, Result, SchemaError, TypeError};
use crate::schema::{FieldKind, Schema, Shape};

/// Line terminator of every record
pub const CRLF: &str = "\r\n";

/// Appends the lines of a top-level value to `out`.
///
/// # Errors
///
/// Returns [`TypeError`] unless `value` is a composite or a sequence of
/// composites, or any error raised while walking them.
pub(crate) fn write_value(value: &Value<'_>, out: &mut String) -> Result<()> {
    match value {
        Value::Nested(composite) => write_composite(*composite, out),
        Value::Sequence(items) => items.iter().try_for_each(|item| write_composite(*item, out)),
        other => Err(TypeError {
            found: other.kind_name(),
        }
        .into()),
    }
}

/// Appends the lines of a single composite to `out`.
pub(crate) fn write_composite(composite: &dyn Composite, out: &mut String) -> Result<()> {
    let schema = Schema::resolve(composite.fields())?;
    trace!(fields = schema.len(), "walking composite");

    let start = out.len();
    for desc in &schema {
        let field = desc.name;
        match &desc.shape {
            Shape::Literal { text } => out.push_str(text),
            Shape::Scalar { width } => match fetch(composite, desc.index, field)? {
                Value::Scalar(scalar) => scalar
                    .write_to(*width, out)
                    .map_err(|source| Error::Value { field, source })?,
                other => return Err(mismatch(field, FieldKind::Scalar, &other)),
            },
            Shape::Nested => match fetch(composite, desc.index, field)? {
                Value::Nested(inner) => {
                    close_line(out, start);
                    write_composite(inner, out)?;
                }
                other => return Err(mismatch(field, FieldKind::Nested, &other)),
            },
            Shape::Sequence => match fetch(composite, desc.index, field)? {
                Value::Sequence(items) => {
                    close_line(out, start);
                    for item in items {
                        write_composite(item, out)?;
                    }
                }
                other => return Err(mismatch(field, FieldKind::Sequence, &other)),
            },
        }
    }
    close_line(out, start);
    Ok(())
}

fn fetch<'a>(composite: &'a dyn Composite, index: usize, field: &'static str) -> Result<Value<'a>> {
    composite
        .value(index)
        .ok_or_else(|| SchemaError::MissingValue { field }.into())
}

fn mismatch(field: &'static str, expected: FieldKind, found: &Value<'_>) -> Error {
    SchemaError::KindMismatch {
        field,
        expected,
        found: found.kind_name(),
    }
    .into()
}

/// Terminates the text written since `start`, if there is any and it is not
/// terminated already.
fn close_line(out: &mut String, start: usize) {
    if out.len() > start && !out.ends_with(CRLF) {
        out.push_str(CRLF);
    }
}
