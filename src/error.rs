//! Error types
//!
//! Every failure the encoder can report is deterministic given its input:
//! the same value will fail the same way on every attempt. None of the types
//! in this module are therefore meant to be retried on, only reported.
//!
//! [`Error`] is the umbrella type returned by the public entry points, and
//! wraps one of the more specific kinds below via `From` conversions.

use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

use crate::schema::FieldKind;

/// Error type for malformed or inconsistent layout metadata on a composite.
///
/// These always indicate a bug in the definition of a composite type (or in a
/// hand-written [`Composite`](crate::Composite) implementation), rather than
/// in the values it holds.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SchemaError {
    /// No `position` option was declared for the field
    MissingPosition { field: &'static str },
    /// `position` was not a positive integer
    InvalidPosition { field: &'static str, value: String },
    /// Two fields of the same composite declared the same position
    DuplicatePosition {
        position: u32,
        first: &'static str,
        second: &'static str,
    },
    /// A scalar field declared no `width`
    MissingWidth { field: &'static str },
    /// `width` was not a positive integer
    InvalidWidth { field: &'static str, value: String },
    /// An option key other than `position`, `width` or `literal`
    UnknownKey { field: &'static str, key: String },
    /// An option without a `key = value` shape
    MalformedOption { field: &'static str, option: String },
    /// A literal-kind field declared no `literal` text
    MissingLiteral { field: &'static str },
    /// A nested or sequence field declared `literal` text
    LiteralOnContainer { field: &'static str },
    /// The composite's value accessor returned nothing for a declared field
    MissingValue { field: &'static str },
    /// The composite's value accessor returned a value of another kind than declared
    KindMismatch {
        field: &'static str,
        expected: FieldKind,
        found: &'static str,
    },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::MissingPosition { field } => {
                write!(f, "field `{field}` has no position")
            }
            SchemaError::InvalidPosition { field, value } => {
                write!(f, "field `{field}` has invalid position `{value}`")
            }
            SchemaError::DuplicatePosition {
                position,
                first,
                second,
            } => {
                write!(
                    f,
                    "fields `{first}` and `{second}` share position {position}"
                )
            }
            SchemaError::MissingWidth { field } => {
                write!(f, "scalar field `{field}` has no width")
            }
            SchemaError::InvalidWidth { field, value } => {
                write!(f, "field `{field}` has invalid width `{value}`")
            }
            SchemaError::UnknownKey { field, key } => {
                write!(f, "field `{field}` has unrecognized option key `{key}`")
            }
            SchemaError::MalformedOption { field, option } => {
                write!(f, "field `{field}` has malformed option `{option}`")
            }
            SchemaError::MissingLiteral { field } => {
                write!(f, "literal field `{field}` has no literal text")
            }
            SchemaError::LiteralOnContainer { field } => {
                write!(f, "container field `{field}` cannot carry literal text")
            }
            SchemaError::MissingValue { field } => {
                write!(f, "composite yielded no value for field `{field}`")
            }
            SchemaError::KindMismatch {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field `{field}` is declared {expected} but yielded a {found} value"
                )
            }
        }
    }
}

impl StdError for SchemaError {}

/// Error returned when the top-level value handed to the encoder is neither a
/// composite nor a sequence of composites.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TypeError {
    /// Short description of the kind of value that was found instead
    pub found: &'static str,
}

impl Display for TypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "expected a composite or a sequence of composites, found {}",
            self.found
        )
    }
}

impl StdError for TypeError {}

/// Error type for scalar values that cannot be rendered into their column.
#[derive(Clone, PartialEq, Debug)]
pub enum ValueError {
    /// Rendered text is wider than the declared width of the column
    TooWide { limit: usize, actual: usize },
    /// Floating-point value is NaN or infinite
    NotFinite(f64),
}

impl Display for ValueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueError::TooWide { limit, actual } => {
                write!(f, "{actual}-character value exceeded width of {limit}")
            }
            ValueError::NotFinite(val) => {
                write!(f, "non-finite value {val} has no fixed-point form")
            }
        }
    }
}

impl StdError for ValueError {}

/// Error returned by a [`Codepage`](crate::codepage::Codepage) when the text
/// holds a character it cannot represent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EncodingError {
    /// Name of the target codepage
    pub codepage: &'static str,
    /// The offending character
    pub ch: char,
    /// Offset of the offending character, counted in characters
    pub offset: usize,
}

impl Display for EncodingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "character {:?} (U+{:04X}) at offset {} has no {} representation",
            self.ch, self.ch as u32, self.offset, self.codepage
        )
    }
}

impl StdError for EncodingError {}

/// Umbrella error type for the encoder entry points.
#[derive(Clone, PartialEq, Debug)]
#[non_exhaustive]
pub enum Error {
    Schema(SchemaError),
    Type(TypeError),
    Value {
        field: &'static str,
        source: ValueError,
    },
    Encoding(EncodingError),
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Self::Type(err)
    }
}

impl From<EncodingError> for Error {
    fn from(err: EncodingError) -> Self {
        Self::Encoding(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Schema(err) => write!(f, "invalid layout: {}", err),
            Error::Type(err) => write!(f, "invalid input: {}", err),
            Error::Value { field, source } => {
                write!(f, "cannot render field `{}`: {}", field, source)
            }
            Error::Encoding(err) => write!(f, "cannot transcode output: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Schema(err) => Some(err),
            Error::Type(err) => Some(err),
            Error::Value { source, .. } => Some(source),
            Error::Encoding(err) => Some(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
