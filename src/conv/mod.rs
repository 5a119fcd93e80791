//! Core of the fixed-width encoding API
//!
//! This module contains the traits that connect user-defined record types to
//! the encoder:
//!
//!   * [`Composite`], implemented by every record type (one output line, or a
//!     group of lines), which exposes a static field table and an indexed
//!     value accessor. It is normally derived with `#[derive(Composite)]`.
//!   * [`IntoField`], implemented by every type that can appear as a field of
//!     a composite, which fixes the [`FieldKind`] of the field at the type
//!     level and lends out its current [`Value`].
//!   * [`Encode`], an extension trait over every [`IntoField`] type, with the
//!     user-facing conversion methods.
//!
//! An additional submodule, [`target`], offers an abstraction along the lines
//! of [`std::io::Write`], namely the [`target::Target`] trait, which is the
//! generic bound for the destination of [`Encode::write_to`].

use std::borrow::Cow;

use chrono::NaiveDate;

use crate::codepage::{Codepage, Cp850};
use crate::error::Result;
use crate::scalar::{Scalar, ToScalar};
use crate::schema::{FieldKind, FieldMeta};

use self::target::{ByteCounter, Target};

pub mod target;

/// A record type whose fields carry fixed-width layout metadata
///
/// `fields` returns the static layout table, one [`FieldMeta`] per field in
/// declaration order, and `value` lends out the value of the field at a given
/// index of that table. The two must agree: `value(i)` returns `Some` for
/// every index of the table, with a [`Value`] of the declared kind.
///
/// # Example
///
/// A hand-written implementation, equivalent to what `#[derive(Composite)]`
/// would generate for the same fields (the derive also provides the
/// [`IntoField`] implementation that lets the record nest in others):
///
/// ```
/// use sinli::{Composite, FieldKind, FieldMeta, IntoField, Value};
///
/// struct Detail {
///     isbn: String,
///     quantity: u32,
/// }
///
/// impl Composite for Detail {
///     fn fields(&self) -> &'static [FieldMeta] {
///         const FIELDS: &[FieldMeta] = &[
///             FieldMeta::new("prefix", "position = 1, literal = D", FieldKind::Literal),
///             FieldMeta::new("isbn", "position = 2, width = 17", FieldKind::Scalar),
///             FieldMeta::new("quantity", "position = 3, width = 6", FieldKind::Scalar),
///         ];
///         FIELDS
///     }
///
///     fn value(&self, index: usize) -> Option<Value<'_>> {
///         match index {
///             0 => Some(Value::Unit),
///             1 => Some(self.isbn.to_value()),
///             2 => Some(self.quantity.to_value()),
///             _ => None,
///         }
///     }
/// }
///
/// impl IntoField for Detail {
///     const KIND: FieldKind = FieldKind::Nested;
///
///     fn to_value(&self) -> Value<'_> {
///         Value::Nested(self)
///     }
/// }
///
/// let detail = Detail { isbn: "9781234567890".into(), quantity: 1 };
/// assert_eq!(sinli::render(&detail).unwrap(), "D9781234567890    000001\r\n");
/// ```
pub trait Composite {
    /// Static layout table of the fields of this type
    fn fields(&self) -> &'static [FieldMeta];

    /// Returns the value of the field at `index` in [`fields`](Composite::fields)
    fn value(&self, index: usize) -> Option<Value<'_>>;
}

/// Borrowed view of the value held by one field
#[derive(Clone)]
pub enum Value<'a> {
    /// No payload; the value of a literal field
    Unit,
    Scalar(Scalar<'a>),
    Nested(&'a dyn Composite),
    Sequence(Vec<&'a dyn Composite>),
}

impl Value<'_> {
    /// Short name of the variant, for diagnostics
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Scalar(s) => s.kind_name(),
            Value::Nested(_) => "composite",
            Value::Sequence(_) => "sequence",
        }
    }
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Unit => f.write_str("Unit"),
            Value::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            Value::Nested(_) => f.write_str("Nested(..)"),
            Value::Sequence(items) => write!(f, "Sequence([..; {}])", items.len()),
        }
    }
}

/// Trait for types that can be held by a field of a [`Composite`]
///
/// The associated constant `KIND` is what the layout table records for a
/// field of this type, so that the way a field is encoded is settled when
/// the record type is defined, not by inspecting its value.
pub trait IntoField {
    const KIND: FieldKind;

    fn to_value(&self) -> Value<'_>;
}

/// Zero-sized placeholder for a literal field
///
/// The text of the field comes from its `literal` option; this type only
/// reserves the slot in the record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Fixed;

impl IntoField for Fixed {
    const KIND: FieldKind = FieldKind::Literal;

    fn to_value(&self) -> Value<'_> {
        Value::Unit
    }
}

/// Implements [`IntoField`] as a scalar field for types that implement
/// [`ToScalar`](crate::ToScalar).
///
/// ```
/// use sinli::{impl_scalar_field, Scalar, ToScalar};
///
/// pub enum Binding { Hardcover, Paperback }
///
/// impl ToScalar for Binding {
///     fn to_scalar(&self) -> Scalar<'_> {
///         Scalar::Str(match self {
///             Binding::Hardcover => "H".into(),
///             Binding::Paperback => "P".into(),
///         })
///     }
/// }
///
/// impl_scalar_field!(Binding);
/// ```
#[macro_export]
macro_rules! impl_scalar_field {
    ($($t:ty),+ $(,)?) => {
        $(impl $crate::IntoField for $t {
            const KIND: $crate::FieldKind = $crate::FieldKind::Scalar;

            fn to_value(&self) -> $crate::Value<'_> {
                $crate::Value::Scalar($crate::ToScalar::to_scalar(self))
            }
        })+
    };
}

impl_scalar_field!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, str, String, NaiveDate
);

impl IntoField for Cow<'_, str> {
    const KIND: FieldKind = FieldKind::Scalar;

    fn to_value(&self) -> Value<'_> {
        Value::Scalar(self.to_scalar())
    }
}

impl<T: ToScalar> IntoField for Option<T> {
    const KIND: FieldKind = FieldKind::Scalar;

    fn to_value(&self) -> Value<'_> {
        Value::Scalar(self.to_scalar())
    }
}

impl<T: Composite> IntoField for [T] {
    const KIND: FieldKind = FieldKind::Sequence;

    fn to_value(&self) -> Value<'_> {
        Value::Sequence(self.iter().map(|item| item as &dyn Composite).collect())
    }
}

impl<T: Composite> IntoField for Vec<T> {
    const KIND: FieldKind = FieldKind::Sequence;

    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: Composite, const N: usize> IntoField for [T; N] {
    const KIND: FieldKind = FieldKind::Sequence;

    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: IntoField + ?Sized> IntoField for &T {
    const KIND: FieldKind = T::KIND;

    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: IntoField + ?Sized> IntoField for Box<T> {
    const KIND: FieldKind = T::KIND;

    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

/// Conversion methods for every value the encoder accepts
///
/// Blanket-implemented over [`IntoField`]; only composites and sequences of
/// composites encode successfully, anything else fails with a
/// [`TypeError`](crate::error::TypeError).
pub trait Encode: IntoField {
    /// Renders the value and transcodes it to code page 850.
    ///
    /// # Errors
    ///
    /// See [`crate::encode`].
    fn to_sinli(&self) -> Result<Vec<u8>> {
        crate::encode(self)
    }

    /// Renders the value as text, one CRLF-terminated line per record.
    ///
    /// # Errors
    ///
    /// See [`crate::render`].
    fn to_text(&self) -> Result<String> {
        crate::render(self)
    }

    /// Renders and transcodes the value with `codepage`, appending the bytes
    /// to `buf` and returning their count.
    ///
    /// Nothing is appended to `buf` if an error is returned.
    ///
    /// # Errors
    ///
    /// See [`crate::encode_with`].
    fn write_to<U: Target, C: Codepage + ?Sized>(&self, buf: &mut U, codepage: &C) -> Result<usize> {
        let bytes = crate::encode_with(self, codepage)?;
        buf.anticipate(bytes.len());
        Ok(buf.push_all(&bytes))
    }

    /// Computes the number of bytes of the CP850 encoding of the value.
    ///
    /// # Errors
    ///
    /// See [`crate::encode`].
    fn encoded_len(&self) -> Result<usize> {
        self.write_to(&mut ByteCounter::create(), &Cp850)
    }
}

impl<T: IntoField + ?Sized> Encode for T {}
