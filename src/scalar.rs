//! Scalar values and their column rendering
//!
//! [`Scalar`] is the closed set of value kinds a fixed-width column can
//! hold. Types that appear as scalar fields of a composite convert into it
//! through [`ToScalar`]; implementations are provided for `bool`, the
//! primitive integers, `f32`/`f64`, strings, [`chrono::NaiveDate`], and
//! `Option<T>` of any of these (with `None` rendered as a blank column).
//!
//! Code-list types (enumerations of protocol tokens) implement [`ToScalar`]
//! themselves, typically as a [`Scalar::Str`] or [`Scalar::Int`], and then
//! become usable as fields through [`impl_scalar_field!`](crate::impl_scalar_field).
//!
//! # Rendering
//!
//! | kind    | rule                                                       |
//! |---------|------------------------------------------------------------|
//! | `Bool`  | `S` or `N`, a single column whatever the width             |
//! | `Int`   | right-justified, zero-padded, sign in the first column; a  |
//! |         | negative value filling the width gains a column for it     |
//! | `Float` | as `Int`, over the value in hundredths (see [`crate::float`]) |
//! | `Str`   | left-justified, space-padded                               |
//! | `Date`  | `YYYYMMDD`, eight columns whatever the width               |
//! | `Null`  | `width` spaces                                             |
//!
//! Integers and strings that do not fit their width are rejected with
//! [`ValueError::TooWide`]. When the `truncate_overflow` feature is enabled,
//! strings are cut down to their width instead.

use std::borrow::Cow;

use chrono::NaiveDate;

use crate::error::ValueError;

/// Token written for `true`
pub const YES: &str = "S";
/// Token written for `false`
pub const NO: &str = "N";

/// Format of [`Scalar::Date`] columns
pub const DATE_FORMAT: &str = "%Y%m%d";

/// A single value, ready to be rendered into a column
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(Cow<'a, str>),
    Date(NaiveDate),
    Null,
}

impl Scalar<'_> {
    /// Short name of the variant, for diagnostics
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "boolean",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
            Scalar::Date(_) => "date",
            Scalar::Null => "null",
        }
    }

    /// Appends the rendering of this value in a column of `width` characters.
    ///
    /// Nothing is appended if an error is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] if the value does not fit in `width`, or
    /// is a non-finite float.
    pub fn write_to(&self, width: usize, out: &mut String) -> Result<(), ValueError> {
        match self {
            Scalar::Bool(b) => out.push_str(if *b { YES } else { NO }),
            Scalar::Int(n) => {
                let text = format!("{:0width$}", n, width = width);
                check_fits(text.len(), width + usize::from(*n < 0))?;
                out.push_str(&text);
            }
            Scalar::Float(x) => out.push_str(&crate::float::fixed_point(*x, width)?),
            Scalar::Str(s) => write_padded(s, width, out)?,
            Scalar::Date(d) => out.push_str(&d.format(DATE_FORMAT).to_string()),
            Scalar::Null => out.extend(std::iter::repeat(' ').take(width)),
        }
        Ok(())
    }

    /// Renders this value in a column of `width` characters.
    ///
    /// ```
    /// # use sinli::Scalar;
    /// assert_eq!(Scalar::Int(42).render(5).unwrap(), "00042");
    /// assert_eq!(Scalar::Int(-42).render(5).unwrap(), "-0042");
    /// assert_eq!(Scalar::Str("Hello".into()).render(7).unwrap(), "Hello  ");
    /// ```
    ///
    /// # Errors
    ///
    /// As [`Scalar::write_to`].
    pub fn render(&self, width: usize) -> Result<String, ValueError> {
        let mut out = String::with_capacity(width);
        self.write_to(width, &mut out)?;
        Ok(out)
    }
}

fn check_fits(actual: usize, limit: usize) -> Result<(), ValueError> {
    if actual > limit {
        Err(ValueError::TooWide { limit, actual })
    } else {
        Ok(())
    }
}

fn write_padded(s: &str, width: usize, out: &mut String) -> Result<(), ValueError> {
    let len = s.chars().count();
    cfg_if::cfg_if! {
        if #[cfg(feature = "truncate_overflow")] {
            if len > width {
                out.extend(s.chars().take(width));
                return Ok(());
            }
        } else {
            check_fits(len, width)?;
        }
    }
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(width - len));
    Ok(())
}

/// Conversion of a field's value into a [`Scalar`]
pub trait ToScalar {
    fn to_scalar(&self) -> Scalar<'_>;
}

impl ToScalar for bool {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Bool(*self)
    }
}

macro_rules! int_scalar {
    ($($t:ty),+) => {
        $(impl ToScalar for $t {
            fn to_scalar(&self) -> Scalar<'_> {
                Scalar::Int(i128::from(*self))
            }
        })+
    };
}

int_scalar!(i8, i16, i32, i64, u8, u16, u32, u64);

impl ToScalar for isize {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Int(*self as i128)
    }
}

impl ToScalar for usize {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Int(*self as i128)
    }
}

impl ToScalar for f32 {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Float(f64::from(*self))
    }
}

impl ToScalar for f64 {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Float(*self)
    }
}

impl ToScalar for str {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Str(Cow::Borrowed(self))
    }
}

impl ToScalar for String {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Str(Cow::Borrowed(self.as_str()))
    }
}

impl ToScalar for Cow<'_, str> {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Str(Cow::Borrowed(self.as_ref()))
    }
}

impl ToScalar for NaiveDate {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Date(*self)
    }
}

impl<T: ToScalar> ToScalar for Option<T> {
    fn to_scalar(&self) -> Scalar<'_> {
        match self {
            Some(val) => val.to_scalar(),
            None => Scalar::Null,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn booleans() {
        assert_eq!(true.to_scalar().render(1).unwrap(), "S");
        assert_eq!(false.to_scalar().render(1).unwrap(), "N");
        assert_eq!(true.to_scalar().render(4).unwrap(), "S");
    }

    #[test]
    fn integers() {
        assert_eq!(42i32.to_scalar().render(5).unwrap(), "00042");
        assert_eq!((-42i64).to_scalar().render(5).unwrap(), "-0042");
        assert_eq!(777u32.to_scalar().render(10).unwrap(), "0000000777");
        assert_eq!(0usize.to_scalar().render(3).unwrap(), "000");
        assert_eq!(
            123456i32.to_scalar().render(5),
            Err(ValueError::TooWide {
                limit: 5,
                actual: 6
            })
        );
        assert_eq!((-12345i32).to_scalar().render(5).unwrap(), "-12345");
        assert_eq!(
            (-123456i32).to_scalar().render(5),
            Err(ValueError::TooWide {
                limit: 6,
                actual: 7
            })
        );
    }

    #[test]
    fn strings() {
        assert_eq!("Hello".to_scalar().render(10).unwrap(), "Hello     ");
        assert_eq!(String::from("1234").to_scalar().render(4).unwrap(), "1234");
        assert_eq!("".to_scalar().render(3).unwrap(), "   ");
        assert_eq!("Ñandú".to_scalar().render(6).unwrap(), "Ñandú ");
    }

    #[cfg(not(feature = "truncate_overflow"))]
    #[test]
    fn long_strings_rejected() {
        assert_eq!(
            "ESFANDE".to_scalar().render(5),
            Err(ValueError::TooWide {
                limit: 5,
                actual: 7
            })
        );
    }

    #[cfg(feature = "truncate_overflow")]
    #[test]
    fn long_strings_truncated() {
        assert_eq!("ESFANDE".to_scalar().render(5).unwrap(), "ESFAN");
        assert_eq!("Ñandúes".to_scalar().render(5).unwrap(), "Ñandú");
    }

    #[test]
    fn dates() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(date.to_scalar().render(8).unwrap(), "20210101");
        assert_eq!(Some(date).to_scalar().render(3).unwrap(), "20210101");
        assert_eq!(None::<NaiveDate>.to_scalar().render(8).unwrap(), "        ");
    }

    #[test]
    fn nulls_fill_width() {
        assert_eq!(None::<String>.to_scalar().render(4).unwrap(), "    ");
        assert_eq!(None::<i32>.to_scalar().render(2).unwrap(), "  ");
        assert_eq!(Some(7u8).to_scalar().render(2).unwrap(), "07");
    }

    #[test]
    fn failed_write_leaves_output_untouched() {
        let mut out = String::from("D");
        assert!(Scalar::Int(1_000).write_to(2, &mut out).is_err());
        assert!(Scalar::Float(f64::NAN).write_to(5, &mut out).is_err());
        assert_eq!(out, "D");
    }
}
