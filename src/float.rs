//! Fixed-point rendering of floating-point amounts
//!
//! Monetary amounts travel as signed integers with two implied decimals: the
//! value is scaled by 100, rounded to the nearest integer (ties away from
//! zero, as [`f64::round`]), and zero-padded like any other integer, with no
//! decimal separator in the output.
//!
//! ```
//! # use sinli::float::fixed_point;
//! assert_eq!(fixed_point(12.34, 5).unwrap(), "01234");
//! assert_eq!(fixed_point(-12.34, 5).unwrap(), "-1234");
//! assert_eq!(fixed_point(-123.45, 5).unwrap(), "-12345");
//! assert_eq!(fixed_point(1.01, 10).unwrap(), "0000000101");
//! ```

use crate::error::ValueError;

/// Number of implied decimal places
pub const SCALE: u32 = 2;

/// Converts `val` into its count of hundredths, rounding to the nearest.
///
/// # Errors
///
/// Returns [`ValueError::NotFinite`] for NaN and infinities.
pub fn hundredths(val: f64) -> Result<i128, ValueError> {
    if !val.is_finite() {
        return Err(ValueError::NotFinite(val));
    }
    Ok((val * 10f64.powi(SCALE as i32)).round() as i128)
}

/// Renders `val` as a zero-padded fixed-point number of `width` columns.
///
/// Padding counts the sign, but a negative amount whose digits fill the
/// whole width takes one extra column for it.
///
/// # Errors
///
/// Returns [`ValueError::TooWide`] if the digits need more than `width`
/// columns, or [`ValueError::NotFinite`] as [`hundredths`].
pub fn fixed_point(val: f64, width: usize) -> Result<String, ValueError> {
    let count = hundredths(val)?;
    let text = format!("{:0width$}", count, width = width);
    let limit = width + usize::from(count < 0);
    match text.len() {
        n if n > limit => Err(ValueError::TooWide { limit, actual: n }),
        _ => Ok(text),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rounds_to_hundredths() {
        assert_eq!(hundredths(0.125), Ok(13));
        assert_eq!(hundredths(-0.125), Ok(-13));
        assert_eq!(hundredths(2.0), Ok(200));
        assert_eq!(hundredths(-0.001), Ok(0));
    }

    #[test]
    fn single_precision_inputs() {
        assert_eq!(fixed_point(f64::from(12.34f32), 5).unwrap(), "01234");
        assert_eq!(fixed_point(f64::from(-12.35f32), 5).unwrap(), "-1235");
        assert_eq!(fixed_point(f64::from(0.99f32), 10).unwrap(), "0000000099");
        assert_eq!(fixed_point(f64::from(0.01f32), 5).unwrap(), "00001");
    }

    #[test]
    fn sign_takes_a_column() {
        assert_eq!(fixed_point(-0.01, 5).unwrap(), "-0001");
        assert_eq!(fixed_point(0.0, 5).unwrap(), "00000");
        assert_eq!(fixed_point(-123.45, 5).unwrap(), "-12345");
    }

    #[test]
    fn overflow_rejected() {
        assert_eq!(
            fixed_point(1234.56, 5),
            Err(ValueError::TooWide {
                limit: 5,
                actual: 6
            })
        );
        assert_eq!(
            fixed_point(-1234.56, 5),
            Err(ValueError::TooWide {
                limit: 6,
                actual: 7
            })
        );
    }

    #[test]
    fn non_finite_rejected() {
        assert!(matches!(fixed_point(f64::NAN, 5), Err(ValueError::NotFinite(_))));
        assert_eq!(
            fixed_point(f64::INFINITY, 5),
            Err(ValueError::NotFinite(f64::INFINITY))
        );
    }
}
