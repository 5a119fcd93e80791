//! Declarative fixed-width encoder for SINLI interchange files
//!
//! # Overview
//!
//! SINLI is the flat-file interchange format of the Spanish book trade: stock
//! reports, sales, orders and returns travel between booksellers and
//! distributors as text files of fixed-width records, one record per
//! CRLF-terminated line, encoded in IBM code page 850. Nothing separates the
//! fields of a record; every field sits at a known column and occupies a
//! known width, and receiving systems read them back by position alone.
//!
//! This crate turns Rust record types into such files. A record type declares
//! the layout of each of its fields once, by attribute, and the encoder
//! derives everything else from that declaration:
//!
//! ```
//! use sinli::{Composite, Fixed};
//!
//! #[derive(Composite, Default)]
//! struct Bar {
//!     #[sinli(position = 1, literal = "B")]
//!     prefix: Fixed,
//!     #[sinli(position = 2, width = 10)]
//!     text: String,
//!     #[sinli(position = 3, width = 5)]
//!     number: i32,
//!     #[sinli(position = 4, width = 1)]
//!     flag: bool,
//! }
//!
//! let bar = Bar { text: "Hello".into(), number: 42, flag: true, ..Default::default() };
//! assert_eq!(sinli::encode(&bar).unwrap(), b"BHello     00042S\r\n");
//! ```
//!
//! Fields are laid out by ascending `position`, whatever their declaration
//! order. A field may hold:
//!
//!   * a scalar (see [`scalar`] for the rendering rules), with a `width`
//!   * a [`Fixed`] placeholder for `literal` text (any scalar field given a
//!     `literal` option is likewise replaced by it)
//!   * another composite, whose lines are inserted in place
//!   * a `Vec` (or slice, or array) of composites, one or more lines each
//!
//! # Layers
//!
//!   * [`schema`] resolves a composite's static layout table into ordered
//!     field descriptors, rejecting inconsistent layouts as [`SchemaError`]s
//!   * [`scalar`] and [`float`] render single values into their columns
//!   * [`walk`] visits composites, nested composites and sequences, and
//!     produces the CRLF-terminated text
//!   * [`codepage`] transcodes the text into single-byte code page 850
//!
//! The whole pipeline is a pure function of its input: there is no state
//! shared between calls, and any number of documents can be encoded
//! concurrently.
//!
//! # Features
//!
//!   * `truncate_overflow`: cut over-long strings down to their width instead
//!     of failing with [`ValueError::TooWide`]
//!   * `serde_impls`: `serde::Serialize` for the [`document`] types
//!
//! [`SchemaError`]: error::SchemaError
//! [`ValueError::TooWide`]: error::ValueError::TooWide

extern crate self as sinli;

pub mod codepage;
pub mod conv;
pub mod document;
pub mod error;
pub mod float;
pub mod prelude;
pub mod scalar;
pub mod schema;
pub mod walk;

use tracing::debug;

pub use crate::codepage::{Ascii, Codepage, Cp850};
pub use crate::conv::{target::Target, Composite, Encode, Fixed, IntoField, Value};
pub use crate::error::{Error, Result};
pub use crate::scalar::{Scalar, ToScalar};
pub use crate::schema::{FieldKind, FieldMeta, Schema};

pub use ::composite_derive::Composite;

/// Renders a composite, or a sequence of composites, as CRLF-terminated text.
///
/// # Errors
///
/// Fails with [`Error::Type`] if `value` is neither a composite nor a
/// sequence of composites, [`Error::Schema`] if the layout of any composite
/// reached is inconsistent, or [`Error::Value`] if a scalar cannot be
/// rendered in its width.
pub fn render<T: IntoField + ?Sized>(value: &T) -> Result<String> {
    let mut text = String::new();
    walk::write_value(&value.to_value(), &mut text).map_err(|err| {
        debug!(error = %err, "rendering failed");
        err
    })?;
    Ok(text)
}

/// Renders a composite, or a sequence of composites, and transcodes the text
/// to code page 850.
///
/// # Errors
///
/// As [`render`], or [`Error::Encoding`] if the text holds a character that
/// code page 850 cannot represent. No bytes are returned on failure.
pub fn encode<T: IntoField + ?Sized>(value: &T) -> Result<Vec<u8>> {
    encode_with(value, &Cp850)
}

/// As [`encode`], transcoding with the given `codepage`.
///
/// # Errors
///
/// As [`encode`].
pub fn encode_with<T, C>(value: &T, codepage: &C) -> Result<Vec<u8>>
where
    T: IntoField + ?Sized,
    C: Codepage + ?Sized,
{
    encode_value(&value.to_value(), codepage)
}

/// Encodes a dynamically obtained [`Value`].
///
/// # Errors
///
/// As [`encode`]; in particular, scalar and unit values fail with
/// [`Error::Type`].
pub fn encode_value<C: Codepage + ?Sized>(value: &Value<'_>, codepage: &C) -> Result<Vec<u8>> {
    let mut text = String::new();
    let bytes = walk::write_value(value, &mut text)
        .and_then(|()| codepage.transcode(&text).map_err(Error::from))
        .map_err(|err| {
            debug!(error = %err, codepage = codepage.name(), "encoding failed");
            err
        })?;
    debug!(
        bytes = bytes.len(),
        lines = text.matches(walk::CRLF).count(),
        codepage = codepage.name(),
        "encoded document"
    );
    Ok(bytes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{EncodingError, TypeError};

    #[derive(Composite, Clone, Debug, Default)]
    struct Bar {
        #[sinli(position = 1, literal = "B")]
        prefix: Fixed,
        #[sinli(position = 2, width = 10)]
        text: String,
        #[sinli(position = 3, width = 5)]
        number: i32,
        #[sinli(position = 4, width = 5)]
        decimal: f32,
        #[sinli(position = 5, width = 1)]
        boolean: bool,
    }

    #[derive(Composite, Default)]
    struct Foo {
        #[sinli(position = 1)]
        header: Bar,
        #[sinli(position = 2)]
        body: Vec<Bar>,
    }

    /// Same line as `Bar` without the decimal column, declared out of order.
    #[derive(Composite, Default)]
    struct Short {
        #[sinli(position = 4, width = 1)]
        boolean: bool,
        #[sinli(position = 3, width = 5)]
        number: i64,
        #[sinli(position = 1, literal = "B")]
        prefix: Fixed,
        #[sinli(position = 2, width = 10)]
        text: String,
    }

    fn bar(text: &str, number: i32, decimal: f32, boolean: bool) -> Bar {
        Bar {
            text: text.into(),
            number,
            decimal,
            boolean,
            ..Default::default()
        }
    }

    fn short(number: i64) -> Short {
        Short {
            boolean: true,
            number,
            text: "Hello".into(),
            ..Default::default()
        }
    }

    #[test]
    fn single_line() {
        assert_eq!(encode(&short(42)).unwrap(), b"BHello     00042S\r\n");
        assert_eq!(
            encode(&bar("Hello", 42, 12.34, true)).unwrap(),
            b"BHello     0004201234S\r\n"
        );
    }

    #[test]
    fn negative_numbers() {
        assert_eq!(encode(&short(-42)).unwrap(), b"BHello     -0042S\r\n");
        assert_eq!(
            encode(&Box::new(bar("Hello", -42, -12.34, true))).unwrap(),
            b"BHello     -0042-1234S\r\n"
        );
    }

    #[test]
    fn full_width_negatives_gain_sign_column() {
        #[derive(Composite)]
        struct Amounts {
            #[sinli(position = 1, width = 5)]
            number: i32,
            #[sinli(position = 2, width = 5)]
            amount: f64,
        }

        let line = Amounts {
            number: -12345,
            amount: -123.45,
        };
        assert_eq!(render(&line).unwrap(), "-12345-12345\r\n");

        let line = Amounts {
            number: 12345,
            amount: 123.45,
        };
        assert_eq!(render(&line).unwrap(), "1234512345\r\n");
    }

    #[test]
    fn literal_spellings() {
        #[derive(Composite)]
        struct Spelled {
            #[sinli(position = 1, literal = "Librer\u{ed}a ")]
            escaped: Fixed,
            #[sinli(position = 2, literal = r"C:\SINLI, ")]
            raw: Fixed,
            #[sinli(position = 3, literal = r#"say "hi""#)]
            quoted: Fixed,
        }

        let line = Spelled {
            escaped: Fixed,
            raw: Fixed,
            quoted: Fixed,
        };
        assert_eq!(render(&line).unwrap(), "Librería C:\\SINLI, say \"hi\"\r\n");
    }

    #[test]
    fn sequences() {
        let lines = vec![bar("Hello", 42, 12.34, true), bar("World", -43, -12.35, false)];
        let want = b"BHello     0004201234S\r\nBWorld     -0043-1235N\r\n".to_vec();
        assert_eq!(encode(&lines).unwrap(), want);
        assert_eq!(encode(lines.as_slice()).unwrap(), want);
        let array: [Bar; 2] = [lines[0].clone(), lines[1].clone()];
        assert_eq!(encode(&array).unwrap(), want);
    }

    #[test]
    fn nested() {
        let foo = Foo {
            header: bar("Header", 1, 0.01, true),
            body: vec![bar("Hello", 42, 12.34, true), bar("World", -43, -12.35, false)],
        };
        assert_eq!(
            render(&foo).unwrap(),
            "BHeader    0000100001S\r\nBHello     0004201234S\r\nBWorld     -0043-1235N\r\n"
        );
    }

    #[test]
    fn deterministic() {
        let foo = Foo {
            header: bar("Header", 1, 0.01, true),
            body: vec![bar("Hello", 42, 12.34, true)],
        };
        assert_eq!(encode(&foo).unwrap(), encode(&foo).unwrap());
    }

    #[test]
    fn unrepresentable_character() {
        assert_eq!(
            encode(&bar("5 €", 1, 0.0, false)),
            Err(Error::Encoding(EncodingError {
                codepage: "CP850",
                ch: '€',
                offset: 3
            }))
        );
        assert_eq!(
            encode(&bar("Ñu", 1, 0.0, false)).unwrap()[1..3],
            [0xA5, b'u']
        );
    }

    #[test]
    fn alternate_codepage() {
        assert!(matches!(
            encode_with(&bar("Ñu", 1, 0.0, false), &Ascii),
            Err(Error::Encoding(EncodingError { ch: 'Ñ', .. }))
        ));
        let boxed: Box<dyn Codepage> = Box::new(Cp850);
        assert!(encode_with(&short(1), boxed.as_ref()).is_ok());
    }

    #[test]
    fn scalars_are_not_documents() {
        assert_eq!(
            encode("Hello"),
            Err(Error::Type(TypeError { found: "string" }))
        );
        assert_eq!(
            encode(&Some(3u8)),
            Err(Error::Type(TypeError { found: "integer" }))
        );
    }

    #[test]
    fn encode_trait() {
        let line = short(42);
        assert_eq!(line.to_text().unwrap(), "BHello     00042S\r\n");
        assert_eq!(line.to_sinli().unwrap(), encode(&line).unwrap());
        assert_eq!(line.encoded_len().unwrap(), 19);

        let mut buf = b"xx".to_vec();
        assert_eq!(line.write_to(&mut buf, &Cp850).unwrap(), 19);
        assert_eq!(&buf[..3], b"xxB");
    }

    #[test]
    fn concurrent_calls_agree() {
        let foo = std::sync::Arc::new(vec![short(1), short(-2), short(3)]);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let foo = std::sync::Arc::clone(&foo);
                std::thread::spawn(move || encode(&*foo))
            })
            .collect();
        let want = encode(&*foo).unwrap();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), want);
        }
    }
}
