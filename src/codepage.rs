//! Transcoding into legacy single-byte code pages
//!
//! Receiving systems read SINLI files as IBM code page 850 (OEM Multilingual
//! Latin I). The [`Codepage`] trait abstracts over the target encoding so that
//! another single-byte table can be swapped in without touching the encoder;
//! [`Cp850`] is the default, and [`Ascii`] is a strict 7-bit alternative.
//!
//! Transcoding is all-or-nothing: a character with no representation in the
//! target table fails the whole conversion, and never gets substituted.

use std::collections::HashMap;

use crate::error::EncodingError;

/// A single-byte character encoding
pub trait Codepage {
    /// Name of the encoding, used in error reports
    fn name(&self) -> &'static str;

    /// Returns the byte representing `ch`, if there is one.
    fn encode_char(&self, ch: char) -> Option<u8>;

    /// Converts `text` into bytes, one per character.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodingError`] for the first character that
    /// [`encode_char`](Codepage::encode_char) cannot represent.
    fn transcode(&self, text: &str) -> Result<Vec<u8>, EncodingError> {
        let mut out = Vec::with_capacity(text.len());
        for (offset, ch) in text.chars().enumerate() {
            match self.encode_char(ch) {
                Some(b) => out.push(b),
                None => {
                    return Err(EncodingError {
                        codepage: self.name(),
                        ch,
                        offset,
                    })
                }
            }
        }
        Ok(out)
    }
}

/// Characters of code page 850 from `0x80` to `0xFF`, in byte order.
/// The lower half coincides with ASCII.
pub const CP850_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', // 0x80
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', 'ø', '£', 'Ø', '×', 'ƒ', // 0x90
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '®', '¬', '½', '¼', '¡', '«', '»', // 0xA0
    '░', '▒', '▓', '│', '┤', 'Á', 'Â', 'À', '©', '╣', '║', '╗', '╝', '¢', '¥', '┐', // 0xB0
    '└', '┴', '┬', '├', '─', '┼', 'ã', 'Ã', '╚', '╔', '╩', '╦', '╠', '═', '╬', '¤', // 0xC0
    'ð', 'Ð', 'Ê', 'Ë', 'È', 'ı', 'Í', 'Î', 'Ï', '┘', '┌', '█', '▄', '¦', 'Ì', '▀', // 0xD0
    'Ó', 'ß', 'Ô', 'Ò', 'õ', 'Õ', 'µ', 'þ', 'Þ', 'Ú', 'Û', 'Ù', 'ý', 'Ý', '¯', '´', // 0xE0
    '\u{AD}', '±', '‗', '¾', '¶', '§', '÷', '¸', '°', '¨', '·', '¹', '³', '²', '■', '\u{A0}', // 0xF0
];

lazy_static::lazy_static! {
    static ref CP850_ENCODE: HashMap<char, u8> = CP850_HIGH
        .iter()
        .zip(0x80..=0xFFu8)
        .map(|(&ch, b)| (ch, b))
        .collect();
}

/// IBM code page 850 (OEM Multilingual Latin I)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cp850;

impl Codepage for Cp850 {
    fn name(&self) -> &'static str {
        "CP850"
    }

    fn encode_char(&self, ch: char) -> Option<u8> {
        if ch.is_ascii() {
            Some(ch as u8)
        } else {
            CP850_ENCODE.get(&ch).copied()
        }
    }
}

/// Strict 7-bit ASCII
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ascii;

impl Codepage for Ascii {
    fn name(&self) -> &'static str {
        "ASCII"
    }

    fn encode_char(&self, ch: char) -> Option<u8> {
        ch.is_ascii().then_some(ch as u8)
    }
}
