//! Length-prefixed single-byte text fields.
//!
//! Strings in the cartridge are stored as a big-endian u16 length (which
//! counts the two length bytes themselves) followed by raw characters in a
//! single-byte code page. Decoding is lossy on purpose: names embed control
//! and formatting bytes that are stripped by the `clean_*` helpers.

use encoding_rs::WINDOWS_1252;
use tracing::debug;

use crate::error::Result;
use crate::rom::RomReader;

/// Size of the length field in front of every string.
pub const LENGTH_PREFIX_SIZE: usize = 2;

/// A decoded string and the number of bytes it occupied in the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedString {
    pub text: String,
    pub bytes_consumed: usize,
}

/// Reads a length-prefixed string starting at `offset`.
///
/// A declared length of 2 or less yields an empty string that consumes only
/// the length field.
pub fn read_length_prefixed(reader: &RomReader<'_>, offset: usize) -> Result<DecodedString> {
    let length = reader.read_u16_be_at(offset)? as usize;
    if length <= LENGTH_PREFIX_SIZE {
        return Ok(DecodedString {
            text: String::new(),
            bytes_consumed: LENGTH_PREFIX_SIZE,
        });
    }

    let bytes = reader.read_bytes_at(offset + LENGTH_PREFIX_SIZE, length - LENGTH_PREFIX_SIZE)?;
    Ok(DecodedString {
        text: decode_latin1(bytes),
        bytes_consumed: length,
    })
}

/// Decodes single-byte text. Every byte maps to exactly one character.
pub fn decode_latin1(bytes: &[u8]) -> String {
    let (decoded, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    if had_errors {
        debug!(
            "Single-byte decoding had errors for bytes: {:?}",
            &bytes[..bytes.len().min(20)]
        );
    }
    decoded.into_owned()
}

/// Keeps ASCII letters and spaces, then trims. Used for player names, cities and team names.
pub fn clean_name(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Keeps ASCII letters only. Used for team abbreviations.
pub fn clean_abbreviation(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// Removes NUL padding and surrounding whitespace from the header name.
pub fn clean_cartridge_name(text: &str) -> String {
    text.replace('\0', "").trim().to_string()
}
