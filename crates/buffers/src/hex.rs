//! `0x`-prefixed lowercase hex codec for byte buffers.

use thiserror::Error;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Malformed hex input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HexError {
    /// The digit count (after stripping `0x`) is odd.
    #[error("Invalid hex string for bytes: odd length {0}")]
    OddLength(usize),
    /// A character that is not a hex digit, at the given offset of the
    /// prefix-stripped input.
    #[error("Invalid hex string for bytes: unexpected {found:?} at {position}")]
    InvalidDigit { position: usize, found: char },
}

/// Encodes bytes as a `0x`-prefixed lowercase hex string.
///
/// # Example
///
/// ```
/// use json_ext_buffers::to_hex;
///
/// assert_eq!(to_hex(&[1, 2, 255]), "0x0102ff");
/// assert_eq!(to_hex(&[]), "0x");
/// ```
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for &byte in bytes {
        out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
    }
    out
}

/// Decodes a hex string, with or without the `0x` prefix.
///
/// Digits are decoded pair by pair, so no platform buffer primitive is needed.
/// Upper-case digits are accepted.
///
/// # Example
///
/// ```
/// use json_ext_buffers::{from_hex, HexError};
///
/// assert_eq!(from_hex("0x0a0b").unwrap(), vec![10, 11]);
/// assert_eq!(from_hex("0102FF").unwrap(), vec![1, 2, 255]);
/// assert_eq!(from_hex("0xabc"), Err(HexError::OddLength(3)));
/// ```
pub fn from_hex(hex: &str) -> Result<Vec<u8>, HexError> {
    let digits = hex.strip_prefix("0x").unwrap_or(hex).as_bytes();
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }
    let mut out = Vec::with_capacity(digits.len() / 2);
    for (i, pair) in digits.chunks_exact(2).enumerate() {
        let hi = nibble(pair[0], i * 2)?;
        let lo = nibble(pair[1], i * 2 + 1)?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

fn nibble(c: u8, position: usize) -> Result<u8, HexError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(HexError::InvalidDigit {
            position,
            found: c as char,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_round_trips_through_bare_prefix() {
        assert_eq!(to_hex(&[]), "0x");
        assert_eq!(from_hex("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(from_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn odd_length_is_rejected() {
        assert_eq!(from_hex("0xabc"), Err(HexError::OddLength(3)));
        assert_eq!(from_hex("f"), Err(HexError::OddLength(1)));
    }

    #[test]
    fn non_hex_digit_is_rejected() {
        assert_eq!(
            from_hex("0x0g"),
            Err(HexError::InvalidDigit {
                position: 1,
                found: 'g'
            })
        );
    }

    #[test]
    fn every_byte_value_survives() {
        let all: Vec<u8> = (0..=255).collect();
        let hex = to_hex(&all);
        assert_eq!(hex.len(), 2 + 512);
        assert!(hex[2..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        assert_eq!(from_hex(&hex).unwrap(), all);
    }
}
