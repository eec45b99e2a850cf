//! Big integers and non-finite numbers.

use num_bigint::BigInt;

use crate::error::ParseError;

/// Decimal digits with an optional leading `-`.
pub fn encode_big_int(value: &BigInt) -> String {
    value.to_string()
}

/// Parses a decimal integer literal: an optional `-` followed by at least one
/// ASCII digit, nothing else.
///
/// # Example
///
/// ```
/// use json_ext::codecs::decode_big_int;
///
/// assert_eq!(decode_big_int("-42").unwrap().to_string(), "-42");
/// assert!(decode_big_int("not-a-bigint").is_err());
/// assert!(decode_big_int("1.5").is_err());
/// ```
pub fn decode_big_int(text: &str) -> Result<BigInt, ParseError> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::BigInt(text.to_owned()));
    }
    BigInt::parse_bytes(text.as_bytes(), 10).ok_or_else(|| ParseError::BigInt(text.to_owned()))
}

/// The sentinel string for NaN and the infinities, `None` for finite numbers.
pub fn encode_non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

/// Accepts exactly `"NaN"`, `"Infinity"` and `"-Infinity"`.
pub fn decode_non_finite(text: &str) -> Option<f64> {
    match text {
        "NaN" => Some(f64::NAN),
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}
