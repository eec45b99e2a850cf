//! Half-precision (16-bit) floating point utilities.

/// Largest magnitude that still rounds to a finite half-precision value.
const F16_OVERFLOW: f64 = 65520.0;
/// Smallest positive normal half-precision value, 2^-14.
const F16_MIN_NORMAL: f64 = 6.103515625e-5;
/// 2^24: one unit in the last place of a subnormal half is 2^-24.
const F16_SUBNORMAL_SCALE: f64 = 16_777_216.0;

/// Decodes a half-precision (16-bit) floating point value.
///
/// The input is the raw binary representation (u16) of an IEEE 754 half-precision float.
///
/// # Example
///
/// ```
/// use json_ext_buffers::decode_f16;
///
/// assert_eq!(decode_f16(0x0000), 0.0);
/// assert_eq!(decode_f16(0x3C00), 1.0);
/// assert!(decode_f16(0x7C00).is_infinite() && decode_f16(0x7C00).is_sign_positive());
/// assert!(decode_f16(0x7C01).is_nan());
/// ```
pub fn decode_f16(binary: u16) -> f64 {
    let exponent = ((binary & 0x7C00) >> 10) as i32;
    let fraction = (binary & 0x03FF) as f64;
    let sign = if (binary >> 15) & 1 == 1 { -1.0 } else { 1.0 };

    if exponent == 0 {
        // Subnormal or zero
        sign * F16_MIN_NORMAL * (fraction / 1024.0)
    } else if exponent == 0x1F {
        if fraction != 0.0 {
            f64::NAN
        } else {
            sign * f64::INFINITY
        }
    } else {
        sign * 2f64.powi(exponent - 15) * (1.0 + fraction / 1024.0)
    }
}

/// Encodes an `f64` as half-precision bits, rounding to nearest, ties to even.
///
/// Magnitudes of 65520 and above become infinity; NaN becomes the canonical
/// quiet NaN `0x7E00`.
///
/// # Example
///
/// ```
/// use json_ext_buffers::{decode_f16, encode_f16};
///
/// assert_eq!(encode_f16(1.0), 0x3C00);
/// assert_eq!(encode_f16(-2.25), 0xC080);
/// assert_eq!(decode_f16(encode_f16(3.125)), 3.125);
/// ```
pub fn encode_f16(value: f64) -> u16 {
    if value.is_nan() {
        return 0x7E00;
    }
    let sign: u16 = if value.is_sign_negative() { 0x8000 } else { 0 };
    let abs = value.abs();
    if abs >= F16_OVERFLOW {
        return sign | 0x7C00;
    }
    if abs < F16_MIN_NORMAL {
        // A result of 1024 is exactly the bit pattern of the smallest normal.
        let mantissa = (abs * F16_SUBNORMAL_SCALE).round_ties_even() as u16;
        return sign | mantissa;
    }
    let exponent = ((abs.to_bits() >> 52) & 0x7FF) as i32 - 1023;
    let scaled = abs / 2f64.powi(exponent);
    // A mantissa of 1024 carries into the exponent field.
    let mantissa = ((scaled - 1.0) * 1024.0).round_ties_even() as u16;
    sign | ((((exponent + 15) as u16) << 10) + mantissa)
}
