//! json-ext-buffers - byte-level helpers for json-ext
//!
//! Hex text codec for byte buffers and IEEE 754 half-precision conversion for
//! 16-bit float element buffers.

mod f16;
mod hex;

pub use f16::{decode_f16, encode_f16};
pub use hex::{from_hex, to_hex, HexError};
