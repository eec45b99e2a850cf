//! Byte buffers, element-typed buffers and the legacy `{type, data}` shape.

use crate::error::DecodeError;
use crate::typed_array::{TypedArray, TypedArrayKind};
use crate::value::Value;

/// Element-type name of a plain byte buffer.
pub const BYTES_TYPE_NAME: &str = "Uint8Array";

/// Rebuilds a buffer from its element-type name and raw bytes.
///
/// An unrecognized or missing name is not an error: the raw bytes come back
/// as [`Value::Bytes`].
pub fn decode_typed_bytes(type_name: Option<&str>, bytes: Vec<u8>) -> Result<Value, DecodeError> {
    let Some(kind) = type_name.and_then(TypedArrayKind::from_name) else {
        tracing::debug!(
            type_name = type_name.unwrap_or("<missing>"),
            len = bytes.len(),
            "unknown typed array kind, keeping raw bytes"
        );
        return Ok(Value::Bytes(bytes));
    };
    match TypedArray::from_le_bytes(kind, &bytes)? {
        Some(array) => Ok(Value::TypedArray(array)),
        None => Ok(Value::Bytes(bytes)),
    }
}

/// Recognizes `{"type": "Buffer", "data": [..]}`.
///
/// Matches only when the object has exactly those two keys and every element
/// of `data` is an integer in `0..=255`.
pub fn buffer_like_bytes(fields: &[(String, Value)]) -> Option<Vec<u8>> {
    if fields.len() != 2 {
        return None;
    }
    let field = |name: &str| fields.iter().find(|(k, _)| k == name).map(|(_, v)| v);
    if field("type")?.as_str()? != "Buffer" {
        return None;
    }
    let Value::Array(data) = field("data")? else {
        return None;
    };
    data.iter().map(byte_of).collect()
}

fn byte_of(value: &Value) -> Option<u8> {
    match value {
        Value::Integer(i) => u8::try_from(*i).ok(),
        Value::Float(f) if f.fract() == 0.0 && (0.0..=255.0).contains(f) => Some(*f as u8),
        _ => None,
    }
}
