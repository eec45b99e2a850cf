//! Per-type codecs and the tag registry.
//!
//! [`to_serializable`] is the encoding transform: it swaps one extended value
//! for its single-key marker object. [`from_serializable`] is the decoding
//! transform: it walks the registry in [`TAG_ORDER`](crate::tags::TAG_ORDER) and hands the payload of
//! the first marker key it finds to that tag's decoder.
//!
//! Adding a type means adding one codec, one registry row and one arm in
//! [`to_serializable`].

pub mod binary;
pub mod collection;
pub mod number;
pub mod text;

use json_ext_buffers::{from_hex, to_hex};

use crate::error::DecodeError;
use crate::function::Function;
use crate::options::DecodeOptions;
use crate::tags::{
    BIGINT_TAG, BYTES_TAG, DATE_TAG, FUNCTION_TAG, MAP_TAG, NUMBER_TAG, REGEXP_TAG, SET_TAG,
    TYPEDARRAY_TAG, URL_TAG,
};
use crate::value::Value;

pub use binary::{buffer_like_bytes, decode_typed_bytes, BYTES_TYPE_NAME};
pub use collection::{decode_date, decode_map_entries, encode_map_entries};
pub use number::{decode_big_int, decode_non_finite, encode_big_int, encode_non_finite};
pub use text::{decode_pattern, decode_url, encode_pattern};

type DecodeFn = fn(Value, &DecodeOptions) -> Result<Value, DecodeError>;

struct TagCodec {
    tag: &'static str,
    decode: DecodeFn,
}

/// Decoders in checking order; must list the tags exactly as `TAG_ORDER`.
const REGISTRY: [TagCodec; 10] = [
    TagCodec {
        tag: BIGINT_TAG,
        decode: decode_big_int_payload,
    },
    TagCodec {
        tag: NUMBER_TAG,
        decode: decode_number_payload,
    },
    TagCodec {
        tag: TYPEDARRAY_TAG,
        decode: decode_typed_array_payload,
    },
    TagCodec {
        tag: BYTES_TAG,
        decode: decode_bytes_payload,
    },
    TagCodec {
        tag: DATE_TAG,
        decode: decode_date_payload,
    },
    TagCodec {
        tag: MAP_TAG,
        decode: decode_map_payload,
    },
    TagCodec {
        tag: SET_TAG,
        decode: decode_set_payload,
    },
    TagCodec {
        tag: REGEXP_TAG,
        decode: decode_regexp_payload,
    },
    TagCodec {
        tag: URL_TAG,
        decode: decode_url_payload,
    },
    TagCodec {
        tag: FUNCTION_TAG,
        decode: decode_function_payload,
    },
];

/// Wraps `payload` in a single-key marker object.
pub fn marker(tag: &str, payload: Value) -> Value {
    Value::Object(vec![(tag.to_owned(), payload)])
}

fn typed_marker(type_name: &str, bytes: &[u8]) -> Value {
    marker(
        TYPEDARRAY_TAG,
        Value::object([
            ("type", Value::from(type_name)),
            ("bytes", Value::Str(to_hex(bytes))),
        ]),
    )
}

/// Encoding transform for a single node.
///
/// Extended values become marker objects; the legacy `{type: "Buffer", data}`
/// shape becomes a byte marker. Functions become markers only when
/// `unsafe_functions` is set and are otherwise replaced by
/// [`Value::Undefined`]. Everything else is returned unchanged.
pub fn to_serializable(value: Value, unsafe_functions: bool) -> Value {
    match value {
        Value::BigInt(b) => marker(BIGINT_TAG, Value::Str(encode_big_int(&b))),
        Value::Float(f) => match encode_non_finite(f) {
            Some(sentinel) => marker(NUMBER_TAG, Value::from(sentinel)),
            None => Value::Float(f),
        },
        Value::Bytes(bytes) => typed_marker(BYTES_TYPE_NAME, &bytes),
        Value::TypedArray(array) => typed_marker(array.kind().name(), &array.to_le_bytes()),
        Value::Date(ms) => marker(DATE_TAG, Value::Integer(ms)),
        Value::Map(entries) => marker(MAP_TAG, encode_map_entries(entries)),
        Value::Set(items) => marker(SET_TAG, Value::Array(items)),
        Value::RegExp(pattern) => marker(REGEXP_TAG, encode_pattern(&pattern)),
        Value::Url(url) => marker(URL_TAG, Value::Str(url.into())),
        Value::Function(function) if unsafe_functions => {
            marker(FUNCTION_TAG, Value::Str(function.source().to_owned()))
        }
        Value::Function(function) => {
            tracing::debug!(source_len = function.source().len(), "dropping function in safe mode");
            Value::Undefined
        }
        Value::Object(fields) => match buffer_like_bytes(&fields) {
            Some(bytes) => typed_marker(BYTES_TYPE_NAME, &bytes),
            None => Value::Object(fields),
        },
        other => other,
    }
}

/// Decoding transform for an object whose fields are already decoded.
///
/// Function markers are left as they are unless `options.unsafe_functions`
/// is set. An object with no marker key is checked against the legacy
/// buffer shape and otherwise returned unchanged.
pub fn from_serializable(
    mut fields: Vec<(String, Value)>,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    for codec in &REGISTRY {
        let Some(index) = fields.iter().position(|(k, _)| k == codec.tag) else {
            continue;
        };
        if codec.tag == FUNCTION_TAG && !options.unsafe_functions {
            tracing::trace!("leaving function marker opaque in safe mode");
            return Ok(Value::Object(fields));
        }
        let payload = fields.swap_remove(index).1;
        return (codec.decode)(payload, options);
    }
    match buffer_like_bytes(&fields) {
        Some(bytes) => Ok(Value::Bytes(bytes)),
        None => Ok(Value::Object(fields)),
    }
}

fn decode_big_int_payload(payload: Value, _: &DecodeOptions) -> Result<Value, DecodeError> {
    match payload {
        Value::Str(text) => Ok(Value::BigInt(decode_big_int(&text)?)),
        Value::Integer(i) => Ok(Value::BigInt(i.into())),
        _ => Err(DecodeError::payload(BIGINT_TAG, "expected a decimal string")),
    }
}

fn decode_number_payload(payload: Value, _: &DecodeOptions) -> Result<Value, DecodeError> {
    payload
        .as_str()
        .and_then(decode_non_finite)
        .map(Value::Float)
        .ok_or_else(|| DecodeError::payload(NUMBER_TAG, "expected NaN, Infinity or -Infinity"))
}

fn decode_typed_array_payload(payload: Value, _: &DecodeOptions) -> Result<Value, DecodeError> {
    let Some(Value::Str(hex)) = payload.get("bytes") else {
        return Err(DecodeError::payload(TYPEDARRAY_TAG, "expected a hex string in bytes"));
    };
    let bytes = from_hex(hex)?;
    decode_typed_bytes(payload.get("type").and_then(Value::as_str), bytes)
}

fn decode_bytes_payload(payload: Value, _: &DecodeOptions) -> Result<Value, DecodeError> {
    match payload {
        Value::Str(hex) => Ok(Value::Bytes(from_hex(&hex)?)),
        _ => Err(DecodeError::payload(BYTES_TAG, "expected a hex string")),
    }
}

fn decode_date_payload(payload: Value, _: &DecodeOptions) -> Result<Value, DecodeError> {
    decode_date(&payload)
        .map(Value::Date)
        .ok_or_else(|| DecodeError::payload(DATE_TAG, "expected milliseconds since the epoch"))
}

fn decode_map_payload(payload: Value, _: &DecodeOptions) -> Result<Value, DecodeError> {
    let Value::Array(items) = payload else {
        return Err(DecodeError::payload(MAP_TAG, "expected an array of entries"));
    };
    decode_map_entries(items)
        .ok_or_else(|| DecodeError::payload(MAP_TAG, "expected [key, value] entries"))
}

fn decode_set_payload(payload: Value, _: &DecodeOptions) -> Result<Value, DecodeError> {
    match payload {
        Value::Array(items) => Ok(Value::set(items)),
        _ => Err(DecodeError::payload(SET_TAG, "expected an array")),
    }
}

fn decode_regexp_payload(payload: Value, _: &DecodeOptions) -> Result<Value, DecodeError> {
    decode_pattern(&payload)?
        .map(Value::RegExp)
        .ok_or_else(|| DecodeError::payload(REGEXP_TAG, "expected string source and flags"))
}

fn decode_url_payload(payload: Value, _: &DecodeOptions) -> Result<Value, DecodeError> {
    match payload {
        Value::Str(text) => Ok(Value::Url(decode_url(&text)?)),
        _ => Err(DecodeError::payload(URL_TAG, "expected a string")),
    }
}

fn decode_function_payload(payload: Value, options: &DecodeOptions) -> Result<Value, DecodeError> {
    let Value::Str(source) = payload else {
        return Err(DecodeError::payload(FUNCTION_TAG, "expected source text"));
    };
    let function = Function::new(source);
    let body = options
        .loader
        .as_ref()
        .and_then(|loader| loader.load(function.source()));
    tracing::debug!(
        source_len = function.source().len(),
        bound = body.is_some(),
        "reconstructing function in unsafe mode"
    );
    Ok(Value::Function(match body {
        Some(body) => function.bind(body),
        None => function,
    }))
}
