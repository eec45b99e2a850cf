//! JSON that round-trips the values plain JSON loses.
//!
//! Big integers, byte and typed buffers, NaN and the infinities, dates,
//! maps, sets, regular expressions, URLs and (opt-in) functions are written
//! as single-key marker objects such as `{"__@json.bigint__": "123"}` and
//! turned back into [`Value`]s on decode. Everything else is ordinary JSON.
//!
//! ```
//! use json_ext::{decode, encode, BigInt, Indent, Replacer, Value};
//!
//! let value = Value::object([("n", Value::BigInt(BigInt::from(7)))]);
//! let text = encode(&value, &Replacer::None, &Indent::None).unwrap();
//! assert_eq!(text, r#"{"n":{"__@json.bigint__":"7"}}"#);
//! assert_eq!(decode(&text, None).unwrap(), value);
//! ```

mod decoder;
mod encoder;
mod error;
mod function;
mod options;
mod pattern;
mod typed_array;
mod value;

pub mod codecs;
pub mod tags;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{DecodeError, EncodeError, ParseError};
pub use function::{Function, FunctionLoader, FunctionRegistry, NativeFn};
pub use json_ext_buffers::HexError;
pub use num_bigint::BigInt;
pub use options::{DecodeOptions, EncodeOptions, Hook, Indent, Replacer, MAX_SAFE_INTEGER};
pub use pattern::Pattern;
pub use typed_array::{TypedArray, TypedArrayKind};
pub use url::Url;
pub use value::{Kind, Value};

/// Encodes a value tree. Functions are dropped.
pub fn encode(value: &Value, replacer: &Replacer<'_>, indent: &Indent) -> Result<String, EncodeError> {
    Encoder::new().encode(value, replacer, indent)
}

/// Like [`encode`], but functions are written as source-text markers.
pub fn encode_unsafe(
    value: &Value,
    replacer: &Replacer<'_>,
    indent: &Indent,
) -> Result<String, EncodeError> {
    Encoder::unsafe_mode().encode(value, replacer, indent)
}

/// Decodes tagged JSON text. Function markers stay plain objects.
pub fn decode(text: &str, reviver: Option<Hook<'_>>) -> Result<Value, DecodeError> {
    Decoder::new().decode(text, reviver)
}

/// Like [`decode`], but function markers become [`Function`] values.
///
/// No body is bound; use a [`Decoder`] with a [`FunctionLoader`] for that.
pub fn decode_unsafe(text: &str, reviver: Option<Hook<'_>>) -> Result<Value, DecodeError> {
    Decoder::unsafe_mode().decode(text, reviver)
}
