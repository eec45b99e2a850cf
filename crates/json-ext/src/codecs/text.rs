//! Patterns and resource locators.

use url::Url;

use crate::error::ParseError;
use crate::pattern::Pattern;
use crate::value::Value;

/// `{"source": .., "flags": ..}`.
pub fn encode_pattern(pattern: &Pattern) -> Value {
    Value::object([
        ("source", Value::from(pattern.source())),
        ("flags", Value::from(pattern.flags())),
    ])
}

/// Reads `{source, flags}`. `Ok(None)` means the payload shape is wrong;
/// `Err` means the flags are invalid.
pub fn decode_pattern(payload: &Value) -> Result<Option<Pattern>, ParseError> {
    let (Some(Value::Str(source)), Some(Value::Str(flags))) =
        (payload.get("source"), payload.get("flags"))
    else {
        return Ok(None);
    };
    Pattern::new(source.clone(), flags).map(Some)
}

pub fn decode_url(text: &str) -> Result<Url, ParseError> {
    Url::parse(text).map_err(|err| ParseError::Url {
        input: text.to_owned(),
        reason: err.to_string(),
    })
}
