//! Tagging encoder.
//!
//! Walks a [`Value`] tree root first. At every node it applies the caller's
//! replacer hook, then [`to_serializable`], then descends into whatever came
//! out, so marker payloads are walked like any other subtree. The result is a
//! plain `serde_json::Value`, which `serde_json` turns into text.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value as JsonValue;

use crate::codecs::to_serializable;
use crate::error::EncodeError;
use crate::options::{EncodeOptions, Indent, Replacer, MAX_SAFE_INTEGER};
use crate::tags::{has_structured_payload, is_tag};
use crate::value::Value;

/// Encoder: turns [`Value`] trees into tagged JSON.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    pub options: EncodeOptions,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder that emits function markers.
    pub fn unsafe_mode() -> Self {
        Self::with_options(EncodeOptions::unsafe_mode())
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Encodes `value` to JSON text.
    ///
    /// A root that serializes to nothing (undefined, or a function in safe
    /// mode) is written as `null`.
    pub fn encode(
        &self,
        value: &Value,
        replacer: &Replacer<'_>,
        indent: &Indent,
    ) -> Result<String, EncodeError> {
        let json = self.to_json(value, replacer)?;
        write_json(&json, indent)
    }

    /// Builds the tagged JSON tree without writing it out.
    pub fn to_json(&self, value: &Value, replacer: &Replacer<'_>) -> Result<JsonValue, EncodeError> {
        Ok(self
            .write_any("", value.clone(), replacer, false)?
            .unwrap_or(JsonValue::Null))
    }

    /// Encodes one node. `None` means the node is dropped from its object
    /// (or becomes `null` in an array).
    ///
    /// `payload_fields` is set when this node is the structured payload of a
    /// marker, whose fields the allow-list must not touch.
    fn write_any(
        &self,
        key: &str,
        value: Value,
        replacer: &Replacer<'_>,
        payload_fields: bool,
    ) -> Result<Option<JsonValue>, EncodeError> {
        let value = match replacer {
            Replacer::Function(hook) => hook(key, value),
            _ => value,
        };
        match to_serializable(value, self.options.unsafe_functions) {
            Value::Undefined => Ok(None),
            Value::Null => Ok(Some(JsonValue::Null)),
            Value::Bool(b) => Ok(Some(JsonValue::Bool(b))),
            Value::Integer(i) => {
                if self.options.safe_integers && i.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
                    return Err(unsafe_integer(key, i.to_string()));
                }
                Ok(Some(JsonValue::from(i)))
            }
            Value::Float(f) => {
                if self.options.safe_integers
                    && f.fract() == 0.0
                    && f.abs() > MAX_SAFE_INTEGER as f64
                {
                    return Err(unsafe_integer(key, f.to_string()));
                }
                Ok(Some(
                    serde_json::Number::from_f64(f)
                        .map(JsonValue::Number)
                        .unwrap_or(JsonValue::Null),
                ))
            }
            Value::Str(s) => Ok(Some(JsonValue::String(s))),
            Value::Array(items) => self.write_arr(items, replacer).map(Some),
            Value::Object(fields) => self.write_obj(fields, replacer, payload_fields).map(Some),
            // `to_serializable` has already replaced every extended value.
            _ => Ok(None),
        }
    }

    fn write_arr(&self, items: Vec<Value>, replacer: &Replacer<'_>) -> Result<JsonValue, EncodeError> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let json = self.write_any(&i.to_string(), item, replacer, false)?;
            out.push(json.unwrap_or(JsonValue::Null));
        }
        Ok(JsonValue::Array(out))
    }

    fn write_obj(
        &self,
        fields: Vec<(String, Value)>,
        replacer: &Replacer<'_>,
        payload_fields: bool,
    ) -> Result<JsonValue, EncodeError> {
        let mut out = serde_json::Map::with_capacity(fields.len());
        for (key, value) in fields {
            if let Replacer::AllowList(keys) = replacer {
                let allowed = payload_fields || is_tag(&key) || keys.iter().any(|k| *k == key);
                if !allowed {
                    continue;
                }
            }
            let child_is_payload = has_structured_payload(&key);
            if let Some(json) = self.write_any(&key, value, replacer, child_is_payload)? {
                out.insert(key, json);
            }
        }
        Ok(JsonValue::Object(out))
    }
}

fn unsafe_integer(key: &str, value: String) -> EncodeError {
    EncodeError::UnsafeInteger {
        key: key.to_owned(),
        value,
    }
}

/// Writes a JSON tree compactly or with the given indent unit.
fn write_json(json: &JsonValue, indent: &Indent) -> Result<String, EncodeError> {
    let Some(unit) = indent.unit() else {
        return Ok(serde_json::to_string(json)?);
    };
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(unit.as_bytes()));
    json.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|err| EncodeError::Json(err.to_string()))
}
