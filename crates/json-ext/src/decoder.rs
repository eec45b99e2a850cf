//! Tag-resolving decoder.
//!
//! Parses text with `serde_json`, then rebuilds the [`Value`] tree bottom-up:
//! children are resolved before their parent, so a marker object sees its
//! payload already decoded. The reviver hook runs on each node after its
//! marker has been resolved.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::codecs::from_serializable;
use crate::error::DecodeError;
use crate::options::{DecodeOptions, Hook};
use crate::value::Value;

/// Decoder: turns tagged JSON into [`Value`] trees.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    pub options: DecodeOptions,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder that reconstructs function markers.
    pub fn unsafe_mode() -> Self {
        Self::with_options(DecodeOptions::unsafe_mode())
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Parses and decodes JSON text.
    ///
    /// Nesting depth is not limited, so anything the encoder writes can be
    /// read back.
    pub fn decode(&self, text: &str, reviver: Option<Hook<'_>>) -> Result<Value, DecodeError> {
        let mut de = serde_json::Deserializer::from_str(text);
        de.disable_recursion_limit();
        let json = JsonValue::deserialize(&mut de)?;
        de.end()?;
        self.from_json(json, reviver)
    }

    /// Decodes an already parsed JSON tree.
    pub fn from_json(&self, json: JsonValue, reviver: Option<Hook<'_>>) -> Result<Value, DecodeError> {
        self.read_any("", json, reviver)
    }

    fn read_any(
        &self,
        key: &str,
        json: JsonValue,
        reviver: Option<Hook<'_>>,
    ) -> Result<Value, DecodeError> {
        let value = match json {
            JsonValue::Object(map) => {
                let mut fields = Vec::with_capacity(map.len());
                for (k, v) in map {
                    let child = self.read_any(&k, v, reviver)?;
                    // A reviver returning undefined deletes the property.
                    if !child.is_undefined() {
                        fields.push((k, child));
                    }
                }
                from_serializable(fields, &self.options)?
            }
            JsonValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    out.push(self.read_any(&i.to_string(), item, reviver)?);
                }
                Value::Array(out)
            }
            scalar => Value::from(scalar),
        };
        Ok(match reviver {
            Some(hook) => hook(key, value),
            None => value,
        })
    }
}
