//! Timestamps, maps and sets.

use crate::value::Value;

/// Timestamp payload: milliseconds since the epoch as an integer. A finite
/// float is truncated toward zero. Anything else is rejected.
pub fn decode_date(payload: &Value) -> Option<i64> {
    match payload {
        Value::Integer(ms) => Some(*ms),
        Value::Float(ms) if ms.is_finite() => Some(ms.trunc() as i64),
        _ => None,
    }
}

/// Flattens map entries into the `[[key, value], ...]` payload.
pub fn encode_map_entries(entries: Vec<(Value, Value)>) -> Value {
    Value::Array(
        entries
            .into_iter()
            .map(|(k, v)| Value::Array(vec![k, v]))
            .collect(),
    )
}

/// Rebuilds a map from `[[key, value], ...]`. Every entry must be a
/// two-element array.
pub fn decode_map_entries(items: Vec<Value>) -> Option<Value> {
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let Value::Array(pair) = item else {
            return None;
        };
        let [key, value]: [Value; 2] = pair.try_into().ok()?;
        entries.push((key, value));
    }
    Some(Value::map(entries))
}
