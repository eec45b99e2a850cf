//! [`Value`] - the value tree that encoding consumes and decoding produces.

use num_bigint::BigInt;
use url::Url;

use crate::function::Function;
use crate::pattern::Pattern;
use crate::tags::{
    BIGINT_TAG, DATE_TAG, FUNCTION_TAG, MAP_TAG, NUMBER_TAG, REGEXP_TAG, SET_TAG,
    TYPEDARRAY_TAG, URL_TAG,
};
use crate::typed_array::TypedArray;

/// A JSON value extended with the types plain JSON cannot express.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value. Dropped from objects, written as `null` in arrays.
    Undefined,
    Null,
    Bool(bool),
    Integer(i64),
    /// Any `f64`; NaN and the infinities are carried by a marker.
    Float(f64),
    Str(String),
    Array(Vec<Value>),
    /// Ordered key-value pairs.
    Object(Vec<(String, Value)>),
    BigInt(BigInt),
    /// A plain byte buffer.
    Bytes(Vec<u8>),
    TypedArray(TypedArray),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    /// Insertion-ordered entries with unique keys.
    Map(Vec<(Value, Value)>),
    /// Insertion-ordered unique values.
    Set(Vec<Value>),
    RegExp(Pattern),
    Url(Url),
    Function(Function),
}

/// Classification of a [`Value`], used to pick its codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Undefined,
    Null,
    Bool,
    Number,
    NonFiniteNumber,
    String,
    Array,
    Object,
    BigInt,
    Bytes,
    TypedArray,
    Date,
    Map,
    Set,
    RegExp,
    Url,
    Function,
}

impl Kind {
    /// The marker key this kind is encoded under, if any.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Kind::BigInt => Some(BIGINT_TAG),
            Kind::NonFiniteNumber => Some(NUMBER_TAG),
            Kind::Bytes | Kind::TypedArray => Some(TYPEDARRAY_TAG),
            Kind::Date => Some(DATE_TAG),
            Kind::Map => Some(MAP_TAG),
            Kind::Set => Some(SET_TAG),
            Kind::RegExp => Some(REGEXP_TAG),
            Kind::Url => Some(URL_TAG),
            Kind::Function => Some(FUNCTION_TAG),
            Kind::Undefined
            | Kind::Null
            | Kind::Bool
            | Kind::Number
            | Kind::String
            | Kind::Array
            | Kind::Object => None,
        }
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Integer(_) => Kind::Number,
            Value::Float(f) if f.is_finite() => Kind::Number,
            Value::Float(_) => Kind::NonFiniteNumber,
            Value::Str(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::BigInt(_) => Kind::BigInt,
            Value::Bytes(_) => Kind::Bytes,
            Value::TypedArray(_) => Kind::TypedArray,
            Value::Date(_) => Kind::Date,
            Value::Map(_) => Kind::Map,
            Value::Set(_) => Kind::Set,
            Value::RegExp(_) => Kind::RegExp,
            Value::Url(_) => Kind::Url,
            Value::Function(_) => Kind::Function,
        }
    }

    /// Builds an object from key-value pairs, keeping their order.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Value {
        Value::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds a map. A repeated key keeps its first position and takes the
    /// last value.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Value {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            match out.iter_mut().find(|(k, _)| k.same_value_zero(&key)) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Value::Map(out)
    }

    /// Builds a set, dropping repeated values.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Value {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            if !out.iter().any(|v| v.same_value_zero(&item)) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    /// Key equality used by maps and sets.
    ///
    /// Numbers compare by value with NaN equal to itself and `0 == -0`.
    /// Strings, big integers and the scalar kinds compare by value. Every
    /// compound value is a distinct identity, so two of them never match.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        if let (Value::Integer(a), Value::Integer(b)) = (self, other) {
            return a == b;
        }
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => return a == b || (a.is_nan() && b.is_nan()),
            (Some(_), None) | (None, Some(_)) => return false,
            (None, None) => {}
        }
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            _ => false,
        }
    }

    /// Field lookup on an object. Returns `None` for every other kind.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_big_int(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_big_int(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    pub fn is_non_finite(&self) -> bool {
        matches!(self, Value::Float(f) if !f.is_finite())
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    pub fn is_typed_array(&self) -> bool {
        matches!(self, Value::TypedArray(_))
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    pub fn is_regexp(&self) -> bool {
        matches!(self, Value::RegExp(_))
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Value::Url(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }
}

impl From<serde_json::Value> for Value {
    /// Plain conversion. Marker objects stay objects; use the decoder to
    /// interpret them.
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BigInt> for Value {
    fn from(b: BigInt) -> Self {
        Value::BigInt(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

impl From<TypedArray> for Value {
    fn from(array: TypedArray) -> Self {
        Value::TypedArray(array)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::RegExp(p)
    }
}

impl From<Url> for Value {
    fn from(u: Url) -> Self {
        Value::Url(u)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_uses_same_value_zero() {
        let set = Value::set([
            Value::Float(f64::NAN),
            Value::Float(f64::NAN),
            Value::Integer(0),
            Value::Float(-0.0),
            Value::Float(1.0),
            Value::Integer(1),
            Value::from("1"),
        ]);
        let Value::Set(items) = set else {
            panic!("expected a set");
        };
        assert_eq!(items.len(), 4);
        assert!(items[0].is_non_finite());
        assert_eq!(items[1], Value::Integer(0));
        assert_eq!(items[2], Value::Float(1.0));
        assert_eq!(items[3], Value::from("1"));
    }

    #[test]
    fn compound_values_never_collide_in_a_set() {
        let set = Value::set([Value::Array(vec![]), Value::Array(vec![])]);
        assert_eq!(set, Value::Set(vec![Value::Array(vec![]), Value::Array(vec![])]));
    }

    #[test]
    fn map_keeps_first_position_and_last_value() {
        let map = Value::map([
            (Value::from("a"), Value::Integer(1)),
            (Value::from("b"), Value::Integer(2)),
            (Value::from("a"), Value::Integer(3)),
        ]);
        assert_eq!(
            map,
            Value::Map(vec![
                (Value::from("a"), Value::Integer(3)),
                (Value::from("b"), Value::Integer(2)),
            ])
        );
    }

    #[test]
    fn kind_maps_to_marker_tags() {
        assert_eq!(Value::Float(f64::INFINITY).kind().tag(), Some(NUMBER_TAG));
        assert_eq!(Value::Float(1.5).kind().tag(), None);
        assert_eq!(Value::Bytes(vec![]).kind().tag(), Some(TYPEDARRAY_TAG));
        assert_eq!(Value::Date(0).kind().tag(), Some(DATE_TAG));
        assert_eq!(Value::object([("a", Value::Null)]).kind().tag(), None);
    }

    #[test]
    fn from_json_is_plain() {
        let v = Value::from(serde_json::json!({"__@json.bigint__": "1", "n": 18446744073709551615u64}));
        assert_eq!(v.get(BIGINT_TAG), Some(&Value::from("1")));
        assert_eq!(v.get("n"), Some(&Value::Float(18446744073709551615u64 as f64)));
    }
}
