//! Reserved marker keys.
//!
//! These strings are the wire contract shared with every other implementation
//! of the format and must never change.

pub const BIGINT_TAG: &str = "__@json.bigint__";
pub const NUMBER_TAG: &str = "__@json.number__";
pub const TYPEDARRAY_TAG: &str = "__@json.typedarray__";
/// Older writers emitted bytes as a bare hex string under this key. Still
/// decoded, never encoded.
pub const BYTES_TAG: &str = "__@json.bytes__";
pub const DATE_TAG: &str = "__@json.date__";
pub const MAP_TAG: &str = "__@json.map__";
pub const SET_TAG: &str = "__@json.set__";
pub const REGEXP_TAG: &str = "__@json.regexp__";
pub const URL_TAG: &str = "__@json.url__";
pub const FUNCTION_TAG: &str = "__@json.function__";

/// Marker keys in the order the decoder checks them. When an object carries
/// several, the earliest one in this list wins.
pub const TAG_ORDER: [&str; 10] = [
    BIGINT_TAG,
    NUMBER_TAG,
    TYPEDARRAY_TAG,
    BYTES_TAG,
    DATE_TAG,
    MAP_TAG,
    SET_TAG,
    REGEXP_TAG,
    URL_TAG,
    FUNCTION_TAG,
];

/// Returns `true` if `key` is one of the reserved marker keys.
pub fn is_tag(key: &str) -> bool {
    TAG_ORDER.contains(&key)
}

/// Returns `true` if the object under `key` is a structured payload whose own
/// fields (`type`/`bytes`, `source`/`flags`) belong to the format rather than
/// to user data.
pub(crate) fn has_structured_payload(key: &str) -> bool {
    key == TYPEDARRAY_TAG || key == REGEXP_TAG
}
