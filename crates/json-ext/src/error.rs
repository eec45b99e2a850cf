//! Error types for tagged JSON encoding and decoding.

use json_ext_buffers::HexError;
use thiserror::Error;

/// A payload string is not a valid literal for its target type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Cannot convert {0:?} to a BigInt")]
    BigInt(String),
    #[error("Invalid URL {input:?}: {reason}")]
    Url { input: String, reason: String },
    #[error("Invalid regular expression flags {0:?}")]
    RegExpFlags(String),
}

/// Errors that can occur while decoding tagged JSON text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// The text is not JSON at all.
    #[error("Invalid JSON: {0}")]
    Json(String),
    /// Malformed hex inside a byte payload.
    #[error(transparent)]
    Format(#[from] HexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A marker payload has the wrong shape for its tag.
    #[error("Invalid {tag} payload: {reason}")]
    Payload {
        tag: &'static str,
        reason: &'static str,
    },
    /// Raw bytes do not divide into whole elements of the named kind.
    #[error("Byte length {len} of {kind} is not a multiple of {element_size}")]
    Layout {
        kind: &'static str,
        len: usize,
        element_size: usize,
    },
}

impl DecodeError {
    pub(crate) fn payload(tag: &'static str, reason: &'static str) -> Self {
        DecodeError::Payload { tag, reason }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}

/// Errors that can occur while encoding a value tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Only raised when `EncodeOptions::safe_integers` is on.
    #[error("Number {value} at key {key:?} is outside the safe integer range")]
    UnsafeInteger { key: String, value: String },
    #[error("JSON serialization failed: {0}")]
    Json(String),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Json(err.to_string())
    }
}
