//! Encoder and decoder configuration, and the caller customization hooks.

use std::fmt;
use std::sync::Arc;

use crate::function::FunctionLoader;
use crate::value::Value;

/// Longest indent unit the formatter honors, in spaces or characters.
const MAX_INDENT: usize = 10;

/// Largest integer magnitude an IEEE 754 double holds exactly, 2^53 - 1.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Per-node key/value rewrite hook, shared by encoding and decoding.
///
/// Receives the property key (array index as a string, `""` at the root) and
/// the current value. Returning [`Value::Undefined`] removes the property.
pub type Hook<'a> = &'a dyn Fn(&str, Value) -> Value;

/// The encoder's customization argument.
#[derive(Default)]
pub enum Replacer<'a> {
    #[default]
    None,
    /// Rewrites every node before it is tagged.
    Function(Hook<'a>),
    /// Keeps only the listed object keys. Reserved marker keys, array
    /// indices and the fields of structured marker payloads are never
    /// filtered.
    AllowList(Vec<String>),
}

impl<'a> Replacer<'a> {
    pub fn function(hook: Hook<'a>) -> Self {
        Replacer::Function(hook)
    }

    pub fn allow<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Replacer::AllowList(keys.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for Replacer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacer::None => f.write_str("None"),
            Replacer::Function(_) => f.write_str("Function(..)"),
            Replacer::AllowList(keys) => f.debug_tuple("AllowList").field(keys).finish(),
        }
    }
}

/// Output formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Indent {
    /// Compact output.
    #[default]
    None,
    /// Indent by this many spaces, capped at 10. Zero means compact.
    Spaces(usize),
    /// Indent by this string, truncated to 10 characters. Empty means compact.
    Str(String),
}

impl Indent {
    /// The per-level indent unit, or `None` for compact output.
    pub(crate) fn unit(&self) -> Option<String> {
        let unit: String = match self {
            Indent::None => return None,
            Indent::Spaces(n) => " ".repeat((*n).min(MAX_INDENT)),
            Indent::Str(s) => s.chars().take(MAX_INDENT).collect(),
        };
        (!unit.is_empty()).then_some(unit)
    }
}

impl From<usize> for Indent {
    fn from(n: usize) -> Self {
        Indent::Spaces(n)
    }
}

impl From<&str> for Indent {
    fn from(s: &str) -> Self {
        Indent::Str(s.to_owned())
    }
}

/// Options controlling encoding.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Emit function markers carrying source text. When `false` (default),
    /// functions are dropped like any other unserializable value.
    pub unsafe_functions: bool,
    /// Reject integral numbers beyond [`MAX_SAFE_INTEGER`] instead of writing
    /// them. Off by default.
    pub safe_integers: bool,
}

impl EncodeOptions {
    pub fn unsafe_mode() -> Self {
        Self {
            unsafe_functions: true,
            ..Self::default()
        }
    }
}

/// Options controlling decoding.
#[derive(Clone, Default)]
pub struct DecodeOptions {
    /// Turn function markers into [`Function`](crate::Function) values. When
    /// `false` (default), they are returned untouched as objects.
    pub unsafe_functions: bool,
    /// Binds a callable body to each reconstructed function. Only consulted
    /// when `unsafe_functions` is on.
    pub loader: Option<Arc<dyn FunctionLoader>>,
}

impl DecodeOptions {
    pub fn unsafe_mode() -> Self {
        Self {
            unsafe_functions: true,
            loader: None,
        }
    }

    pub fn with_loader(mut self, loader: Arc<dyn FunctionLoader>) -> Self {
        self.loader = Some(loader);
        self
    }
}

impl fmt::Debug for DecodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("unsafe_functions", &self.unsafe_functions)
            .field("loader", &self.loader.is_some())
            .finish()
    }
}
