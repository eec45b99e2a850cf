//! Functions carried as source text.
//!
//! A [`Function`] always knows its source. It may also hold a native body,
//! bound either by the caller or, in unsafe decoding, by a [`FunctionLoader`].
//! Binding a body is the only way decoded data can lead to code running, and
//! it never happens unless the decoder is explicitly put in unsafe mode.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// A callable body.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

#[derive(Clone)]
pub struct Function {
    source: String,
    body: Option<NativeFn>,
}

impl Function {
    /// A function known only by its source text. Calling it yields `None`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            body: None,
        }
    }

    pub fn with_body<F>(source: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            source: source.into(),
            body: Some(Arc::new(body)),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_callable(&self) -> bool {
        self.body.is_some()
    }

    /// Invokes the bound body, if any.
    pub fn call(&self, args: &[Value]) -> Option<Value> {
        self.body.as_ref().map(|body| body(args))
    }

    pub(crate) fn bind(mut self, body: NativeFn) -> Self {
        self.body = Some(body);
        self
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("source", &self.source)
            .field("callable", &self.body.is_some())
            .finish()
    }
}

/// Turns function source text into a callable body during unsafe decoding.
///
/// Returning `None` leaves the decoded [`Function`] inert.
pub trait FunctionLoader: Send + Sync {
    fn load(&self, source: &str) -> Option<NativeFn>;
}

/// A [`FunctionLoader`] that only knows sources registered up front.
///
/// # Example
///
/// ```
/// use json_ext::{FunctionLoader, FunctionRegistry, Value};
///
/// let registry = FunctionRegistry::new().register("function echo(arg) { return arg }", |args| {
///     args.first().cloned().unwrap_or(Value::Undefined)
/// });
/// let echo = registry.load("function echo(arg) { return arg }").unwrap();
/// assert_eq!(echo(&[Value::from("ok")]), Value::from("ok"));
/// assert!(registry.load("function other() {}").is_none());
/// ```
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    bodies: HashMap<String, NativeFn>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(mut self, source: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.bodies.insert(source.into(), Arc::new(body));
        self
    }

    /// Registers the body of an existing function under its own source.
    pub fn register_function(mut self, function: &Function) -> Self {
        if let Some(body) = &function.body {
            self.bodies.insert(function.source.clone(), Arc::clone(body));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl FunctionLoader for FunctionRegistry {
    fn load(&self, source: &str) -> Option<NativeFn> {
        self.bodies.get(source).cloned()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("sources", &self.bodies.keys().collect::<Vec<_>>())
            .finish()
    }
}
