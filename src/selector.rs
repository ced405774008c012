//! Key selectors for the dynamic operations
//!
//! A selector is either a path expression resolved against each item, or a
//! caller function. Paths are parsed once, when the operation validates its
//! arguments; a path that resolves to nothing yields the key `undefined`.

use std::fmt;

use serde_json::Value;

use crate::error::{ArgPosition, Result, UtilError};
use crate::key::RecordKey;
use crate::path::Path;

const SELECTOR: &str = "a key selector (path or function)";

/// Caller-facing selector, validated when an operation starts
#[derive(Clone, Copy)]
pub enum Selector<'a> {
    Expr(&'a str),
    Func(&'a dyn Fn(&Value) -> RecordKey),
}

impl<'a> Selector<'a> {
    pub fn func(f: &'a dyn Fn(&Value) -> RecordKey) -> Self {
        Selector::Func(f)
    }

    /// Validate the selector, reporting failures against `position`
    pub(crate) fn resolve(self, position: ArgPosition) -> Result<KeyFn<'a>> {
        match self {
            Selector::Expr(expr) => Path::parse(expr)
                .map(KeyFn::Path)
                .map_err(|_| UtilError::invalid(position, SELECTOR)),
            Selector::Func(f) => Ok(KeyFn::Func(f)),
        }
    }
}

impl<'a> From<&'a str> for Selector<'a> {
    fn from(expr: &'a str) -> Self {
        Selector::Expr(expr)
    }
}

impl<'a> From<&'a String> for Selector<'a> {
    fn from(expr: &'a String) -> Self {
        Selector::Expr(expr.as_str())
    }
}

impl fmt::Debug for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Expr(expr) => f.debug_tuple("Expr").field(expr).finish(),
            Selector::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// A validated selector
pub(crate) enum KeyFn<'a> {
    Path(Path),
    Func(&'a dyn Fn(&Value) -> RecordKey),
}

impl KeyFn<'_> {
    pub(crate) fn key(&self, item: &Value) -> RecordKey {
        match self {
            KeyFn::Path(path) => path
                .resolve(item)
                .map(RecordKey::from)
                .unwrap_or_else(|| RecordKey::from("undefined")),
            KeyFn::Func(f) => f(item),
        }
    }
}
