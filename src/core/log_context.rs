//! Structured attributes and the ambient context they can be drawn from
//!
//! This module provides:
//! - `FieldValue`: A loggable value
//! - `Attr`: An ordered key/value pair attached to a log entry
//! - `ContextKey`: Typed key for values carried in a `LogContext`
//! - `LogContext`: Caller-supplied, request-scoped values

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u16> for FieldValue {
    fn from(i: u16) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(v) => FieldValue::Int(v),
            Err(_) => FieldValue::String(i.to_string()),
        }
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        FieldValue::from(i as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A single key/value attribute
///
/// Keys are not required to be unique: duplicates are kept in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attr {
    pub key: String,
    pub value: FieldValue,
}

impl Attr {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K, V> From<(K, V)> for Attr
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Key for a value stored in a [`LogContext`]
///
/// Values inserted under a `ContextKey` live apart from values inserted under
/// plain strings, so unrelated code sharing a context cannot shadow them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContextKey(String);

impl ContextKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContextKey {
    fn from(name: &str) -> Self {
        ContextKey::new(name)
    }
}

impl From<String> for ContextKey {
    fn from(name: String) -> Self {
        ContextKey(name)
    }
}

impl From<&ContextKey> for ContextKey {
    fn from(key: &ContextKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request-scoped values a handler may pick attributes from
///
/// # Example
///
/// ```
/// use rust_pretty_logger::{ContextKey, FieldValue, LogContext};
///
/// let ctx = LogContext::new()
///     .with_value("request_id", "abc-123")
///     .with_plain_value("user", "john");
///
/// assert_eq!(
///     ctx.lookup(&ContextKey::new("request_id")),
///     Some(&FieldValue::from("abc-123"))
/// );
/// // plain string values are found as a fallback
/// assert!(ctx.lookup(&ContextKey::new("user")).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogContext {
    typed: HashMap<ContextKey, FieldValue>,
    plain: HashMap<String, FieldValue>,
}

impl LogContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under a typed key
    pub fn with_value<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<ContextKey>,
        V: Into<FieldValue>,
    {
        self.typed.insert(key.into(), value.into());
        self
    }

    /// Add a value under a plain string key
    pub fn with_plain_value<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.plain.insert(key.into(), value.into());
        self
    }

    /// Add a value under a typed key (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<ContextKey>,
        V: Into<FieldValue>,
    {
        self.typed.insert(key.into(), value.into());
    }

    /// Resolve a key: typed values first, then a plain value of the same name
    pub fn lookup(&self, key: &ContextKey) -> Option<&FieldValue> {
        self.typed.get(key).or_else(|| self.plain.get(key.name()))
    }

    pub fn is_empty(&self) -> bool {
        self.typed.is_empty() && self.plain.is_empty()
    }

    pub fn len(&self) -> usize {
        self.typed.len() + self.plain.len()
    }
}
