// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payload values
//!
//! A [`Payload`] is an insertion-ordered map from [`Name`] to [`Value`].
//! Two keys are reserved by the bus: `:event_name` (always set on delivery)
//! and `:error` (set on the payload handed to an error handler).

use crate::error::{BusError, ListenerError};
use crate::name::{Atom, Name};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Reserved key carrying the published event name
pub const EVENT_NAME_KEY: &str = "event_name";
/// Reserved key carrying a listener's error (error handler payloads only)
pub const ERROR_KEY: &str = "error";

/// Event data delivered to listeners
pub type Payload = IndexMap<Name, Value>;

/// Build a [`Payload`] from `key => value` pairs
///
/// ```
/// use herald_core::{payload, Name};
/// let p = payload! { "a" => 56, Name::atom("b") => "text" };
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! payload {
    () => {
        $crate::Payload::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut payload = $crate::Payload::new();
        $(
            payload.insert($crate::Name::from($key), $crate::Value::from($value));
        )+
        payload
    }};
}

/// A payload value
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Atom(Atom),
    List(Vec<Value>),
    Map(Payload),
    /// A captured listener failure
    Error(Arc<ListenerError>),
}

impl Value {
    /// Short type label for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Atom(_) => "atom",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Error(_) => "error",
        }
    }

    /// Textual form of text and atom values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Atom(a) => Some(a.as_str()),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ListenerError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// JSON form used by the background path.
    ///
    /// Lossy: atoms become strings, errors become their message and
    /// non-finite floats become null. Fails if a map holds the same key in
    /// both text and atom form.
    pub fn to_json(&self) -> Result<JsonValue, BusError> {
        Ok(match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Atom(a) => JsonValue::String(a.as_str().to_string()),
            Self::List(items) => JsonValue::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<_, _>>()?,
            ),
            Self::Map(map) => JsonValue::Object(payload_to_json(map)?),
            Self::Error(e) => JsonValue::String(e.to_string()),
        })
    }

    pub fn from_json(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            JsonValue::String(s) => Self::Text(s),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Value::from_json).collect()),
            JsonValue::Object(map) => Self::Map(payload_from_json(map)),
        }
    }
}

/// Convert a payload to a JSON object; every key becomes text.
///
/// `"kind"` and `:kind` would land on the same JSON key, so a payload
/// holding both is rejected rather than losing one of the values.
pub fn payload_to_json(payload: &Payload) -> Result<serde_json::Map<String, JsonValue>, BusError> {
    let mut map = serde_json::Map::with_capacity(payload.len());
    for (key, value) in payload {
        if map.insert(key.as_str().to_string(), value.to_json()?).is_some() {
            return Err(BusError::InvalidArgument(format!(
                "payload key {:?} is given in both text and atom form",
                key.as_str()
            )));
        }
    }
    Ok(map)
}

/// Convert a JSON object to a payload with text keys
pub fn payload_from_json(map: serde_json::Map<String, JsonValue>) -> Payload {
    map.into_iter()
        .map(|(k, v)| (Name::Text(k), Value::from_json(v)))
        .collect()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Atom(a), Self::Atom(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            // Errors are equal only when they are the same captured failure
            (Self::Error(a), Self::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Event names must be text or atoms
impl TryFrom<Value> for Name {
    type Error = BusError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(Name::Text(s)),
            Value::Atom(a) => Ok(Name::Atom(a)),
            other => Err(BusError::InvalidArgument(format!(
                "event name must be text or an atom, got {}",
                other.kind()
            ))),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Atom> for Value {
    fn from(a: Atom) -> Self {
        Self::Atom(a)
    }
}

impl From<Name> for Value {
    fn from(n: Name) -> Self {
        match n {
            Name::Text(s) => Self::Text(s),
            Name::Atom(a) => Self::Atom(a),
        }
    }
}

impl From<&Name> for Value {
    fn from(n: &Name) -> Self {
        Self::from(n.clone())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Payload> for Value {
    fn from(map: Payload) -> Self {
        Self::Map(map)
    }
}

impl From<ListenerError> for Value {
    fn from(e: ListenerError) -> Self {
        Self::Error(Arc::new(e))
    }
}

impl From<Arc<ListenerError>> for Value {
    fn from(e: Arc<ListenerError>) -> Self {
        Self::Error(e)
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
