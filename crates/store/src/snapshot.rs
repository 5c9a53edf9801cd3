use serde_json::{Map, Value};

use crate::errors::LoadError;

/// Immutable configuration document produced by one successful load.
///
/// Keys keep document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    location: String,
    values: Map<String, Value>,
}

impl Snapshot {
    pub fn new(location: impl Into<String>, values: Map<String, Value>) -> Self {
        Self { location: location.into(), values }
    }

    /// Decode a fetched body; only a top-level JSON object is accepted.
    pub fn from_body(location: &str, body: &[u8]) -> Result<Self, LoadError> {
        let invalid = |cause: String| LoadError::InvalidFormat { location: location.to_string(), cause };
        match serde_json::from_slice::<Value>(body).map_err(|e| invalid(e.to_string()))? {
            Value::Object(values) => Ok(Self::new(location, values)),
            other => Err(invalid(format!("top-level value is {}, expected an object", kind_of(&other)))),
        }
    }

    pub fn location(&self) -> &str { &self.location }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> { self.values.get(key) }

    pub fn values(&self) -> &Map<String, Value> { &self.values }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
