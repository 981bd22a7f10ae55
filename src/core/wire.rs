//! Typed access to loosely typed API payloads.
//!
//! Readers copy a key onto a field only when the key is present, so fields the
//! server omitted keep their documented defaults.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{ChartError, ChartResult};

use super::Scalar;

/// Conversion between a typed client value and its raw JSON form.
pub trait WireValue: Sized {
    fn to_wire(&self) -> Value;

    fn from_wire(value: &Value) -> ChartResult<Self>;

    /// Value produced for an explicit JSON `null`, if the type has one.
    fn from_null() -> Option<Self> {
        None
    }
}

pub(crate) fn type_error(expected: &str, value: &Value) -> ChartError {
    ChartError::Validation(format!("expected {expected}, got `{value}`"))
}

impl WireValue for bool {
    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        value.as_bool().ok_or_else(|| type_error("a boolean", value))
    }
}

impl WireValue for String {
    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| type_error("a string", value))
    }
}

impl WireValue for i64 {
    fn to_wire(&self) -> Value {
        Value::from(*self)
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        if let Some(int) = value.as_i64() {
            return Ok(int);
        }
        match value.as_f64() {
            Some(float) if float.fract() == 0.0 => Ok(float as i64),
            _ => Err(type_error("an integer", value)),
        }
    }
}

impl WireValue for f64 {
    fn to_wire(&self) -> Value {
        Value::from(*self)
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        value.as_f64().ok_or_else(|| type_error("a number", value))
    }
}

impl WireValue for Scalar {
    fn to_wire(&self) -> Value {
        self.to_value()
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        Scalar::from_value(value)
    }
}

impl WireValue for Value {
    fn to_wire(&self) -> Value {
        self.clone()
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        Ok(value.clone())
    }

    fn from_null() -> Option<Self> {
        Some(Value::Null)
    }
}

impl<T: WireValue> WireValue for Option<T> {
    fn to_wire(&self) -> Value {
        self.as_ref().map_or(Value::Null, WireValue::to_wire)
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_wire(value).map(Some)
    }

    fn from_null() -> Option<Self> {
        Some(None)
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    fn to_wire(&self) -> Value {
        Value::Array(self.iter().map(WireValue::to_wire).collect())
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        value
            .as_array()
            .ok_or_else(|| type_error("an array", value))?
            .iter()
            .map(T::from_wire)
            .collect()
    }
}

impl<T: WireValue> WireValue for IndexMap<String, T> {
    fn to_wire(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_wire()))
                .collect(),
        )
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        value
            .as_object()
            .ok_or_else(|| type_error("an object", value))?
            .iter()
            .map(|(key, value)| Ok((key.clone(), T::from_wire(value)?)))
            .collect()
    }
}

/// Read-only view over a JSON object; non-object inputs behave as empty.
#[derive(Debug, Clone, Copy)]
pub struct WireObject<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> WireObject<'a> {
    #[must_use]
    pub fn new(value: Option<&'a Value>) -> Self {
        Self {
            map: value.and_then(Value::as_object),
        }
    }

    #[must_use]
    pub fn from_map(map: &'a Map<String, Value>) -> Self {
        Self { map: Some(map) }
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.map.is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_none_or(Map::is_empty)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|map| map.get(key))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Nested object under `key`; missing or non-object values read as empty.
    #[must_use]
    pub fn object(&self, key: &str) -> WireObject<'a> {
        WireObject::new(self.get(key))
    }

    #[must_use]
    pub fn entries(&self) -> Vec<(&'a String, &'a Value)> {
        self.map.map(|map| map.iter().collect()).unwrap_or_default()
    }

    /// Typed value under `key`; `Ok(None)` when absent or a null the type cannot hold.
    pub fn read<T: WireValue>(&self, key: &str) -> ChartResult<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Null) => Ok(T::from_null()),
            Some(value) => T::from_wire(value)
                .map(Some)
                .map_err(|err| with_key(key, err)),
        }
    }

    /// Typed value under `key`, falling back to `default` when absent.
    pub fn read_or<T: WireValue>(&self, key: &str, default: T) -> ChartResult<T> {
        Ok(self.read(key)?.unwrap_or(default))
    }

    /// Overwrites `target` only when `key` is present.
    pub fn copy<T: WireValue>(&self, key: &str, target: &mut T) -> ChartResult<()> {
        if let Some(value) = self.read(key)? {
            *target = value;
        }
        Ok(())
    }
}

fn with_key(key: &str, err: ChartError) -> ChartError {
    match err {
        ChartError::Validation(message) => ChartError::Validation(format!("`{key}`: {message}")),
        other => other,
    }
}

/// Inserts a typed value under `key`.
pub fn put<T: WireValue>(map: &mut Map<String, Value>, key: &str, value: &T) {
    map.insert(key.to_owned(), value.to_wire());
}

/// Inserts `value` only when it is `Some`.
pub fn put_some<T: WireValue>(map: &mut Map<String, Value>, key: &str, value: Option<&T>) {
    if let Some(value) = value {
        put(map, key, value);
    }
}
