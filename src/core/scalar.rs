use std::fmt;
use std::hash::{Hash, Hasher};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// Loosely typed axis value: a number or a raw string.
///
/// The empty string doubles as the "auto" sentinel for ranges. Equality is
/// numeric across `Int`/`Float`, so `Int(10) == Float(10.0)`.
#[derive(Debug, Clone)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// The empty-string sentinel used by the API for "automatic".
    #[must_use]
    pub fn auto() -> Self {
        Self::Text(String::new())
    }

    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    /// Best-effort numeric coercion of a raw string.
    ///
    /// Whole numbers become `Int`, other finite numbers `Float`, everything else
    /// (including the empty sentinel) stays `Text` unchanged.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::auto();
        }
        match raw.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Self::from_number(number),
            _ => Self::Text(raw.to_owned()),
        }
    }

    /// Canonical numeric form: whole values collapse to `Int`.
    #[must_use]
    pub fn from_number(number: f64) -> Self {
        if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
            Self::Int(number as i64)
        } else {
            Self::Float(number)
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(value) => Value::from(*value),
            Self::Float(value) => Value::from(*value),
            Self::Text(text) => Value::String(text.clone()),
        }
    }

    /// Reads a JSON scalar without coercing strings; `null` maps to the auto sentinel.
    pub fn from_value(value: &Value) -> ChartResult<Self> {
        match value {
            Value::Null => Ok(Self::auto()),
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Ok(Self::Int(int))
                } else {
                    number.as_f64().map(Self::Float).ok_or_else(|| {
                        ChartError::Validation(format!("unrepresentable number `{number}`"))
                    })
                }
            }
            other => Err(ChartError::Validation(format!(
                "expected a number or string, got `{other}`"
            ))),
        }
    }

    fn numeric_key(&self) -> Option<OrderedFloat<f64>> {
        self.as_f64().map(OrderedFloat)
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::auto()
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Text(_), _) | (_, Self::Text(_)) => false,
            _ => self.numeric_key() == other.numeric_key(),
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Text(text) => {
                0_u8.hash(state);
                text.hash(state);
            }
            _ => {
                1_u8.hash(state);
                self.numeric_key().hash(state);
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
