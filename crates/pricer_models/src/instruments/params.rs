//! Loosely typed leg parameters.
//!
//! Requests arrive as an open JSON map (`strike`, `time_to_expiry`,
//! `barrier_level`, `steps`, `seed`, ...). Numbers may be sent as JSON
//! numbers or numeric strings; string keys are trimmed and lower-cased.
//! `null` is treated as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::InstrumentError;

/// Open map of instrument-specific fields with coercing accessors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::LegParams;
/// use serde_json::json;
///
/// let params = LegParams::from_value(json!({"strike": "105", "steps": 250.0})).unwrap();
/// assert_eq!(params.require_f64("strike").unwrap(), 105.0);
/// assert_eq!(params.count_or("steps", 200, 1, 10_000).unwrap(), 250);
/// assert_eq!(params.f64_or("payout", 1.0).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegParams(Map<String, Value>);

impl LegParams {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a JSON object. Any other JSON value is rejected.
    pub fn from_value(value: Value) -> Result<Self, InstrumentError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(InstrumentError::invalid(
                "params",
                format!("expected an object, got {}", other),
            )),
        }
    }

    /// Sets a field, returning `self` for chaining.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Sets a field in place.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the value for `key`, treating `null` as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Reads a finite float, falling back to `default` when absent.
    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64, InstrumentError> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => coerce_f64(key, v),
        }
    }

    /// Reads a finite float that must be present.
    pub fn require_f64(&self, key: &str) -> Result<f64, InstrumentError> {
        match self.get(key) {
            None => Err(InstrumentError::invalid(key, "is required")),
            Some(v) => coerce_f64(key, v),
        }
    }

    /// Reads an integer count within `[min, max]`, falling back to `default`.
    ///
    /// Floats are accepted only when integral (`250.0`).
    pub fn count_or(&self, key: &str, default: usize, min: usize, max: usize) -> Result<usize, InstrumentError> {
        let value = match self.get(key) {
            None => default as i128,
            Some(v) => coerce_integer(key, v)?,
        };
        if value < min as i128 || value > max as i128 {
            return Err(InstrumentError::OutOfRange {
                key: key.to_string(),
                value,
                min,
                max,
            });
        }
        Ok(value as usize)
    }

    /// Reads a non-negative integer RNG seed, falling back to `default`.
    pub fn seed_or(&self, key: &str, default: u64) -> Result<u64, InstrumentError> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => {
                let value = coerce_integer(key, v)?;
                u64::try_from(value).map_err(|_| {
                    InstrumentError::invalid(key, format!("must be a non-negative integer (got {})", value))
                })
            }
        }
    }

    /// Reads a string key, trimmed and lower-cased, falling back to `default`.
    pub fn key_or(&self, key: &str, default: &str) -> Result<String, InstrumentError> {
        match self.get(key) {
            None => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s.trim().to_lowercase()),
            Some(other) => Err(InstrumentError::invalid(key, format!("expected a string, got {}", other))),
        }
    }
}

impl From<Map<String, Value>> for LegParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn coerce_f64(key: &str, value: &Value) -> Result<f64, InstrumentError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(x) if x.is_finite() => Ok(x),
        _ => Err(InstrumentError::invalid(key, format!("expected a finite number, got {}", value))),
    }
}

fn coerce_integer(key: &str, value: &Value) -> Result<i128, InstrumentError> {
    if let Value::Number(n) = value {
        if let Some(i) = n.as_i64() {
            return Ok(i as i128);
        }
        if let Some(u) = n.as_u64() {
            return Ok(u as i128);
        }
    }
    if let Value::String(s) = value {
        if let Ok(i) = s.trim().parse::<i64>() {
            return Ok(i as i128);
        }
    }
    let x = coerce_f64(key, value)?;
    if x.fract() == 0.0 && x.abs() < 9.0e15 {
        Ok(x as i128)
    } else {
        Err(InstrumentError::invalid(key, format!("expected an integer, got {}", value)))
    }
}
