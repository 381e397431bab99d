//! Component attribute mapping
//!
//! Callers describe a component as a flat mapping of named scalars. The
//! calculators read the keys they need and return a fresh mapping with their
//! results merged in; the input is never mutated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::error::{ReliabilityError, Result};

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl AttributeValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Text(_) | AttributeValue::Null => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(x) => write!(f, "{:?}", x),
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::Null => write!(f, "~"),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        AttributeValue::Integer(i64::from(value))
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

/// Ordered mapping of attribute name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and request assembly
    pub fn with(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<AttributeValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }

    /// Required real number; absent keys are a `MissingKey` fault
    pub fn get_f64(&self, key: &str) -> Result<f64> {
        let value = self
            .get(key)
            .ok_or_else(|| ReliabilityError::missing_key(key))?;
        match value.as_f64() {
            Some(x) if !x.is_nan() => Ok(x),
            _ => Err(ReliabilityError::type_mismatch(key, "a real number")),
        }
    }

    /// Optional real number, falling back to `default` when absent
    pub fn get_f64_or(&self, key: &str, default: f64) -> Result<f64> {
        if self.contains_key(key) {
            self.get_f64(key)
        } else {
            Ok(default)
        }
    }

    /// Required 1-based identifier
    ///
    /// Integral floats (e.g. `3.0` from a spreadsheet export) are accepted.
    /// Negative or fractional values are rejected with `TypeMismatch`; the
    /// range check against a concrete table happens at lookup time.
    pub fn get_id(&self, key: &str) -> Result<u32> {
        let value = self
            .get(key)
            .ok_or_else(|| ReliabilityError::missing_key(key))?;
        let expected = "a non-negative integer ID";
        match value {
            AttributeValue::Integer(i) => {
                u32::try_from(*i).map_err(|_| ReliabilityError::type_mismatch(key, expected))
            }
            AttributeValue::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX) => {
                Ok(*f as u32)
            }
            _ => Err(ReliabilityError::type_mismatch(key, expected)),
        }
    }

    /// Operating stress ratio or ambient value fed to a derating check
    ///
    /// Ratios must be non-negative real numbers. Anything else, including an
    /// absent key, is a `TypeMismatch`.
    pub fn get_ratio(&self, key: &str) -> Result<f64> {
        let expected = "a non-negative number";
        match self.get(key).and_then(AttributeValue::as_f64) {
            Some(x) if x >= 0.0 => Ok(x),
            _ => Err(ReliabilityError::type_mismatch(key, expected)),
        }
    }
}
