//! Numeric values accepted by the converter
//!
//! A value is a single number or an arbitrarily nested list of numbers.
//! Conversion maps every scalar and keeps the nesting intact.

use serde::{Deserialize, Serialize};

/// Scalar or nested array of reals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Array(Vec<Value>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            Value::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            Value::Scalar(_) => None,
        }
    }

    /// Apply `f` to every scalar, preserving order and shape
    pub fn map<F>(&self, f: F) -> Value
    where
        F: Fn(f64) -> f64 + Copy,
    {
        match self {
            Value::Scalar(x) => Value::Scalar(f(*x)),
            Value::Array(items) => Value::Array(items.iter().map(|v| v.map(f)).collect()),
        }
    }

    /// Number of scalars contained
    pub fn len(&self) -> usize {
        match self {
            Value::Scalar(_) => 1,
            Value::Array(items) => items.iter().map(Value::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nesting depth: 0 for a scalar, 1 for a flat list
    pub fn depth(&self) -> usize {
        match self {
            Value::Scalar(_) => 0,
            Value::Array(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
        }
    }

    /// All scalars in order
    pub fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len());
        self.collect_into(&mut out);
        out
    }

    fn collect_into(&self, out: &mut Vec<f64>) {
        match self {
            Value::Scalar(x) => out.push(*x),
            Value::Array(items) => items.iter().for_each(|v| v.collect_into(out)),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(x)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}
