//! Bound parameters.
//!
//! Every request-supplied value reaches the data store through this module:
//! [`Params::bind`] records the value and hands back an [`Expr::Param`] slot
//! that renders as the dialect's placeholder.

use serde::Serialize;

use super::expr::Expr;

/// A value bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Null,
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Integer(n)
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Text(s) => write!(f, "{s:?}"),
            ParamValue::Integer(n) => write!(f, "{n}"),
            ParamValue::Null => write!(f, "NULL"),
        }
    }
}

/// Ordered parameter list; slot `n` is `values[n - 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: Vec<ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value and return the placeholder expression for it.
    pub fn bind(&mut self, value: impl Into<ParamValue>) -> Expr {
        self.values.push(value.into());
        Expr::Param(self.values.len())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<ParamValue> {
        self.values
    }
}
