//! Core data model types for the computation core.
//!
//! This crate operates on an in-memory [`Dataset`]: an ordered sequence of
//! [`Record`]s, each a mapping from column name to a loosely typed [`Value`].
//! The column set is implicitly the key set of the first record; nothing
//! enforces that every record carries identical keys, but the algorithms
//! assume it and treat an absent key like [`Value::Null`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single cell value in a [`Record`].
///
/// The untagged serde representation maps JSON `null`/bool/number/string
/// directly onto the four variants, matching the wire contract of the
/// compute request messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Numeric value. All numbers are carried as 64-bit floats.
    Number(f64),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Display label used for pivot keys, filter matching, and string
    /// comparison in sorting.
    ///
    /// Returns `None` for [`Value::Null`]; callers decide whether that means
    /// a sentinel label (pivot) or "never matches" (filter). Integral finite
    /// numbers print without a fractional part (`5`, not `5.0`).
    pub fn label(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            Value::Utf8(s) => Some(s.clone()),
        }
    }

    /// Returns `true` if this value is numeric ([`Value::Number`]).
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Utf8(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Utf8(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// One row of tabular input: column name → cell value.
///
/// A `BTreeMap` keeps serialization deterministic, which the idempotence
/// guarantee of the sort/filter processor relies on.
pub type Record = BTreeMap<String, Value>;

/// Ordered sequence of [`Record`]s.
///
/// Order is semantically relevant only for the sort/filter processor's
/// stability guarantee and the pivot aggregator's first-occurrence key
/// ordering.
pub type Dataset = Vec<Record>;

/// Column-sliced input for the statistics calculator: column name → the
/// ordered values of that column.
pub type StatsInput = BTreeMap<String, Vec<Value>>;

/// Build a [`Record`] from `(column, value)` pairs.
///
/// Convenience for tests and examples.
pub fn record<I, K, V>(cells: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    cells
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
