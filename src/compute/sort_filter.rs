//! Substring filtering and comparator sorting over a record sequence.
//!
//! Composition order is fixed: filter first, then sort. The sort is stable,
//! so with no sort key the filtered subset keeps dataset order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{Record, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

/// Sort key and direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column to sort by. `None` leaves the filtered order untouched.
    #[serde(default)]
    pub key: Option<String>,
    /// Comparator sign; ignored when `key` is `None`.
    #[serde(default)]
    pub direction: SortDirection,
}

/// Configuration for a sort/filter computation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortFilterConfig {
    /// Case-insensitive substring to match. `None` or empty retains all.
    #[serde(default)]
    pub filter: Option<String>,
    /// Sort key and direction.
    #[serde(default)]
    pub sort_config: SortSpec,
    /// Columns eligible for filter matching, in order.
    #[serde(default)]
    pub columns: Vec<String>,
}

/// Filter then sort `records` according to `config`.
///
/// A record passes the filter when any of `config.columns`' cells has a
/// label containing the filter as a case-insensitive substring; null/absent
/// cells have no label and never match. Sorting compares the sort-key cells
/// numerically when both are numbers, otherwise by their labels
/// (code-point order; absent/null labels compare as empty strings).
pub fn sort_filter(records: &[Record], config: &SortFilterConfig) -> Vec<Record> {
    let mut out: Vec<Record> = match config.filter.as_deref() {
        Some(filter) if !filter.is_empty() => {
            let needle = filter.to_lowercase();
            records
                .iter()
                .filter(|record| matches_any_column(record, &config.columns, &needle))
                .cloned()
                .collect()
        }
        _ => records.to_vec(),
    };

    if let Some(key) = config.sort_config.key.as_deref() {
        let direction = config.sort_config.direction;
        out.sort_by(|a, b| {
            let ord = compare_cells(a.get(key), b.get(key));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    out
}

fn matches_any_column(record: &Record, columns: &[String], needle: &str) -> bool {
    columns.iter().any(|column| {
        record
            .get(column)
            .and_then(Value::label)
            .is_some_and(|label| label.to_lowercase().contains(needle))
    })
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(Value::Number(x)), Some(Value::Number(y))) = (a, b) {
        return x.total_cmp(y);
    }
    let la = a.and_then(Value::label).unwrap_or_default();
    let lb = b.and_then(Value::label).unwrap_or_default();
    la.cmp(&lb)
}
