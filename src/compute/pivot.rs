//! Pivot aggregation: cross-tabulate one value column by two categorical
//! columns, summing coerced values into a two-dimensional table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::coerce::coerce_cell;
use crate::types::{Record, Value};

/// Label substituted when a record's row/column cell is absent or null.
///
/// Pinned so that missing categorical keys never depend on ambient
/// stringification rules.
pub const MISSING_KEY_LABEL: &str = "(missing)";

/// Configuration for a pivot computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotConfig {
    /// Column whose distinct values become table rows.
    pub row_field: String,
    /// Column whose distinct values become table columns.
    pub col_field: String,
    /// Column whose coerced numeric values are summed per cell.
    pub value_field: String,
}

/// Result of a pivot computation.
///
/// `table[row][col]` holds the sum of coerced values for that intersection.
/// `row_keys`/`col_keys` list distinct labels in first-occurrence order
/// (not sorted); only intersections that actually occur have entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotResult {
    pub table: HashMap<String, HashMap<String, f64>>,
    pub row_keys: Vec<String>,
    pub col_keys: Vec<String>,
}

/// Cross-tabulate `value_field` by (`row_field`, `col_field`).
///
/// Single pass, O(n) in the number of records. A value cell that is absent
/// or fails numeric coercion contributes `0.0` to its cell; a missing row
/// or column cell is keyed under [`MISSING_KEY_LABEL`].
pub fn pivot(records: &[Record], config: &PivotConfig) -> PivotResult {
    let mut table: HashMap<String, HashMap<String, f64>> = HashMap::new();
    let mut row_keys: Vec<String> = Vec::new();
    let mut col_keys: Vec<String> = Vec::new();

    for record in records {
        let row_key = key_label(record.get(&config.row_field));
        let col_key = key_label(record.get(&config.col_field));
        let value = coerce_cell(record.get(&config.value_field)).unwrap_or(0.0);

        if !row_keys.contains(&row_key) {
            row_keys.push(row_key.clone());
        }
        if !col_keys.contains(&col_key) {
            col_keys.push(col_key.clone());
        }

        *table
            .entry(row_key)
            .or_default()
            .entry(col_key)
            .or_insert(0.0) += value;
    }

    PivotResult {
        table,
        row_keys,
        col_keys,
    }
}

fn key_label(cell: Option<&Value>) -> String {
    cell.and_then(Value::label)
        .unwrap_or_else(|| MISSING_KEY_LABEL.to_string())
}
