//! Multi-criteria decision scoring: per-column max normalization, weighted
//! sum, stable descending rank.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coerce::coerce_cell;
use crate::error::{ComputeError, ComputeResult};
use crate::types::{Record, Value};

/// Field name added to each output record.
pub const TOTAL_SCORE_FIELD: &str = "totalScore";

/// Configuration for a decision-scoring computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionConfig {
    /// Columns included in the score, in evaluation order. The caller
    /// asserts these are numeric across the whole dataset; the scorer
    /// verifies and fails fast on the first cell that does not coerce.
    pub numeric_cols: Vec<String>,
    /// Per-column weights. A column absent from the map weighs `1.0`.
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

impl DecisionConfig {
    fn weight(&self, column: &str) -> f64 {
        self.weights.get(column).copied().unwrap_or(1.0)
    }
}

/// Score and rank records.
///
/// For each declared column, every record's cell is coerced and the column
/// maximum computed; a record's contribution for that column is
/// `(value / max) * weight`, or `0.0` when the column max is zero. The
/// output is the input records with a `totalScore` field added, stably
/// sorted by score descending (equal scores keep input order).
///
/// A cell that is absent or fails coercion in a declared column is an
/// error ([`ComputeError::NonNumericColumn`]); scores are therefore always
/// finite when the input values are.
pub fn decide(records: &[Record], config: &DecisionConfig) -> ComputeResult<Vec<Record>> {
    let mut totals = vec![0.0_f64; records.len()];

    for column in &config.numeric_cols {
        let values = coerce_column(records, column)?;
        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let weight = config.weight(column);

        for (total, value) in totals.iter_mut().zip(&values) {
            let normalized = if max != 0.0 { value / max } else { 0.0 };
            *total += normalized * weight;
        }
    }

    let mut scored: Vec<Record> = records
        .iter()
        .zip(&totals)
        .map(|(record, total)| {
            let mut out = record.clone();
            out.insert(TOTAL_SCORE_FIELD.to_string(), Value::Number(*total));
            out
        })
        .collect();

    // Stable sort keeps the input order of equal scores.
    scored.sort_by(|a, b| {
        let sa = score_of(a);
        let sb = score_of(b);
        sb.total_cmp(&sa)
    });

    Ok(scored)
}

fn coerce_column(records: &[Record], column: &str) -> ComputeResult<Vec<f64>> {
    if !records.is_empty() && records.iter().all(|r| !r.contains_key(column)) {
        return Err(ComputeError::MissingColumn {
            column: column.to_string(),
        });
    }

    records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            coerce_cell(record.get(column)).ok_or_else(|| ComputeError::NonNumericColumn {
                column: column.to_string(),
                row,
            })
        })
        .collect()
}

fn score_of(record: &Record) -> f64 {
    match record.get(TOTAL_SCORE_FIELD) {
        Some(Value::Number(n)) => *n,
        _ => 0.0,
    }
}
