//! Descriptive statistics per numeric column.
//!
//! Input arrives already column-sliced (column name → ordered values); the
//! caller owns slicing the dataset. Values that fail numeric coercion are
//! discarded before computing; a column with no surviving values yields an
//! all-zero [`ColumnStats`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coerce::coerce_number;
use crate::types::StatsInput;

/// Descriptive statistics for one column.
///
/// `std_dev` is the population standard deviation (divisor n, not n−1);
/// this is a fixed numeric-semantics decision of the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    fn zero() -> Self {
        Self {
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }
}

/// Mapping from column name to its [`ColumnStats`].
pub type StatsResult = BTreeMap<String, ColumnStats>;

/// Compute per-column statistics for every column in `input`.
///
/// An empty input yields an empty result map.
pub fn stats(input: &StatsInput) -> StatsResult {
    input
        .iter()
        .map(|(column, values)| {
            let numbers: Vec<f64> = values
                .iter()
                .filter_map(coerce_number)
                .filter(|n| n.is_finite())
                .collect();
            (column.clone(), column_stats(&numbers))
        })
        .collect()
}

fn column_stats(numbers: &[f64]) -> ColumnStats {
    if numbers.is_empty() {
        return ColumnStats::zero();
    }

    let n = numbers.len() as f64;
    let mean = numbers.iter().sum::<f64>() / n;

    let mut sorted = numbers.to_vec();
    sorted.sort_by(f64::total_cmp);
    let middle = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    };

    let variance = numbers
        .iter()
        .map(|x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    ColumnStats {
        mean,
        median,
        std_dev,
        min,
        max,
    }
}
