//! The four tabular computations.
//!
//! Each algorithm is a pure function of `(input, config)`: no hidden state
//! is consulted or mutated, and every one is O(n) or O(n·k) in dataset size
//! n and column count k. Numeric semantics are funneled through
//! [`crate::coerce::coerce_number`].
//!
//! Currently implemented:
//!
//! - [`pivot()`]: sum cross-tabulation of a value column by two
//!   categorical columns
//! - [`decide()`]: max-normalized weighted multi-criteria scoring and
//!   stable descending rank
//! - [`sort_filter()`]: case-insensitive substring filter, then stable
//!   comparator sort
//! - [`stats()`]: per-column mean/median/population-stddev/min/max
//!
//! ## Example: pivot a small dataset
//!
//! ```rust
//! use tabular_compute::compute::{pivot, PivotConfig};
//! use tabular_compute::types::record;
//!
//! let ds = vec![
//!     record([("region", "East"), ("product", "X"), ("amount", "2")]),
//!     record([("region", "East"), ("product", "X"), ("amount", "3")]),
//!     record([("region", "West"), ("product", "Y"), ("amount", "5")]),
//! ];
//! let out = pivot(&ds, &PivotConfig {
//!     row_field: "region".into(),
//!     col_field: "product".into(),
//!     value_field: "amount".into(),
//! });
//!
//! assert_eq!(out.row_keys, vec!["East", "West"]);
//! assert_eq!(out.table["East"]["X"], 5.0);
//! ```

pub mod decision;
pub mod pivot;
pub mod sort_filter;
pub mod stats;

pub use decision::{DecisionConfig, TOTAL_SCORE_FIELD, decide};
pub use pivot::{MISSING_KEY_LABEL, PivotConfig, PivotResult, pivot};
pub use sort_filter::{SortDirection, SortFilterConfig, SortSpec, sort_filter};
pub use stats::{ColumnStats, StatsResult, stats};
