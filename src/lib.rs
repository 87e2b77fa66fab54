//! `tabular-compute` is the computation core behind an interactive tabular
//! data explorer: load records, then pivot, score, filter/sort, and
//! summarize them, with every computation runnable off the caller's thread.
//!
//! The crate starts at typed values and ends at typed (or JSON) results.
//! File ingestion, chart rendering, localization, and layout are external
//! collaborators: ingestion feeds a [`types::Dataset`] in, presentation
//! consumes results out.
//!
//! ## The four computations
//!
//! - [`compute::pivot`]: cross-tabulate one value column by two categorical
//!   columns (sum aggregation, first-occurrence key order)
//! - [`compute::decide`]: max-normalized weighted multi-criteria score per
//!   record, ranked descending
//! - [`compute::sort_filter`]: case-insensitive substring filter, then
//!   stable comparator sort
//! - [`compute::stats`]: mean/median/population-stddev/min/max per column
//!
//! All four are pure functions of `(input, config)`. Numeric coercion is
//! one explicit, documented function ([`coerce::coerce_number`]) rather
//! than ambient conversion rules.
//!
//! ## Quick example: call an algorithm directly
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
//! assert_eq!(out.table["East"]["X"], 5.0);
//! ```
//!
//! ## Quick example: dispatch over the JSON boundary
//!
//! The dispatcher accepts the worker-message request shape
//! (`{ operation, dataset, config }`) and answers with
//! `{ operation, result }` or `{ error }`. Requests are copied in and
//! results copied out; in [`dispatch::ExecutionMode::Parallel`] (the
//! default) the work runs on an isolated thread pool, and
//! [`dispatch::ExecutionMode::Synchronous`] runs it in place with the same
//! contract.
//!
//! ```rust
//! use serde_json::json;
//! use tabular_compute::dispatch::Dispatcher;
//!
//! let dispatcher = Dispatcher::default();
//! let response = dispatcher.handle_value(json!({
//!     "operation": "stats",
//!     "dataset": {"score": [1, 2, 3, 4]},
//! }));
//! assert_eq!(response["result"]["score"]["mean"], 2.5);
//!
//! let response = dispatcher.handle_value(json!({
//!     "operation": "bogus", "dataset": [], "config": {}
//! }));
//! assert_eq!(response["error"], "Unknown computation type");
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the [`types::Value`]/[`types::Record`]/[`types::Dataset`]
//!   data model
//! - [`coerce`]: the pinned numeric-coercion policy
//! - [`compute`]: the four algorithms and their configs/results
//! - [`dispatch`]: typed requests, the [`dispatch::Dispatcher`], and its
//!   observer/metrics hooks
//! - [`error`]: error types used across the core

pub mod coerce;
pub mod compute;
pub mod dispatch;
pub mod error;
pub mod types;

pub use error::{ComputeError, ComputeResult};
