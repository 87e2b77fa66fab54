//! Typed request/response model for the compute dispatcher.
//!
//! Requests are a tagged union over the four operations, so an unknown
//! operation is unreachable once a request has been decoded; the JSON
//! boundary ([`parse_request`]) rejects unrecognized tags with the fixed
//! wire-contract error before deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::compute::{
    DecisionConfig, PivotConfig, PivotResult, SortFilterConfig, StatsResult, decide, pivot,
    sort_filter, stats,
};
use crate::error::ComputeError;
use crate::types::{Dataset, Record, StatsInput};

/// The four compute operations, by wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "pivot")]
    Pivot,
    #[serde(rename = "decision")]
    Decision,
    #[serde(rename = "sortFilter")]
    SortFilter,
    #[serde(rename = "stats")]
    Stats,
}

impl Operation {
    /// The wire tag for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Pivot => "pivot",
            Operation::Decision => "decision",
            Operation::SortFilter => "sortFilter",
            Operation::Stats => "stats",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete compute request: operation tag, dataset, and config.
///
/// Each request owns its data; dispatching moves the request into the
/// execution context (copy-in), and the response is an independent value
/// (copy-out). Nothing is shared by reference with the caller's live state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation")]
pub enum ComputeRequest {
    #[serde(rename = "pivot")]
    Pivot {
        dataset: Dataset,
        config: PivotConfig,
    },
    #[serde(rename = "decision")]
    Decision {
        dataset: Dataset,
        config: DecisionConfig,
    },
    #[serde(rename = "sortFilter")]
    SortFilter {
        dataset: Dataset,
        config: SortFilterConfig,
    },
    /// Statistics input arrives already column-sliced and takes no config.
    #[serde(rename = "stats")]
    Stats { dataset: StatsInput },
}

impl ComputeRequest {
    /// The operation this request carries.
    pub fn operation(&self) -> Operation {
        match self {
            ComputeRequest::Pivot { .. } => Operation::Pivot,
            ComputeRequest::Decision { .. } => Operation::Decision,
            ComputeRequest::SortFilter { .. } => Operation::SortFilter,
            ComputeRequest::Stats { .. } => Operation::Stats,
        }
    }
}

/// Result payload of a successful computation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ComputeOutput {
    Pivot(PivotResult),
    Decision(Vec<Record>),
    SortFilter(Vec<Record>),
    Stats(StatsResult),
}

/// Response message: success carries the operation tag and result, failure
/// carries only an error string.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ComputeResponse {
    Success {
        operation: Operation,
        result: ComputeOutput,
    },
    Failure {
        error: String,
    },
}

impl ComputeResponse {
    /// Build a failure response from anything displayable.
    pub fn failure(error: impl fmt::Display) -> Self {
        ComputeResponse::Failure {
            error: error.to_string(),
        }
    }

    /// Returns `true` for [`ComputeResponse::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, ComputeResponse::Success { .. })
    }
}

const KNOWN_OPERATIONS: [&str; 4] = ["pivot", "decision", "sortFilter", "stats"];

/// Decode a wire-shaped JSON request into a typed [`ComputeRequest`].
///
/// A missing or unrecognized `operation` tag is
/// [`ComputeError::UnknownOperation`] (the fixed wire message); any other
/// decode problem is [`ComputeError::InvalidRequest`].
pub fn parse_request(value: JsonValue) -> Result<ComputeRequest, ComputeError> {
    let tag = value
        .get("operation")
        .and_then(JsonValue::as_str)
        .ok_or(ComputeError::UnknownOperation)?;
    if !KNOWN_OPERATIONS.contains(&tag) {
        return Err(ComputeError::UnknownOperation);
    }

    serde_json::from_value(value).map_err(|e| ComputeError::InvalidRequest {
        message: e.to_string(),
    })
}

/// Run the algorithm a request names and fold any [`ComputeError`] into a
/// [`ComputeResponse::Failure`].
///
/// This is the single execution path shared by the parallel and synchronous
/// dispatch modes; panics are caught one level up, at the dispatcher.
pub(crate) fn execute(request: ComputeRequest) -> ComputeResponse {
    let operation = request.operation();
    let outcome = match request {
        ComputeRequest::Pivot { dataset, config } => {
            Ok(ComputeOutput::Pivot(pivot(&dataset, &config)))
        }
        ComputeRequest::Decision { dataset, config } => {
            decide(&dataset, &config).map(ComputeOutput::Decision)
        }
        ComputeRequest::SortFilter { dataset, config } => {
            Ok(ComputeOutput::SortFilter(sort_filter(&dataset, &config)))
        }
        ComputeRequest::Stats { dataset } => Ok(ComputeOutput::Stats(stats(&dataset))),
    };

    match outcome {
        Ok(result) => ComputeResponse::Success { operation, result },
        Err(e) => ComputeResponse::failure(e),
    }
}
