use thiserror::Error;

/// Convenience result type for compute operations.
pub type ComputeResult<T> = Result<T, ComputeError>;

/// Error type returned by the computation core.
///
/// Every failure that crosses the dispatcher boundary is one of these; the
/// dispatcher converts it (or a caught panic) into a structured `{ error }`
/// response rather than propagating a fault to the caller.
#[derive(Debug, Error)]
pub enum ComputeError {
    /// The request carried an operation tag outside the four known
    /// computations. The message text is part of the wire contract.
    #[error("Unknown computation type")]
    UnknownOperation,

    /// The request message could not be decoded into a typed request.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// A column declared in the config never appears in the dataset.
    #[error("column '{column}' does not exist in the dataset")]
    MissingColumn { column: String },

    /// A column declared numeric for decision scoring contains a value that
    /// does not coerce to a number. Row index is zero-based dataset order.
    #[error("column '{column}' declared numeric but row {row} has a non-numeric value")]
    NonNumericColumn { column: String, row: usize },
}
