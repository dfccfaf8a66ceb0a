//! Error types for the parking engine.

use thiserror::Error;

use crate::domain::request::{LifecycleOp, RequestId, RequestState};
use crate::domain::zone::ZoneId;

/// Result type alias using the parkade error type.
pub type Result<T> = std::result::Result<T, ParkadeError>;

/// Main error type for the parking engine.
///
/// Every error is returned synchronously and leaves the engine exactly as it was
/// before the failed call.
#[derive(Error, Debug)]
pub enum ParkadeError {
    /// Malformed caller input (empty vehicle id, unknown zone, negative time, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Request not found
    #[error("Request not found: {0}")]
    RequestNotFound(RequestId),

    /// Zone not found
    #[error("Zone not found: {0}")]
    ZoneNotFound(ZoneId),

    /// Operation is not valid for the request's current lifecycle state
    #[error("Illegal transition: request {id} is in state '{state}', cannot {op}")]
    IllegalTransition {
        id: RequestId,
        state: RequestState,
        op: LifecycleOp,
    },

    /// No zone had spare capacity for the request
    #[error("No capacity available in any zone for request {0}")]
    NoCapacity(RequestId),

    /// A zone-level guard was violated (e.g. occupying a full zone)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse error classification exposed to callers that only care about the kind
/// of failure, not its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    IllegalTransition,
    NoCapacity,
    InvalidState,
    Internal,
}

impl ParkadeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParkadeError::InvalidArgument(_) | ParkadeError::Serialization(_) => {
                ErrorKind::InvalidArgument
            }
            ParkadeError::RequestNotFound(_) | ParkadeError::ZoneNotFound(_) => {
                ErrorKind::NotFound
            }
            ParkadeError::IllegalTransition { .. } => ErrorKind::IllegalTransition,
            ParkadeError::NoCapacity(_) => ErrorKind::NoCapacity,
            ParkadeError::InvalidState(_) => ErrorKind::InvalidState,
            ParkadeError::Other(_) => ErrorKind::Internal,
        }
    }

    /// Low-cardinality label used for rejection metrics.
    pub(crate) fn metric_label(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::IllegalTransition => "illegal_transition",
            ErrorKind::NoCapacity => "no_capacity",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::Internal => "internal",
        }
    }
}
