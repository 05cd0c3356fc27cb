// error.rs — Error types for the agent mutation bridge.
//
// Every recoverable condition is a typed variant whose Display text is the
// explanatory status reported back into the conversational context. None
// of these terminate the session; the worst outcome is one rejected
// mutation.

use thiserror::Error;

/// Why a proposed mutation was rejected.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// An objective payload arrived without a summary.
    #[error("objective summary must not be empty")]
    EmptyObjectiveSummary,

    /// A key result entry arrived without a summary.
    #[error("key result summary must not be empty")]
    EmptyKeyResultSummary,

    /// Update/delete/commit payloads must name their target objective.
    #[error("this operation requires an objective id")]
    MissingObjectiveId,

    /// A numeric field was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteNumber { field: String },

    /// Two key results in one payload share an id.
    #[error("duplicate key result id: {0}")]
    DuplicateKeyResultId(String),

    /// The target objective does not exist. Distinct from a validation
    /// failure: the payload was well-formed but named an unknown entity.
    #[error("objective not found: {0}")]
    ObjectiveNotFound(String),

    /// Confirm/cancel arrived without a prior commit confirmation request.
    #[error("no pending commit confirmation for objective: {0}")]
    NoPendingCommit(String),

    /// The request line could not be parsed against the payload schema.
    #[error("malformed mutation payload: {0}")]
    MalformedPayload(String),
}
