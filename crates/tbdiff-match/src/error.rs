//! Error types for the matching engine.

use tbdiff_patch::PatchError;
use tbdiff_types::TypeError;

/// Errors that can occur while matching two series.
///
/// None of these are transient: the engine does no I/O, so every failure is
/// reported to the caller as-is and never retried.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// A change-set could not be normalized.
    #[error(transparent)]
    MalformedInput(#[from] PatchError),

    /// A caller-side contract was broken (non-square matrix, duplicate ids).
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// The matching configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<TypeError> for MatchError {
    fn from(err: TypeError) -> Self {
        MatchError::PreconditionViolation(err.to_string())
    }
}

/// Convenience alias for matching results.
pub type MatchResult<T> = Result<T, MatchError>;
