use thiserror::Error;

use crate::id::ChangeSetId;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A series listed the same change-set identifier twice.
    #[error("duplicate change-set identifier {id} at positions {first} and {second}")]
    DuplicateIdentifier {
        id: ChangeSetId,
        first: usize,
        second: usize,
    },
}
