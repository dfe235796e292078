//! Error types for the patch crate.

use std::path::PathBuf;

/// Errors that can occur while reading or normalizing patches.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// A change-set could not be normalized; the whole run must stop.
    #[error("malformed change-set {id}: {reason}")]
    MalformedInput {
        /// Identifier of the offending change-set (or its file name when the
        /// identifier itself could not be read).
        id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Reading a patch file or directory failed.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PatchError {
    pub(crate) fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for patch results.
pub type PatchResult<T> = Result<T, PatchError>;
