use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a change-set as reported by the source provider.
///
/// Usually a commit hash, but the matching engine treats it as opaque: two
/// identifiers are the same only when their strings are equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSetId(String);

impl ChangeSetId {
    /// Wrap a provider-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for reports (first 7 characters, like `git log --oneline`).
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(7) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Debug for ChangeSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChangeSetId({})", self.short())
    }
}

impl fmt::Display for ChangeSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChangeSetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ChangeSetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Content-addressed identifier of a normalized change-set.
///
/// A `ContentId` is the BLAKE3 hash of the canonical line sequence. Identical
/// canonical lines always produce the same `ContentId`, which makes it a cheap
/// bucket key when looking for exact duplicates across two series.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId([u8; 32]);

impl ContentId {
    /// Hash a canonical line sequence.
    ///
    /// Lines are fed to the hasher separated by `\n`, so `["a", "b"]` and
    /// `["a\nb"]` hash identically. Canonical lines never contain newlines.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                hasher.update(b"\n");
            }
            hasher.update(line.as_ref().as_bytes());
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.short_hex())
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
