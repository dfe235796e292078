//! Match records handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// The outcome for one change-set (or one pair) of the two series.
///
/// Indices always refer to positions in the original, uncompressed series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchRecord {
    /// `left` in the old series corresponds to `right` in the new one.
    Paired {
        left: usize,
        right: usize,
        /// `None` when interdiff bodies were not requested.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interdiff: Option<Interdiff>,
    },
    /// Present only in the old series.
    LeftOnly { left: usize },
    /// Present only in the new series.
    RightOnly { right: usize },
}

impl MatchRecord {
    /// Left-side index, if this record has one.
    pub fn left(&self) -> Option<usize> {
        match self {
            MatchRecord::Paired { left, .. } | MatchRecord::LeftOnly { left } => Some(*left),
            MatchRecord::RightOnly { .. } => None,
        }
    }

    /// Right-side index, if this record has one.
    pub fn right(&self) -> Option<usize> {
        match self {
            MatchRecord::Paired { right, .. } | MatchRecord::RightOnly { right } => Some(*right),
            MatchRecord::LeftOnly { .. } => None,
        }
    }

    /// Returns `true` for `Paired` records.
    pub fn is_paired(&self) -> bool {
        matches!(self, MatchRecord::Paired { .. })
    }
}

/// How a change-set itself was modified between two series.
///
/// This is the unified diff of the two canonical forms without its
/// `---`/`+++` file header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interdiff {
    /// The diff hunks.
    pub hunks: Vec<DiffHunk>,
}

impl Interdiff {
    /// Returns `true` if the two change-sets are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }
}

/// A contiguous region of changes in an interdiff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    /// Line number in the old canonical form where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of lines from the old canonical form in this hunk.
    pub old_count: usize,
    /// Line number in the new canonical form where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of lines from the new canonical form in this hunk.
    pub new_count: usize,
    /// The individual diff lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// The `@@ -a,b +c,d @@` header of this hunk.
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            range(self.old_start, self.old_count),
            range(self.new_start, self.new_count)
        )
    }
}

// Unified diff convention: an empty range names the line before it.
fn range(start: usize, count: usize) -> String {
    match count {
        0 => format!("{},0", start.saturating_sub(1)),
        1 => start.to_string(),
        n => format!("{start},{n}"),
    }
}

/// A single line in an interdiff hunk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "text", rename_all = "snake_case")]
pub enum DiffLine {
    /// A line present in both canonical forms (context).
    Context(String),
    /// A line only in the new canonical form.
    Added(String),
    /// A line only in the old canonical form.
    Removed(String),
}

impl DiffLine {
    /// The line prefixed with its unified-diff marker.
    pub fn to_unified(&self) -> String {
        match self {
            DiffLine::Context(s) => format!(" {s}"),
            DiffLine::Added(s) => format!("+{s}"),
            DiffLine::Removed(s) => format!("-{s}"),
        }
    }
}
