//! Normalized change-sets and the series that order them.

use std::collections::HashMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::{ChangeSetId, ContentId};

/// One revision unit (a commit) in canonical, comparable form.
///
/// The line sequence is produced by the normalizer and never changes
/// afterwards; `content` is derived from it at construction time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Provider-supplied identifier.
    pub id: ChangeSetId,
    /// Mail subject without its `[PATCH ...]` tag, for display only.
    pub subject: String,
    lines: Vec<String>,
    content: ContentId,
}

impl ChangeSet {
    /// Build a change-set from already-canonical lines.
    pub fn new(
        id: impl Into<ChangeSetId>,
        subject: impl Into<String>,
        lines: Vec<String>,
    ) -> Self {
        let content = ContentId::from_lines(&lines);
        Self {
            id: id.into(),
            subject: subject.into(),
            lines,
            content,
        }
    }

    /// The canonical line sequence.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Hash of the canonical line sequence.
    pub fn content_id(&self) -> ContentId {
        self.content
    }

    /// Number of canonical lines.
    pub fn size(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if both change-sets have the same canonical lines.
    pub fn same_content(&self, other: &ChangeSet) -> bool {
        self.content == other.content && self.lines == other.lines
    }
}

/// An ordered sequence of change-sets, one version of a branch.
///
/// Insertion order is the order of appearance in the source history and is
/// the only order the matcher ever reports in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    changesets: Vec<ChangeSet>,
}

impl Series {
    /// Create a series, rejecting duplicate identifiers.
    pub fn new(changesets: Vec<ChangeSet>) -> Result<Self, TypeError> {
        let mut seen: HashMap<&ChangeSetId, usize> = HashMap::with_capacity(changesets.len());
        for (pos, cs) in changesets.iter().enumerate() {
            if let Some(&first) = seen.get(&cs.id) {
                return Err(TypeError::DuplicateIdentifier {
                    id: cs.id.clone(),
                    first,
                    second: pos,
                });
            }
            seen.insert(&cs.id, pos);
        }
        Ok(Self { changesets })
    }

    /// An empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of change-sets.
    pub fn len(&self) -> usize {
        self.changesets.len()
    }

    /// Returns `true` if the series has no change-sets.
    pub fn is_empty(&self) -> bool {
        self.changesets.is_empty()
    }

    /// The change-set at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ChangeSet> {
        self.changesets.get(index)
    }

    /// Iterate in series order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChangeSet> {
        self.changesets.iter()
    }

    /// The change-sets as a slice.
    pub fn as_slice(&self) -> &[ChangeSet] {
        &self.changesets
    }
}

impl Index<usize> for Series {
    type Output = ChangeSet;

    fn index(&self, index: usize) -> &ChangeSet {
        &self.changesets[index]
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a ChangeSet;
    type IntoIter = std::slice::Iter<'a, ChangeSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.changesets.iter()
    }
}
