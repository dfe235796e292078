//! Line-level dissimilarity between two change-sets.

use similar::{capture_diff_slices, Algorithm, DiffTag};

use tbdiff_types::ChangeSet;

/// Number of lines that differ between two canonical forms.
///
/// An absent side costs the full size of the present one, so
/// `distance(None, Some(y)) == y.size()`. Two present change-sets cost the
/// insertions plus deletions of a Myers line alignment; identical lines
/// cost nothing. Symmetric, and zero only for identical sequences.
pub fn distance(x: Option<&ChangeSet>, y: Option<&ChangeSet>) -> usize {
    match (x, y) {
        (None, None) => 0,
        (Some(x), None) => x.size(),
        (None, Some(y)) => y.size(),
        (Some(x), Some(y)) => line_distance(x.lines(), y.lines()),
    }
}

/// Insertions plus deletions between two line sequences.
pub fn line_distance(old: &[String], new: &[String]) -> usize {
    if old == new {
        return 0;
    }
    capture_diff_slices(Algorithm::Myers, old, new)
        .iter()
        .map(|op| {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => 0,
                DiffTag::Delete => old_range.len(),
                DiffTag::Insert => new_range.len(),
                DiffTag::Replace => old_range.len() + new_range.len(),
            }
        })
        .sum()
}
