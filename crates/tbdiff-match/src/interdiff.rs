//! Interdiff: line-by-line comparison of two change-sets' canonical forms.
//!
//! Uses the `similar` crate (Myers diff algorithm) to produce structured
//! hunks with context lines. The result carries no `---`/`+++` header; only
//! the hunks are kept.

use similar::{ChangeTag, TextDiff};

use tbdiff_types::{ChangeSet, DiffHunk, DiffLine, Interdiff};

/// Lines of context kept around each change.
pub const CONTEXT_LINES: usize = 3;

/// Compute the interdiff from `old` to `new`.
pub fn interdiff(old: &ChangeSet, new: &ChangeSet) -> Interdiff {
    if old.same_content(new) {
        return Interdiff::default();
    }

    let old_lines: Vec<&str> = old.lines().iter().map(String::as_str).collect();
    let new_lines: Vec<&str> = new.lines().iter().map(String::as_str).collect();
    let text_diff = TextDiff::from_slices(&old_lines, &new_lines);

    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let mut lines = Vec::new();
        let mut hunk_old_start = 0usize;
        let mut hunk_new_start = 0usize;
        let mut hunk_old_count = 0usize;
        let mut hunk_new_count = 0usize;
        let mut first = true;

        for op in &group {
            if first {
                hunk_old_start = op.old_range().start + 1;
                hunk_new_start = op.new_range().start + 1;
                first = false;
            }

            for change in text_diff.iter_changes(op) {
                let text = change.value().to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        lines.push(DiffLine::Context(text));
                        hunk_old_count += 1;
                        hunk_new_count += 1;
                    }
                    ChangeTag::Delete => {
                        lines.push(DiffLine::Removed(text));
                        hunk_old_count += 1;
                    }
                    ChangeTag::Insert => {
                        lines.push(DiffLine::Added(text));
                        hunk_new_count += 1;
                    }
                }
            }
        }

        hunks.push(DiffHunk {
            old_start: hunk_old_start,
            old_count: hunk_old_count,
            new_start: hunk_new_start,
            new_count: hunk_new_count,
            lines,
        });
    }

    Interdiff { hunks }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cs(lines: &[&str]) -> ChangeSet {
        ChangeSet::new("x", "", lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn identical_changesets_no_interdiff() {
        let a = cs(&["Subject: add foo()", "+fn foo() {}"]);
        let diff = interdiff(&a, &a.clone());
        assert!(diff.is_empty());
        assert_eq!(diff.additions(), 0);
        assert_eq!(diff.deletions(), 0);
    }

    #[test]
    fn added_line_shows_up() {
        let old = cs(&["Subject: add foo()", "+fn foo() {}"]);
        let new = cs(&["Subject: add foo()", "+/// Does foo.", "+fn foo() {}"]);

        let diff = interdiff(&old, &new);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 0);
        assert!(diff.hunks[0]
            .lines
            .contains(&DiffLine::Added("+/// Does foo.".into())));
    }

    #[test]
    fn modification_shows_remove_and_add() {
        let diff = interdiff(&cs(&["+hello world"]), &cs(&["+hello universe"]));
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 1);
    }

    #[test]
    fn hunk_line_numbers() {
        let old = cs(&["a", "b", "c", "d", "e"]);
        let new = cs(&["a", "b", "X", "d", "e"]);

        let diff = interdiff(&old, &new);
        let hunk = &diff.hunks[0];
        assert_eq!(hunk.old_start, 1);
        assert_eq!(hunk.new_start, 1);
        assert_eq!(hunk.old_count, 5);
        assert_eq!(hunk.new_count, 5);
        assert_eq!(hunk.header(), "@@ -1,5 +1,5 @@");
    }

    #[test]
    fn distant_changes_make_separate_hunks() {
        let old: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let mut new = old.clone();
        new[1] = "one".into();
        new[18] = "eighteen".into();

        let diff = interdiff(&ChangeSet::new("a", "", old), &ChangeSet::new("b", "", new));
        assert_eq!(diff.hunks.len(), 2);
        assert!(diff.hunks[0]
            .lines
            .iter()
            .any(|l| matches!(l, DiffLine::Context(_))));
    }

    #[test]
    fn from_nothing() {
        let diff = interdiff(&cs(&[]), &cs(&["new"]));
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.hunks[0].old_count, 0);
    }
}
