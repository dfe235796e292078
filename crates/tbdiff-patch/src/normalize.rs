//! Canonical line form of a `git format-patch` mail.
//!
//! The normalizer keeps what identifies a change (author, subject, message,
//! diff body) and drops what drifts for unrelated reasons: the mbox envelope,
//! the diffstat, `index` lines, and line numbers in hunk headers.

use crate::error::{PatchError, PatchResult};

/// Marker every hunk header is collapsed to.
pub const HUNK_MARKER: &str = "@@";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    /// Mail headers, up to the first blank line.
    Head,
    /// Commit message body.
    Message,
    /// Between the `---` separator and the first `diff --git`.
    Diffstat,
    /// The diff body.
    Diff,
}

/// Reduce a raw format-patch mail to its canonical line sequence.
///
/// `id` is only used to label errors.
pub fn normalize(id: &str, raw: &str) -> PatchResult<Vec<String>> {
    if raw.trim().is_empty() {
        return Err(PatchError::malformed(id, "empty change-set"));
    }

    let mut section = Section::Head;
    let mut out = Vec::new();

    for (lineno, line) in raw.lines().enumerate() {
        match section {
            Section::Head if line.trim().is_empty() => section = Section::Message,
            Section::Message if line.trim() == "---" => section = Section::Diffstat,
            Section::Diffstat if line.starts_with("diff --git") => section = Section::Diff,
            _ => {}
        }

        match section {
            Section::Head => {
                if line.starts_with("From:") || line.starts_with("Subject:") {
                    out.push(line.to_string());
                }
            }
            Section::Diffstat => {}
            Section::Message | Section::Diff => {
                if line.starts_with("index ") {
                    continue;
                }
                if line.starts_with("@@ ") {
                    if section == Section::Diff && !is_hunk_header(line) {
                        return Err(PatchError::malformed(
                            id,
                            format!("invalid hunk header on line {}: {line:?}", lineno + 1),
                        ));
                    }
                    out.push(HUNK_MARKER.to_string());
                } else {
                    out.push(line.to_string());
                }
            }
        }
    }

    if section == Section::Head {
        return Err(PatchError::malformed(
            id,
            "mail header is not terminated by a blank line",
        ));
    }

    Ok(out)
}

/// `@@ -<line>[,<count>] +<line>[,<count>] @@[ <section heading>]`
fn is_hunk_header(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("@@ -") else {
        return false;
    };
    let Some((old, rest)) = rest.split_once(" +") else {
        return false;
    };
    let Some((new, _)) = rest.split_once(" @@") else {
        return false;
    };
    is_range(old) && is_range(new)
}

fn is_range(s: &str) -> bool {
    s.splitn(2, ',')
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}
