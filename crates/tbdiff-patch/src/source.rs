//! Reading a series from `git format-patch` output.
//!
//! Two layouts are accepted:
//!
//! - a directory of `*.patch` files (`git format-patch -o DIR`), read in file
//!   name order so the `0001-`, `0002-` numbering gives the series order;
//! - a single mbox file (`git format-patch --stdout`), split on envelopes.
//!
//! Nothing here runs git or writes to disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use tbdiff_types::ChangeSetId;

use crate::error::{PatchError, PatchResult};
use crate::mail;

/// One change-set as delivered by the source provider, before normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawChangeSet {
    /// Identifier from the mail envelope.
    pub id: ChangeSetId,
    /// The complete mail text.
    pub text: String,
}

impl RawChangeSet {
    /// Pair an identifier with raw text.
    pub fn new(id: impl Into<ChangeSetId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Build from a single mail, taking the identifier from its envelope.
    ///
    /// `origin` names the mail in errors (usually its file name).
    pub fn from_mail(origin: &str, text: &str) -> PatchResult<Self> {
        let id = mail::envelope_id(text).ok_or_else(|| {
            PatchError::malformed(origin, "first line is not a `From <id> <date>` envelope")
        })?;
        Ok(Self::new(id, text))
    }
}

/// Read a series from a directory of patch files or a single mbox file.
pub fn read_series(path: &Path) -> PatchResult<Vec<RawChangeSet>> {
    let meta = fs::metadata(path).map_err(|e| io_error(path, e))?;
    let series = if meta.is_dir() {
        read_patch_dir(path)?
    } else {
        read_mbox_file(path)?
    };
    debug!(path = %path.display(), count = series.len(), "read series");
    Ok(series)
}

fn read_patch_dir(dir: &Path) -> PatchResult<Vec<RawChangeSet>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "patch") {
            files.push(path);
        }
    }
    files.sort();

    let mut series = Vec::with_capacity(files.len());
    for file in &files {
        series.extend(read_mbox_file(file)?);
    }
    Ok(series)
}

fn read_mbox_file(file: &Path) -> PatchResult<Vec<RawChangeSet>> {
    let bytes = fs::read(file).map_err(|e| io_error(file, e))?;
    let origin = file.display().to_string();
    // Mails in a legacy charset still match; unmappable bytes become U+FFFD.
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %origin, "patch is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mails = mail::split_mbox(&text);
    if mails.is_empty() {
        // A lone mail whose envelope does not follow format-patch conventions.
        return Ok(vec![RawChangeSet::from_mail(&origin, &text)?]);
    }
    mails
        .into_iter()
        .map(|m| RawChangeSet::from_mail(&origin, m))
        .collect()
}

fn io_error(path: &Path, source: std::io::Error) -> PatchError {
    PatchError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(sha: char, subject: &str) -> String {
        let id: String = std::iter::repeat(sha).take(40).collect();
        format!(
            "From {id} Mon Sep 17 00:00:00 2001\nFrom: a <a@example.com>\nSubject: [PATCH] {subject}\n\nbody\n---\n\ndiff --git a/f b/f\n--- a/f\n+++ b/f\n@@ -1 +1 @@\n-x\n+{subject}\n"
        )
    }

    #[test]
    fn directory_is_read_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("0002-second.patch"), mail('2', "second")).unwrap();
        fs::write(dir.path().join("0001-first.patch"), mail('1', "first")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let series = read_series(dir.path()).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series[0].id.as_str().starts_with('1'));
        assert!(series[1].id.as_str().starts_with('2'));
    }

    #[test]
    fn mbox_file_is_split() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.mbox");
        fs::write(&path, format!("{}{}", mail('a', "one"), mail('b', "two"))).unwrap();

        let series = read_series(&path).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(mail::subject(&series[1].text), "two");
    }

    #[test]
    fn empty_directory_is_empty_series() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_series(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_series(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, PatchError::Io { .. }));
    }

    #[test]
    fn file_without_envelope_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0001-bad.patch");
        fs::write(&path, "Subject: no envelope\n\nbody\n").unwrap();

        let err = read_series(dir.path()).unwrap_err();
        assert!(matches!(err, PatchError::MalformedInput { .. }));
    }

    #[test]
    fn latin1_patch_is_read_not_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = mail('c', "caf").into_bytes();
        // "café" in Latin-1 at the end of the subject line.
        let at = bytes.windows(4).position(|w| w == b"caf\n").unwrap() + 3;
        bytes.insert(at, 0xE9);
        fs::write(dir.path().join("0001-latin1.patch"), bytes).unwrap();

        let series = read_series(dir.path()).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(mail::subject(&series[0].text), "caf\u{FFFD}");
    }

    #[test]
    fn lone_mail_with_custom_envelope() {
        let raw = RawChangeSet::from_mail("x", "From abc123 Tue Jan 1\nSubject: s\n\nb\n").unwrap();
        assert_eq!(raw.id.as_str(), "abc123");
    }
}
