//! Patch intake for tbdiff.
//!
//! Turns `git format-patch` mails into normalized [`ChangeSet`]s. The
//! source provider reads mails from disk, the normalizer reduces each mail to
//! its canonical line form, and [`parse_changeset`] ties the two together.
//!
//! # Key Items
//!
//! - [`RawChangeSet`] -- `(identifier, mail text)` as read from disk
//! - [`read_series`] -- Directory of `*.patch` files or one mbox file
//! - [`normalize`] -- Canonical line sequence of one mail
//! - [`PatchError`] -- Malformed input and I/O failures

pub mod error;
pub mod mail;
pub mod normalize;
pub mod source;

pub use error::{PatchError, PatchResult};
pub use normalize::{normalize, HUNK_MARKER};
pub use source::{read_series, RawChangeSet};

use tbdiff_types::ChangeSet;

/// Normalize one raw change-set.
pub fn parse_changeset(raw: &RawChangeSet) -> PatchResult<ChangeSet> {
    let lines = normalize(raw.id.as_str(), &raw.text)?;
    Ok(ChangeSet::new(raw.id.clone(), mail::subject(&raw.text), lines))
}

/// Normalize a whole series, stopping at the first malformed change-set.
pub fn parse_changesets(raws: &[RawChangeSet]) -> PatchResult<Vec<ChangeSet>> {
    raws.iter().map(parse_changeset).collect()
}
