//! Data model for tbdiff.
//!
//! tbdiff compares two versions of a patch series and reports which change
//! in one version corresponds to which change in the other. This crate holds
//! the values every other tbdiff crate passes around.
//!
//! # Key Types
//!
//! - [`ChangeSet`] -- One commit in canonical, comparable form
//! - [`Series`] -- Ordered change-sets, duplicate identifiers rejected
//! - [`ChangeSetId`] -- Opaque provider identifier (commit hash)
//! - [`ContentId`] -- BLAKE3 hash of a canonical line sequence
//! - [`MatchRecord`] -- Paired / left-only / right-only outcome
//! - [`Interdiff`] -- Diff between two change-sets' canonical forms

pub mod changeset;
pub mod error;
pub mod id;
pub mod record;

pub use changeset::{ChangeSet, Series};
pub use error::TypeError;
pub use id::{ChangeSetId, ContentId};
pub use record::{DiffHunk, DiffLine, Interdiff, MatchRecord};
