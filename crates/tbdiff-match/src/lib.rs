//! Matching engine for tbdiff.
//!
//! Given an old and a new version of a patch series, decides which
//! change-sets correspond, which were dropped and which are new, and how the
//! corresponding ones changed. Correspondence is a minimum-cost assignment
//! over line distances, with identical change-sets paired up front.
//!
//! # Key Items
//!
//! - [`match_series`] / [`match_raw`] -- Run the whole pipeline
//! - [`MatchConfig`] -- Creation weight and interdiff switch
//! - [`MatchReport`] -- Ordered [`MatchRecord`]s plus totals
//! - [`CostMatrix`] / [`solve`] -- The assignment problem and its solver
//! - [`linearize`] -- Report order of a matching

pub mod config;
pub mod cost;
pub mod engine;
pub mod error;
pub mod exact;
pub mod interdiff;
pub mod metric;
pub mod ordering;
pub mod solver;

pub use config::{MatchConfig, DEFAULT_CREATION_WEIGHT};
pub use cost::{CostMatrix, COST_SCALE};
pub use engine::{match_raw, match_series, match_series_joint, MatchReport};
pub use error::{MatchError, MatchResult};
pub use exact::{claim_exact, compress, expand, ExactClaims, IndexMap, Residual};
pub use interdiff::interdiff;
pub use metric::{distance, line_distance};
pub use ordering::linearize;
pub use solver::solve;

pub use tbdiff_types::{Interdiff, MatchRecord};
