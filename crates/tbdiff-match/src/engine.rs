//! The matching pipeline.
//!
//! ```text
//! raw mails ─normalize─▶ Series ─claim_exact─▶ residual ─CostMatrix/solve─▶ pairs
//!                                    │                                       │
//!                                    └────────────── expand ◀────────────────┘
//!                                                      │
//!                                          linearize + interdiff ─▶ MatchReport
//! ```

use serde::Serialize;
use tracing::{debug, info};

use tbdiff_patch::{parse_changesets, RawChangeSet};
use tbdiff_types::{ChangeSet, MatchRecord, Series};

use crate::config::MatchConfig;
use crate::cost::CostMatrix;
use crate::error::MatchResult;
use crate::exact::{claim_exact, compress, expand};
use crate::interdiff::interdiff;
use crate::ordering::linearize;
use crate::solver::solve;

/// Result of matching two series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// Records in report order.
    pub records: Vec<MatchRecord>,
    /// Total assignment cost, in [`COST_SCALE`](crate::cost::COST_SCALE) units.
    pub total_cost: i64,
    /// How many pairs were identical change-sets.
    pub exact_matches: usize,
}

impl MatchReport {
    /// Number of `Paired` records.
    pub fn paired(&self) -> usize {
        self.records.iter().filter(|r| r.is_paired()).count()
    }

    /// Number of `LeftOnly` records.
    pub fn left_only(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, MatchRecord::LeftOnly { .. }))
            .count()
    }

    /// Number of `RightOnly` records.
    pub fn right_only(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, MatchRecord::RightOnly { .. }))
            .count()
    }
}

/// Normalize two lists of raw change-sets and match them.
///
/// Any malformed change-set aborts the run; a partial report would
/// misrepresent the matching.
pub fn match_raw(
    left: &[RawChangeSet],
    right: &[RawChangeSet],
    config: &MatchConfig,
) -> MatchResult<MatchReport> {
    config.validate()?;
    let left = Series::new(parse_changesets(left)?)?;
    let right = Series::new(parse_changesets(right)?)?;
    match_series(&left, &right, config)
}

/// Match two series, pairing identical change-sets before solving.
pub fn match_series(
    left: &Series,
    right: &Series,
    config: &MatchConfig,
) -> MatchResult<MatchReport> {
    config.validate()?;

    let claims = claim_exact(left.as_slice(), right.as_slice());
    let left_residual = compress(left.as_slice(), &claims.left_claimed);
    let right_residual = compress(right.as_slice(), &claims.right_claimed);
    debug!(
        exact = claims.len(),
        residual_left = left_residual.items.len(),
        residual_right = right_residual.items.len(),
        "claimed exact matches"
    );

    let (residual_pairs, total_cost) =
        solve_pairs(&left_residual.items, &right_residual.items, config)?;

    let mut pairs = claims.pairs.clone();
    pairs.extend(expand(
        &residual_pairs,
        &left_residual.index_map,
        &right_residual.index_map,
    ));

    let report = MatchReport {
        records: build_records(left, right, &pairs, config)?,
        total_cost,
        exact_matches: claims.len(),
    };
    info!(
        series_left = left.len(),
        series_right = right.len(),
        exact = report.exact_matches,
        paired = report.paired(),
        total_cost,
        "matched series"
    );
    Ok(report)
}

/// Match two series with one solve over every change-set.
///
/// Identical change-sets are not pre-paired; they simply cost zero in the
/// matrix. Slower than [`match_series`] and reaches the same total cost.
pub fn match_series_joint(
    left: &Series,
    right: &Series,
    config: &MatchConfig,
) -> MatchResult<MatchReport> {
    config.validate()?;

    let left_items: Vec<&ChangeSet> = left.iter().collect();
    let right_items: Vec<&ChangeSet> = right.iter().collect();
    let (pairs, total_cost) = solve_pairs(&left_items, &right_items, config)?;
    let exact_matches = pairs
        .iter()
        .filter(|&&(i, j)| left[i].same_content(&right[j]))
        .count();

    Ok(MatchReport {
        records: build_records(left, right, &pairs, config)?,
        total_cost,
        exact_matches,
    })
}

fn solve_pairs(
    left: &[&ChangeSet],
    right: &[&ChangeSet],
    config: &MatchConfig,
) -> MatchResult<(Vec<(usize, usize)>, i64)> {
    if left.is_empty() && right.is_empty() {
        return Ok((Vec::new(), 0));
    }
    let matrix = CostMatrix::build(left, right, config.scaled_weight());
    let assignment = solve(matrix.rows())?;
    Ok((matrix.pairs(&assignment), matrix.total(&assignment)))
}

fn build_records(
    left: &Series,
    right: &Series,
    pairs: &[(usize, usize)],
    config: &MatchConfig,
) -> MatchResult<Vec<MatchRecord>> {
    let mut records = linearize(left.len(), right.len(), pairs)?;
    if config.include_interdiff {
        for record in &mut records {
            if let MatchRecord::Paired {
                left: l,
                right: r,
                interdiff: slot,
            } = record
            {
                *slot = Some(interdiff(&left[*l], &right[*r]));
            }
        }
    }
    Ok(records)
}
