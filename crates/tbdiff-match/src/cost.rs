//! Square cost matrix for the series assignment problem.
//!
//! For `|A| = m` left and `|B| = k` right change-sets the matrix has
//! `m + k` rows and columns:
//!
//! ```text
//!              columns 0..k            columns k..k+m
//! rows 0..m    distance(A[i], B[j])    delete A[i]  (diagonal only)
//! rows m..m+k  create B[j] (diag only) 0
//! ```
//!
//! Off-diagonal cells of the two "unmatched" blocks hold a forbidding value
//! larger than the cost of any assignment that avoids them, so every
//! optimal assignment uses only the diagonal there. The zero block pads the
//! matrix so a complete assignment always exists.

use tracing::debug;

use tbdiff_types::ChangeSet;

use crate::metric::distance;

/// Multiplier applied to line distances so that weighted costs stay integral.
///
/// The creation weight is carried at the same resolution, so weights are
/// exact to one part in a million.
pub const COST_SCALE: i64 = 1_000_000;

/// The assignment problem for one (residual) pair of series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix {
    rows: Vec<Vec<i64>>,
    left_len: usize,
    right_len: usize,
    forbidden: i64,
}

impl CostMatrix {
    /// Build the matrix for `left` against `right`.
    ///
    /// `scaled_weight` is the creation weight times [`COST_SCALE`]: declaring
    /// a change-set of `s` lines unmatched costs `scaled_weight * s`, the
    /// same unit as `distance * COST_SCALE`.
    pub fn build(left: &[&ChangeSet], right: &[&ChangeSet], scaled_weight: i64) -> Self {
        let m = left.len();
        let k = right.len();
        let n = m + k;

        let pair_costs = distance_block(left, right);
        let delete_costs: Vec<i64> = left
            .iter()
            .map(|a| scaled_weight * distance(Some(*a), None) as i64)
            .collect();
        let create_costs: Vec<i64> = right
            .iter()
            .map(|b| scaled_weight * distance(None, Some(*b)) as i64)
            .collect();

        let finite_total: i64 = pair_costs.iter().flatten().sum::<i64>()
            + delete_costs.iter().sum::<i64>()
            + create_costs.iter().sum::<i64>();
        let forbidden = finite_total + 1;

        let mut rows = vec![vec![forbidden; n]; n];
        for (i, row) in pair_costs.into_iter().enumerate() {
            rows[i][..k].copy_from_slice(&row);
            rows[i][k + i] = delete_costs[i];
        }
        for (j, &cost) in create_costs.iter().enumerate() {
            rows[m + j][j] = cost;
            rows[m + j][k..].fill(0);
        }

        debug!(left = m, right = k, forbidden, "built cost matrix");
        Self {
            rows,
            left_len: m,
            right_len: k,
            forbidden,
        }
    }

    /// Matrix dimension (`|A| + |B|`).
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` for the 0×0 matrix of two empty series.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The dense rows.
    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Cost of one cell.
    pub fn cost(&self, row: usize, col: usize) -> i64 {
        self.rows[row][col]
    }

    /// The value placed in unusable cells.
    pub fn forbidden(&self) -> i64 {
        self.forbidden
    }

    /// Total cost of a row→column assignment.
    pub fn total(&self, assignment: &[usize]) -> i64 {
        assignment
            .iter()
            .enumerate()
            .map(|(row, &col)| self.rows[row][col])
            .sum()
    }

    /// Real left→right pairs selected by a row→column assignment.
    ///
    /// Rows of left change-sets that landed in the "delete" block, and every
    /// dummy row, produce nothing.
    pub fn pairs(&self, assignment: &[usize]) -> Vec<(usize, usize)> {
        assignment
            .iter()
            .take(self.left_len)
            .enumerate()
            .filter(|&(_, &col)| col < self.right_len)
            .map(|(row, &col)| (row, col))
            .collect()
    }
}

fn distance_row(a: &ChangeSet, right: &[&ChangeSet]) -> Vec<i64> {
    right
        .iter()
        .map(|b| distance(Some(a), Some(*b)) as i64 * COST_SCALE)
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn distance_block(left: &[&ChangeSet], right: &[&ChangeSet]) -> Vec<Vec<i64>> {
    left.iter().map(|a| distance_row(a, right)).collect()
}

// Each worker owns whole rows, so there is nothing to synchronize.
#[cfg(feature = "parallel")]
fn distance_block(left: &[&ChangeSet], right: &[&ChangeSet]) -> Vec<Vec<i64>> {
    use rayon::prelude::*;

    left.par_iter().map(|a| distance_row(a, right)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cs(lines: &[&str]) -> ChangeSet {
        ChangeSet::new("x", "", lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn quadrant_layout() {
        let a0 = cs(&["a", "b"]);
        let a1 = cs(&["c"]);
        let b0 = cs(&["a", "b", "z"]);
        let m = CostMatrix::build(&[&a0, &a1], &[&b0], 600);

        assert_eq!(m.size(), 3);
        assert!(m.rows().iter().all(|r| r.len() == 3));

        // distance block
        assert_eq!(m.cost(0, 0), COST_SCALE);
        assert_eq!(m.cost(1, 0), 4 * COST_SCALE);
        // delete block: diagonal only
        assert_eq!(m.cost(0, 1), 600 * 2);
        assert_eq!(m.cost(1, 2), 600);
        assert_eq!(m.cost(0, 2), m.forbidden());
        assert_eq!(m.cost(1, 1), m.forbidden());
        // create block
        assert_eq!(m.cost(2, 0), 600 * 3);
        // dummy block
        assert_eq!(m.cost(2, 1), 0);
        assert_eq!(m.cost(2, 2), 0);
    }

    #[test]
    fn forbidden_exceeds_every_finite_total() {
        let a = cs(&["1", "2", "3"]);
        let b = cs(&["4"]);
        let m = CostMatrix::build(&[&a], &[&b], 1000);
        let finite: i64 = m
            .rows()
            .iter()
            .flatten()
            .filter(|&&c| c != m.forbidden())
            .sum();
        assert!(m.forbidden() > finite);
    }

    #[test]
    fn empty_series_give_empty_matrix() {
        let m = CostMatrix::build(&[], &[], 600);
        assert!(m.is_empty());
        assert!(m.pairs(&[]).is_empty());
    }

    #[test]
    fn one_sided_matrix() {
        let b0 = cs(&["x"]);
        let b1 = cs(&["y", "z"]);
        let m = CostMatrix::build(&[], &[&b0, &b1], 500);
        assert_eq!(m.size(), 2);
        assert_eq!(m.cost(0, 0), 500);
        assert_eq!(m.cost(1, 1), 1000);
        assert_eq!(m.cost(0, 1), m.forbidden());
    }

    #[test]
    fn pairs_and_total() {
        let a = cs(&["a"]);
        let b = cs(&["a"]);
        let m = CostMatrix::build(&[&a], &[&b], 600);
        // rows: [A0, dummy(B0)], cols: [B0, delete(A0)]
        let paired = [0, 1];
        assert_eq!(m.pairs(&paired), vec![(0, 0)]);
        assert_eq!(m.total(&paired), 0);

        let unmatched = [1, 0];
        assert!(m.pairs(&unmatched).is_empty());
        assert_eq!(m.total(&unmatched), 600 + 600);
    }
}
