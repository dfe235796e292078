//! Minimum-cost perfect matching on a square integer cost matrix.
//!
//! Dense O(n³) Hungarian algorithm (shortest augmenting paths with row and
//! column potentials). Rows are inserted one at a time; ties are broken by
//! the lowest column index, so the result depends only on the matrix.

use crate::error::{MatchError, MatchResult};

/// Solve the assignment problem for `costs`.
///
/// Returns `assignment` with `assignment[row] = column`, a bijection over
/// `0..n` of minimum total cost. An empty or non-square matrix is a
/// precondition violation.
pub fn solve(costs: &[Vec<i64>]) -> MatchResult<Vec<usize>> {
    let n = costs.len();
    if n == 0 {
        return Err(MatchError::PreconditionViolation(
            "cost matrix is empty".into(),
        ));
    }
    if let Some((row, len)) = costs
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|&(_, len)| len != n)
    {
        return Err(MatchError::PreconditionViolation(format!(
            "cost matrix is not square: row {row} has {len} columns, expected {n}"
        )));
    }

    let inf = i64::MAX / 4;
    // 1-based; index 0 is the virtual column the augmenting path starts from.
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; n + 1];
    let mut p = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![inf; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = inf;
            let mut j1 = 0usize;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let cur = costs[i0 - 1][j - 1] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; n];
    for j in 1..=n {
        if p[j] > 0 {
            assignment[p[j] - 1] = j - 1;
        }
    }
    Ok(assignment)
}
