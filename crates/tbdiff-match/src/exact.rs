//! Exact-duplicate short-circuit and the index remapping around it.
//!
//! Change-sets whose canonical lines are identical on both sides are paired
//! up front at zero cost and removed from the assignment problem. The solver
//! then works on the residual series, whose positions are translated back
//! with [`compress`] / [`expand`].

use std::collections::HashMap;

use tbdiff_types::{ChangeSet, ContentId};

/// Pairs claimed by [`claim_exact`], plus which positions they used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExactClaims {
    /// `(left, right)` original indices, in left order.
    pub pairs: Vec<(usize, usize)>,
    /// `left_claimed[i]` is `true` if `left[i]` was paired.
    pub left_claimed: Vec<bool>,
    /// `right_claimed[j]` is `true` if `right[j]` was paired.
    pub right_claimed: Vec<bool>,
}

impl ExactClaims {
    /// Number of exact pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if nothing was claimed.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Pair identical change-sets, first come first served.
///
/// Walking `left` in order, each change-set claims the earliest unclaimed
/// change-set in `right` with the same canonical lines. Repeated identical
/// change-sets therefore pair up in order of appearance.
pub fn claim_exact(left: &[ChangeSet], right: &[ChangeSet]) -> ExactClaims {
    let mut unclaimed: HashMap<ContentId, Vec<usize>> = HashMap::new();
    for (j, cs) in right.iter().enumerate() {
        unclaimed.entry(cs.content_id()).or_default().push(j);
    }

    let mut claims = ExactClaims {
        pairs: Vec::new(),
        left_claimed: vec![false; left.len()],
        right_claimed: vec![false; right.len()],
    };

    for (i, cs) in left.iter().enumerate() {
        let Some(candidates) = unclaimed.get_mut(&cs.content_id()) else {
            continue;
        };
        // The hash only buckets; equality of lines decides.
        if let Some(pos) = candidates.iter().position(|&j| right[j].same_content(cs)) {
            let j = candidates.remove(pos);
            claims.pairs.push((i, j));
            claims.left_claimed[i] = true;
            claims.right_claimed[j] = true;
        }
    }

    claims
}

/// Maps residual positions back to positions in the original series.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexMap {
    originals: Vec<usize>,
}

impl IndexMap {
    /// Original index of residual position `residual`.
    pub fn original(&self, residual: usize) -> usize {
        self.originals[residual]
    }

    /// Number of residual positions.
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    /// Returns `true` if nothing is left in the residual series.
    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
}

/// A series with its claimed change-sets removed.
#[derive(Clone, Debug)]
pub struct Residual<'a> {
    /// Unclaimed change-sets, in original order.
    pub items: Vec<&'a ChangeSet>,
    /// Residual position → original position.
    pub index_map: IndexMap,
}

/// Drop every position whose `claimed` flag is set.
pub fn compress<'a>(series: &'a [ChangeSet], claimed: &[bool]) -> Residual<'a> {
    debug_assert_eq!(series.len(), claimed.len());
    let (items, originals): (Vec<&ChangeSet>, Vec<usize>) = series
        .iter()
        .zip(claimed)
        .enumerate()
        .filter(|&(_, (_, &taken))| !taken)
        .map(|(i, (cs, _))| (cs, i))
        .unzip();
    Residual {
        items,
        index_map: IndexMap { originals },
    }
}

/// Translate residual `(left, right)` pairs back to original indices.
pub fn expand(
    residual_pairs: &[(usize, usize)],
    left_map: &IndexMap,
    right_map: &IndexMap,
) -> Vec<(usize, usize)> {
    residual_pairs
        .iter()
        .map(|&(i, j)| (left_map.original(i), right_map.original(j)))
        .collect()
}
