//! Linearization of a matching into one report order.
//!
//! The right (newer) series drives the order. Left-only change-sets are
//! interleaved as soon as everything before them on the left has been
//! shown, so reading the report top to bottom never shows a left change-set
//! ahead of one that precedes it.

use tbdiff_types::MatchRecord;

use crate::error::{MatchError, MatchResult};

/// Order the records for `left_len` × `right_len` change-sets matched by
/// `pairs` (original `(left, right)` indices).
///
/// `Paired` records come out with `interdiff: None`; attaching interdiffs
/// is up to the caller. Every left and right index appears exactly once.
pub fn linearize(
    left_len: usize,
    right_len: usize,
    pairs: &[(usize, usize)],
) -> MatchResult<Vec<MatchRecord>> {
    let mut left_match: Vec<Option<usize>> = vec![None; left_len];
    let mut right_match: Vec<Option<usize>> = vec![None; right_len];

    for &(l, r) in pairs {
        if l >= left_len || r >= right_len {
            return Err(MatchError::PreconditionViolation(format!(
                "pair ({l}, {r}) is outside a {left_len}x{right_len} matching"
            )));
        }
        if left_match[l].is_some() || right_match[r].is_some() {
            return Err(MatchError::PreconditionViolation(format!(
                "pair ({l}, {r}) reuses an already matched change-set"
            )));
        }
        left_match[l] = Some(r);
        right_match[r] = Some(l);
    }

    let mut emitted = vec![false; left_len];
    // Lowest left index not emitted yet.
    let mut next_left = 0usize;
    let mut records = Vec::with_capacity(left_len + right_len - pairs.len());

    for (right, matched) in right_match.iter().enumerate() {
        loop {
            while next_left < left_len && emitted[next_left] {
                next_left += 1;
            }
            if next_left < left_len && left_match[next_left].is_none() {
                records.push(MatchRecord::LeftOnly { left: next_left });
                emitted[next_left] = true;
            } else {
                break;
            }
        }

        match *matched {
            Some(left) => {
                records.push(MatchRecord::Paired {
                    left,
                    right,
                    interdiff: None,
                });
                emitted[left] = true;
            }
            None => records.push(MatchRecord::RightOnly { right }),
        }
    }

    // Only orphans can be left: every paired left index went out with its
    // right partner.
    records.extend(
        (0..left_len)
            .filter(|&left| !emitted[left])
            .map(|left| MatchRecord::LeftOnly { left }),
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paired(left: usize, right: usize) -> MatchRecord {
        MatchRecord::Paired {
            left,
            right,
            interdiff: None,
        }
    }

    /// For every `LeftOnly(i)`, all records with a left index below `i`
    /// must come earlier.
    fn left_order_holds(records: &[MatchRecord]) -> bool {
        records.iter().enumerate().all(|(pos, rec)| match rec {
            MatchRecord::LeftOnly { left } => records[pos + 1..]
                .iter()
                .all(|later| later.left().map_or(true, |l| l > *left)),
            _ => true,
        })
    }

    #[test]
    fn identity_matching() {
        let records = linearize(3, 3, &[(0, 0), (1, 1), (2, 2)]).unwrap();
        assert_eq!(records, vec![paired(0, 0), paired(1, 1), paired(2, 2)]);
    }

    #[test]
    fn leading_orphan_comes_first() {
        let records = linearize(2, 1, &[(1, 0)]).unwrap();
        assert_eq!(records, vec![MatchRecord::LeftOnly { left: 0 }, paired(1, 0)]);
    }

    #[test]
    fn trailing_orphans_are_flushed() {
        let records = linearize(3, 1, &[(0, 0)]).unwrap();
        assert_eq!(
            records,
            vec![
                paired(0, 0),
                MatchRecord::LeftOnly { left: 1 },
                MatchRecord::LeftOnly { left: 2 },
            ]
        );
    }

    #[test]
    fn orphan_waits_for_earlier_pairing() {
        // Left 1 is an orphan, but left 0 is paired with the last right
        // change-set, so left 1 is held back until that pairing is shown.
        let records = linearize(2, 2, &[(0, 1)]).unwrap();
        assert_eq!(
            records,
            vec![
                MatchRecord::RightOnly { right: 0 },
                paired(0, 1),
                MatchRecord::LeftOnly { left: 1 },
            ]
        );
    }

    #[test]
    fn right_only_follows_right_order() {
        let records = linearize(0, 2, &[]).unwrap();
        assert_eq!(
            records,
            vec![
                MatchRecord::RightOnly { right: 0 },
                MatchRecord::RightOnly { right: 1 },
            ]
        );
    }

    #[test]
    fn crossed_pairs_follow_right_order() {
        let records = linearize(2, 2, &[(0, 1), (1, 0)]).unwrap();
        assert_eq!(records, vec![paired(1, 0), paired(0, 1)]);
    }

    #[test]
    fn empty_matching() {
        assert!(linearize(0, 0, &[]).unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_range_pairs() {
        let err = linearize(1, 1, &[(0, 1)]).unwrap_err();
        assert!(matches!(err, MatchError::PreconditionViolation(_)));
    }

    #[test]
    fn rejects_reused_indices() {
        let err = linearize(2, 2, &[(0, 0), (1, 0)]).unwrap_err();
        assert!(matches!(err, MatchError::PreconditionViolation(_)));
    }

    fn partial_matching() -> impl Strategy<Value = (usize, usize, Vec<(usize, usize)>)> {
        (0usize..8, 0usize..8).prop_flat_map(|(left_len, right_len)| {
            let lefts = Just((0..left_len).collect::<Vec<_>>()).prop_shuffle();
            let rights = Just((0..right_len).collect::<Vec<_>>()).prop_shuffle();
            let count = 0..=left_len.min(right_len);
            (lefts, rights, count).prop_map(move |(l, r, n)| {
                let pairs = l.into_iter().zip(r).take(n).collect();
                (left_len, right_len, pairs)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_every_index_once((left_len, right_len, pairs) in partial_matching()) {
            let records = linearize(left_len, right_len, &pairs).unwrap();
            let mut lefts: Vec<usize> = records.iter().filter_map(MatchRecord::left).collect();
            let mut rights: Vec<usize> = records.iter().filter_map(MatchRecord::right).collect();
            lefts.sort_unstable();
            rights.sort_unstable();
            prop_assert_eq!(lefts, (0..left_len).collect::<Vec<_>>());
            prop_assert_eq!(rights, (0..right_len).collect::<Vec<_>>());
        }

        #[test]
        fn prop_right_order_is_kept((left_len, right_len, pairs) in partial_matching()) {
            let records = linearize(left_len, right_len, &pairs).unwrap();
            let rights: Vec<usize> = records.iter().filter_map(MatchRecord::right).collect();
            prop_assert!(rights.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_left_only_respects_left_order((left_len, right_len, pairs) in partial_matching()) {
            let records = linearize(left_len, right_len, &pairs).unwrap();
            prop_assert!(left_order_holds(&records));
        }
    }
}
