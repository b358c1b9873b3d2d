//! Merge selection.
//!
//! The best pair is the one with the highest frequency. Ties are broken by
//! taking the lexicographically smallest pair, comparing the left symbols
//! first and the right symbols second. Symbols compare by text, and a symbol
//! that closes a word sorts right after the same text without the marker.
//! The result never depends on hash-map iteration order.

use super::counter::PairCounts;
use bpelearn_core::{BpeError, MergeCandidate, Result};

/// Pick the pair to merge next.
///
/// Fails with [`BpeError::NoMergeablePairs`] when the statistics are empty.
pub fn select_best(pair_counts: &PairCounts) -> Result<MergeCandidate> {
    pair_counts
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(pair, &count)| MergeCandidate::new(pair.clone(), count))
        .max()
        .ok_or(BpeError::NoMergeablePairs)
}

/// The `n` best pairs, best first.
pub fn top_pairs(pair_counts: &PairCounts, n: usize) -> Vec<MergeCandidate> {
    let mut candidates: Vec<MergeCandidate> = pair_counts
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(pair, &count)| MergeCandidate::new(pair.clone(), count))
        .collect();
    candidates.sort_unstable_by(|a, b| b.cmp(a));
    candidates.truncate(n);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpelearn_core::{Pair, Symbol};

    fn pair(a: &str, b: &str) -> Pair {
        (Symbol::new(a), Symbol::new(b))
    }

    #[test]
    fn test_highest_frequency_wins() {
        let mut counts = PairCounts::new();
        counts.insert(pair("a", "b"), 3);
        counts.insert(pair("b", "c"), 7);

        let best = select_best(&counts).unwrap();
        assert_eq!(best.pair, pair("b", "c"));
        assert_eq!(best.count, 7);
    }

    #[test]
    fn test_tie_break_is_lexicographic() {
        let mut counts = PairCounts::new();
        counts.insert((Symbol::new("t"), Symbol::end_marker()), 2);
        counts.insert(pair("s", "t"), 2);
        counts.insert(pair("l", "o"), 2);
        counts.insert(pair("e", "s"), 2);
        counts.insert(pair("e", "r"), 1);

        assert_eq!(select_best(&counts).unwrap().pair, pair("e", "s"));
    }

    #[test]
    fn test_tie_break_on_right_symbol() {
        let mut counts = PairCounts::new();
        counts.insert(pair("e", "t"), 4);
        counts.insert(pair("e", "s"), 4);

        assert_eq!(select_best(&counts).unwrap().pair, pair("e", "s"));
    }

    #[test]
    fn test_empty_statistics() {
        let counts = PairCounts::new();
        assert!(matches!(
            select_best(&counts),
            Err(BpeError::NoMergeablePairs)
        ));
    }

    #[test]
    fn test_top_pairs() {
        let mut counts = PairCounts::new();
        counts.insert(pair("a", "b"), 1);
        counts.insert(pair("c", "d"), 5);
        counts.insert(pair("b", "c"), 5);

        let top = top_pairs(&counts, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].pair, pair("b", "c"));
        assert_eq!(top[1].pair, pair("c", "d"));
        assert_eq!(top[0], select_best(&counts).unwrap());
    }
}
