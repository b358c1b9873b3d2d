//! Pair counting for BPE training.
//!
//! Two engines produce the same statistics:
//!
//! - [`count_pairs`] recomputes from scratch over the vocabulary, either
//!   sequentially or with rayon workers that each fold a partial map.
//! - [`IncrementalPairStats`] keeps the counts alive across iterations and
//!   after each merge only revisits the entries that contained the merged pair.

use super::rewriter::merge_symbols;
use ahash::{AHashMap, AHashSet};
use bpelearn_core::{
    BpeError, MergeCandidate, Pair, PairPriorityQueue, Result, Symbol, Vocabulary, Word,
};

/// Pair -> aggregate frequency. Only positive frequencies are stored.
pub type PairCounts = AHashMap<Pair, u64>;

/// Count adjacent pairs over the vocabulary.
pub fn count_pairs(vocab: &Vocabulary, parallel: bool) -> PairCounts {
    if parallel {
        count_pairs_parallel(vocab)
    } else {
        count_pairs_sequential(vocab)
    }
}

/// Count all pairs in parallel.
pub fn count_pairs_parallel(vocab: &Vocabulary) -> PairCounts {
    use rayon::prelude::*;

    let entries: Vec<(&Word, u64)> = vocab.iter().collect();

    entries
        .par_iter()
        .fold(PairCounts::new, |mut acc, &(word, count)| {
            add_word_pairs(&mut acc, word, count);
            acc
        })
        .reduce(PairCounts::new, |mut acc, partial| {
            for (pair, count) in partial {
                *acc.entry(pair).or_insert(0) += count;
            }
            acc
        })
}

/// Count all pairs sequentially.
pub fn count_pairs_sequential(vocab: &Vocabulary) -> PairCounts {
    let mut pair_counts = PairCounts::new();

    for (word, count) in vocab.iter() {
        add_word_pairs(&mut pair_counts, word, count);
    }

    pair_counts
}

fn add_word_pairs(pair_counts: &mut PairCounts, word: &Word, count: u64) {
    for (left, right) in word.pairs() {
        *pair_counts
            .entry((left.clone(), right.clone()))
            .or_insert(0) += count;
    }
}

/// Pair statistics maintained across merges.
///
/// Entries are kept in a flat list and never collapsed while training, which
/// leaves the sums unchanged; [`IncrementalPairStats::into_vocabulary`]
/// collapses them at the end.
pub struct IncrementalPairStats {
    words: Vec<Vec<Symbol>>,
    word_counts: Vec<u64>,
    pair_counts: PairCounts,
    /// Pair -> indices of entries that may contain it. Entries can be stale.
    where_to_update: AHashMap<Pair, AHashSet<usize>>,
    queue: PairPriorityQueue,
}

impl IncrementalPairStats {
    /// Build the initial statistics from a vocabulary.
    pub fn new(vocab: Vocabulary) -> Self {
        let mut words = Vec::with_capacity(vocab.len());
        let mut word_counts = Vec::with_capacity(vocab.len());
        let mut pair_counts = PairCounts::new();
        let mut where_to_update: AHashMap<Pair, AHashSet<usize>> = AHashMap::new();

        for (idx, (word, count)) in vocab.into_iter().enumerate() {
            for (left, right) in word.pairs() {
                let pair = (left.clone(), right.clone());
                *pair_counts.entry(pair.clone()).or_insert(0) += count;
                where_to_update.entry(pair).or_default().insert(idx);
            }
            words.push(word.symbols().to_vec());
            word_counts.push(count);
        }

        let mut queue = PairPriorityQueue::with_capacity(pair_counts.len());
        for (pair, &count) in &pair_counts {
            queue.push(MergeCandidate::new(pair.clone(), count));
        }

        Self {
            words,
            word_counts,
            pair_counts,
            where_to_update,
            queue,
        }
    }

    /// Current statistics.
    pub fn counts(&self) -> &PairCounts {
        &self.pair_counts
    }

    /// The best pair under the same ordering as the one-shot selector.
    pub fn peek_best(&mut self) -> Result<MergeCandidate> {
        self.queue.peek().cloned().ok_or(BpeError::NoMergeablePairs)
    }

    /// Remove and return the best pair.
    pub fn pop_best(&mut self) -> Result<MergeCandidate> {
        self.queue.pop().ok_or(BpeError::NoMergeablePairs)
    }

    /// Apply a merge and update the statistics for the touched entries.
    ///
    /// For every entry that changed, the pairs of its old sequence are
    /// subtracted and the pairs of its new sequence added, both weighted by
    /// the entry count. Returns the number of entries rewritten.
    pub fn merge(&mut self, pair: &Pair) -> usize {
        let fused = pair.0.fuse(&pair.1);
        let mut candidates: Vec<usize> = self
            .where_to_update
            .remove(pair)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default();
        candidates.sort_unstable();

        let mut deltas: AHashMap<Pair, i64> = AHashMap::new();
        let mut changed = 0;

        for idx in candidates {
            let Some(merged) = merge_symbols(&self.words[idx], pair, &fused) else {
                continue;
            };
            let count = self.word_counts[idx] as i64;

            for w in self.words[idx].windows(2) {
                *deltas.entry((w[0].clone(), w[1].clone())).or_insert(0) -= count;
            }
            for w in merged.windows(2) {
                let new_pair = (w[0].clone(), w[1].clone());
                *deltas.entry(new_pair.clone()).or_insert(0) += count;
                self.where_to_update.entry(new_pair).or_default().insert(idx);
            }

            self.words[idx] = merged;
            changed += 1;
        }

        for (pair, delta) in deltas {
            if delta == 0 {
                continue;
            }
            let current = self.pair_counts.get(&pair).copied().unwrap_or(0) as i64;
            let updated = current + delta;
            debug_assert!(updated >= 0, "pair count went negative");

            if updated > 0 {
                self.pair_counts.insert(pair.clone(), updated as u64);
                self.queue.update(pair, updated as u64);
            } else {
                self.pair_counts.remove(&pair);
                self.queue.update(pair, 0);
            }
        }

        changed
    }

    /// Snapshot of the current vocabulary.
    pub fn vocabulary(&self) -> Vocabulary {
        self.words
            .iter()
            .zip(&self.word_counts)
            .map(|(symbols, &count)| (Word::from_symbols(symbols.clone()), count))
            .collect()
    }

    /// Collapse the tracked entries into a vocabulary.
    pub fn into_vocabulary(self) -> Vocabulary {
        self.words
            .into_iter()
            .zip(self.word_counts)
            .map(|(symbols, count)| (Word::from_symbols(symbols), count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::rewriter::rewrite_sequential;
    use crate::training::selector::select_best;

    fn vocab_of(tokens: &[(&str, u64)]) -> Vocabulary {
        tokens
            .iter()
            .map(|&(token, count)| (Word::from_token(token), count))
            .collect()
    }

    fn pair(a: &str, b: &str) -> Pair {
        (Symbol::new(a), Symbol::new(b))
    }

    #[test]
    fn test_count_pairs_sequential() {
        let vocab = vocab_of(&[("ab", 1), ("bc", 1)]);
        let pairs = count_pairs_sequential(&vocab);

        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs.get(&pair("a", "b")), Some(&1));
        assert_eq!(pairs.get(&pair("b", "c")), Some(&1));
        assert_eq!(
            pairs.get(&(Symbol::new("c"), Symbol::end_marker())),
            Some(&1)
        );
    }

    #[test]
    fn test_count_pairs_weighted_by_entry_count() {
        let vocab = vocab_of(&[("ab", 3)]);
        let pairs = count_pairs_sequential(&vocab);
        assert_eq!(pairs.get(&pair("a", "b")), Some(&3));
    }

    #[test]
    fn test_count_pairs_overlapping_positions() {
        let vocab = vocab_of(&[("aaa", 2)]);
        let pairs = count_pairs_sequential(&vocab);
        assert_eq!(pairs.get(&pair("a", "a")), Some(&4));
    }

    #[test]
    fn test_count_pairs_parallel() {
        let vocab = vocab_of(&[("abc", 1), ("bcd", 2), ("cde", 1), ("low", 5)]);

        let pairs = count_pairs_parallel(&vocab);
        assert_eq!(pairs.get(&pair("a", "b")), Some(&1));
        assert_eq!(pairs.get(&pair("b", "c")), Some(&3));
        assert_eq!(pairs.get(&pair("c", "d")), Some(&3));
        assert_eq!(pairs, count_pairs_sequential(&vocab));
    }

    #[test]
    fn test_incremental_matches_recompute_every_iteration() {
        let mut vocab = vocab_of(&[
            ("low", 5),
            ("lower", 2),
            ("newest", 6),
            ("widest", 3),
            ("aaaa", 2),
            ("banana", 4),
        ]);
        let mut stats = IncrementalPairStats::new(vocab.clone());

        for _ in 0..25 {
            let recomputed = count_pairs_sequential(&vocab);
            assert_eq!(stats.counts(), &recomputed);

            let expected = match select_best(&recomputed) {
                Ok(candidate) => candidate,
                Err(_) => {
                    assert!(stats.pop_best().is_err());
                    break;
                }
            };
            assert_eq!(stats.peek_best().unwrap(), expected);
            let best = stats.pop_best().unwrap();
            assert_eq!(best, expected);

            stats.merge(&best.pair);
            vocab = rewrite_sequential(&vocab, &best.pair);
            assert_eq!(stats.vocabulary(), vocab);
        }

        assert_eq!(stats.into_vocabulary(), vocab);
    }

    #[test]
    fn test_incremental_merge_removes_pair() {
        let vocab = vocab_of(&[("abab", 1), ("ab", 2)]);
        let mut stats = IncrementalPairStats::new(vocab);

        let changed = stats.merge(&pair("a", "b"));
        assert_eq!(changed, 2);
        assert!(!stats.counts().contains_key(&pair("a", "b")));
        assert_eq!(stats.counts().get(&pair("ab", "ab")), Some(&1));
    }
}
