//! Frequency-weighted vocabulary of word entries.
//!
//! Keys are unique by exact symbol sequence. Adding a word that is already
//! present sums the counts, which is also how entries that become identical
//! after a merge collapse into one.

use super::symbol::Word;
use ahash::AHashMap;

/// Mapping from distinct word entry to its occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: AHashMap<Word, u64>,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: AHashMap::with_capacity(capacity),
        }
    }

    /// Add `count` occurrences of `word`, summing with any existing entry.
    ///
    /// Zero counts are ignored so every stored count stays positive.
    pub fn add(&mut self, word: Word, count: u64) {
        if count == 0 {
            return;
        }
        *self.entries.entry(word).or_insert(0) += count;
    }

    /// Get the occurrence count of a word entry.
    #[inline]
    pub fn get(&self, word: &Word) -> Option<u64> {
        self.entries.get(word).copied()
    }

    /// Number of distinct word entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of occurrence counts over all entries.
    pub fn total_count(&self) -> u64 {
        self.entries.values().sum()
    }

    /// Total number of symbols, weighted by occurrence count.
    pub fn total_symbols(&self) -> u64 {
        self.entries
            .iter()
            .map(|(word, &count)| word.len() as u64 * count)
            .sum()
    }

    /// Iterate over `(entry, count)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Word, u64)> {
        self.entries.iter().map(|(word, &count)| (word, count))
    }

    /// Entries sorted by descending count, then by symbol sequence.
    pub fn sorted_entries(&self) -> Vec<(&Word, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl FromIterator<(Word, u64)> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = (Word, u64)>>(iter: I) -> Self {
        let mut vocab = Vocabulary::new();
        vocab.extend(iter);
        vocab
    }
}

impl Extend<(Word, u64)> for Vocabulary {
    fn extend<I: IntoIterator<Item = (Word, u64)>>(&mut self, iter: I) {
        for (word, count) in iter {
            self.add(word, count);
        }
    }
}

impl IntoIterator for Vocabulary {
    type Item = (Word, u64);
    type IntoIter = std::collections::hash_map::IntoIter<Word, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
