//! Priority queue for BPE merge candidates.
//!
//! Ordering is total: higher count wins, and among equal counts the
//! lexicographically smallest pair (by left symbol, then right symbol) wins.
//! The queue and the one-shot selector share this ordering, so both pick the
//! same pair from the same statistics.

use crate::core::merges::Pair;
use ahash::AHashMap;
use dary_heap::OctonaryHeap;
use std::cmp::Ordering;

/// A merge candidate during BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of symbols to merge
    pub pair: Pair,
    /// The frequency of this pair
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }
}

// Greater = merged first.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue for BPE merge operations.
///
/// Uses an 8-ary heap for better cache locality than a binary heap. Updates
/// push a fresh entry and leave the old one in place; stale entries are
/// discarded lazily on pop.
pub struct PairPriorityQueue {
    heap: OctonaryHeap<MergeCandidate>,
    /// Live count per pair; entries in the heap that disagree are stale
    current_counts: AHashMap<Pair, u64>,
}

impl PairPriorityQueue {
    /// Create a new priority queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
            current_counts: AHashMap::with_capacity(capacity),
        }
    }

    /// Create a new empty priority queue.
    pub fn new() -> Self {
        Self {
            heap: OctonaryHeap::new(),
            current_counts: AHashMap::new(),
        }
    }

    /// Push a merge candidate onto the queue.
    pub fn push(&mut self, candidate: MergeCandidate) {
        self.update(candidate.pair, candidate.count);
    }

    /// Set the live count for a pair.
    ///
    /// A count of zero removes the pair; any heap entry for it becomes stale.
    pub fn update(&mut self, pair: Pair, new_count: u64) {
        if new_count == 0 {
            self.current_counts.remove(&pair);
            return;
        }
        if self.current_counts.get(&pair) == Some(&new_count) {
            return;
        }
        self.current_counts.insert(pair.clone(), new_count);
        self.heap.push(MergeCandidate::new(pair, new_count));
    }

    /// Pop the highest priority live candidate.
    ///
    /// Returns None if the queue only contains stale entries.
    pub fn pop(&mut self) -> Option<MergeCandidate> {
        while let Some(candidate) = self.heap.pop() {
            if self.current_counts.get(&candidate.pair) == Some(&candidate.count) {
                self.current_counts.remove(&candidate.pair);
                return Some(candidate);
            }
        }
        None
    }

    /// Peek at the highest priority live candidate, dropping stale entries
    /// found on top.
    pub fn peek(&mut self) -> Option<&MergeCandidate> {
        while let Some(top) = self.heap.peek() {
            if self.current_counts.get(&top.pair) == Some(&top.count) {
                break;
            }
            self.heap.pop();
        }
        self.heap.peek()
    }

    /// Number of live pairs.
    pub fn len(&self) -> usize {
        self.current_counts.len()
    }

    /// Whether no live pair remains.
    pub fn is_empty(&self) -> bool {
        self.current_counts.is_empty()
    }

    /// Clear all entries from the queue.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.current_counts.clear();
    }

    /// Get the current count for a pair.
    pub fn get_count(&self, pair: &Pair) -> Option<u64> {
        self.current_counts.get(pair).copied()
    }
}

impl Default for PairPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}
