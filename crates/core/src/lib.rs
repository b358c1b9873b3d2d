//! bpelearn-core - Core data structures for BPE merge training
//!
//! This crate provides the data model shared by the training stages:
//! symbols, word entries, the frequency-weighted vocabulary, merge rules,
//! and the pair priority queue used for deterministic merge selection.
//!
//! # Features
//!
//! - Symbols stored as `CompactString`, with a reserved end-of-word marker
//! - Vocabulary keyed by exact symbol sequence using `AHashMap`
//! - Append-only, ordered merge rules
//! - Total ordering of merge candidates (count, then lexicographic pair)
//!
//! # Example
//!
//! ```rust
//! use bpelearn_core::{Vocabulary, Word};
//!
//! let mut vocab = Vocabulary::new();
//! vocab.add(Word::from_token("low"), 1);
//! vocab.add(Word::from_token("low"), 1);
//! assert_eq!(vocab.len(), 1);
//! assert_eq!(vocab.total_count(), 2);
//! ```

pub mod error;
pub use error::{BpeError, Result};

pub mod core;
pub use core::{
    MergeCandidate, MergeRule, MergeRules, Pair, PairPriorityQueue, Symbol, Vocabulary, Word,
    END_MARKER,
};
