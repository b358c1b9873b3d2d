//! Core BPE data model.
//!
//! This module contains the symbol, vocabulary, merge-rule and priority
//! structures shared by every stage of merge training.

pub mod merges;
pub mod priority;
pub mod symbol;
pub mod vocab;

pub use merges::{MergeRule, MergeRules, Pair};
pub use priority::{MergeCandidate, PairPriorityQueue};
pub use symbol::{Symbol, Word, END_MARKER};
pub use vocab::Vocabulary;
