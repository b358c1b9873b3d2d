//! Training infrastructure for BPE merge rules.
//!
//! Stages, leaf first: corpus tokenization, pair counting, merge selection,
//! vocabulary rewriting, and the trainer that drives them.

pub mod corpus;
pub mod counter;
pub mod report;
pub mod rewriter;
pub mod selector;
pub mod trainer;

pub use corpus::CorpusTokenizer;
pub use counter::{count_pairs, IncrementalPairStats, PairCounts};
pub use report::{RuleSummary, TrainingReport};
pub use rewriter::{merge_word, rewrite_vocabulary};
pub use selector::{select_best, top_pairs};
pub use trainer::{
    BpeTrainer, StatsStrategy, StopReason, TrainingConfig, TrainingConfigBuilder, TrainingOutcome,
};
