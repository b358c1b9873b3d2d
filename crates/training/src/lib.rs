//! bpelearn-training - BPE merge-rule training
//!
//! This crate learns an ordered list of merge rules from a text corpus with
//! byte-pair encoding over characters.
//!
//! # Features
//!
//! - Whitespace word splitting with optional Unicode normalization
//! - Pair counting with rayon, or incremental updates backed by a priority queue
//! - Deterministic merge selection (frequency, then lexicographic pair)
//! - Rules written one per line, `<left> <right>`, in learned order
//!
//! # Example
//!
//! ```rust
//! use bpelearn_training::{BpeTrainer, TrainingConfig};
//!
//! let config = TrainingConfig::builder().merges(3).build()?;
//! let outcome = BpeTrainer::new(config).train_str("low lower newest widest")?;
//!
//! let rules: Vec<String> = outcome.rules.iter().map(|r| r.to_string()).collect();
//! assert_eq!(rules, ["e s", "es t", "est </w>"]);
//! # Ok::<(), bpelearn_training::BpeError>(())
//! ```

pub use bpelearn_core::{
    BpeError, MergeCandidate, MergeRule, MergeRules, Pair, Result, Symbol, Vocabulary, Word,
    END_MARKER,
};

// Training infrastructure
pub mod training;
pub use training::{
    BpeTrainer, CorpusTokenizer, IncrementalPairStats, PairCounts, StatsStrategy, StopReason,
    TrainingConfig, TrainingConfigBuilder, TrainingOutcome, TrainingReport,
};

// IO
pub mod io;
pub use io::{open_corpus, RulesSaver};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{NormalizationForm, Normalizer};
