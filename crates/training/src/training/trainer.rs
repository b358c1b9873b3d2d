//! BPE trainer implementation.
//!
//! The training loop: build the initial vocabulary, then up to the merge
//! budget compute pair statistics, select the best pair, record the rule and
//! rewrite the vocabulary. Running out of pairs ends the loop early with a
//! normal result. Rules are only persisted after the loop has finished, so a
//! failed run never leaves a partial rules file behind.

use super::corpus::CorpusTokenizer;
use super::counter::{count_pairs, IncrementalPairStats};
use super::report::TrainingReport;
use super::rewriter::rewrite_vocabulary;
use super::selector::select_best;
use crate::io::RulesSaver;
use crate::pre_tokenizer::{NormalizationForm, Normalizer};
use bpelearn_core::{BpeError, MergeCandidate, MergeRules, Result, Vocabulary};
use log::{debug, info, warn};
use serde::Serialize;
use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

/// How pair statistics are produced each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsStrategy {
    /// Recount every pair from the current vocabulary
    #[default]
    Recompute,
    /// Update only the pairs touched by the previous merge
    Incremental,
}

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Merge budget
    pub merges: usize,
    /// Use rayon for counting and rewriting
    pub parallel: bool,
    /// Statistics engine
    pub strategy: StatsStrategy,
    /// Unicode normalization applied to corpus lines
    pub normalization: NormalizationForm,
    /// Log progress every this many merges
    pub progress_interval: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            merges: 2000,
            parallel: true,
            strategy: StatsStrategy::Recompute,
            normalization: NormalizationForm::None,
            progress_interval: 100,
        }
    }
}

impl TrainingConfig {
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.progress_interval == 0 {
            return Err(BpeError::InvalidConfig(
                "progress interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`TrainingConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    pub fn merges(mut self, merges: usize) -> Self {
        self.config.merges = merges;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn strategy(mut self, strategy: StatsStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn normalization(mut self, normalization: NormalizationForm) -> Self {
        self.config.normalization = normalization;
        self
    }

    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.config.progress_interval = interval;
        self
    }

    pub fn build(self) -> Result<TrainingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Why the training loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The merge budget was used up
    BudgetExhausted,
    /// No adjacent pair remained before the budget was reached
    NoMergeablePairs,
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Learned rules, in order
    pub rules: MergeRules,
    /// Pair frequency at the time each rule was selected
    pub frequencies: Vec<u64>,
    /// Vocabulary after the last merge
    pub vocab: Vocabulary,
    pub stop_reason: StopReason,
    pub requested_merges: usize,
    pub strategy: StatsStrategy,
    /// Number of corpus tokens (sum of all entry counts)
    pub token_count: u64,
    /// Distinct entries before training
    pub initial_entries: usize,
    /// Weighted symbol count before training
    pub initial_symbols: u64,
}

impl TrainingOutcome {
    pub fn report(&self) -> TrainingReport {
        TrainingReport::from_outcome(self)
    }
}

/// Rules learned so far plus the loop's stop state.
struct Learned {
    rules: MergeRules,
    frequencies: Vec<u64>,
    stop_reason: StopReason,
}

/// BPE trainer.
///
/// Trains merge rules by iteratively merging the most frequent adjacent
/// symbol pair.
pub struct BpeTrainer {
    config: TrainingConfig,
}

impl BpeTrainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a trainer with default configuration and the given budget.
    pub fn with_merges(merges: usize) -> Self {
        Self::new(TrainingConfig {
            merges,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Tokenizer configured with this trainer's normalization.
    pub fn corpus_tokenizer(&self) -> CorpusTokenizer {
        CorpusTokenizer::new(Normalizer::new(self.config.normalization))
    }

    /// Train on a corpus file.
    pub fn train_path(&self, corpus: &Path) -> Result<TrainingOutcome> {
        info!("Reading corpus {}", corpus.display());
        let vocab = self.corpus_tokenizer().tokenize_path(corpus)?;
        self.train_vocabulary(vocab)
    }

    /// Train on a buffered reader.
    pub fn train_reader<R: BufRead>(&self, reader: R) -> Result<TrainingOutcome> {
        let vocab = self.corpus_tokenizer().tokenize_reader(reader)?;
        self.train_vocabulary(vocab)
    }

    /// Train on an in-memory corpus.
    pub fn train_str(&self, text: &str) -> Result<TrainingOutcome> {
        let vocab = self.corpus_tokenizer().tokenize_str(text)?;
        self.train_vocabulary(vocab)
    }

    /// Train on a corpus file and write the rules to `output`.
    ///
    /// The output file is only created once training has succeeded.
    pub fn train_to_path(&self, corpus: &Path, output: &Path) -> Result<TrainingOutcome> {
        let outcome = self.train_path(corpus)?;
        RulesSaver::new(&outcome.rules).save(output)?;
        info!(
            "Saved {} merge rules to {}",
            outcome.rules.len(),
            output.display()
        );
        Ok(outcome)
    }

    /// Run the merge loop on an initial vocabulary.
    pub fn train_vocabulary(&self, vocab: Vocabulary) -> Result<TrainingOutcome> {
        self.config.validate()?;

        let start = Instant::now();
        let token_count = vocab.total_count();
        let initial_entries = vocab.len();
        let initial_symbols = vocab.total_symbols();
        info!(
            "Initial vocabulary: {} distinct words, {} tokens",
            initial_entries, token_count
        );

        let mut learned = Learned {
            rules: MergeRules::with_capacity(self.config.merges),
            frequencies: Vec::with_capacity(self.config.merges),
            stop_reason: StopReason::BudgetExhausted,
        };

        let vocab = match self.config.strategy {
            StatsStrategy::Recompute => self.run_recompute(vocab, &mut learned)?,
            StatsStrategy::Incremental => self.run_incremental(vocab, &mut learned)?,
        };

        info!(
            "Learned {} merges in {:.2?}; {} distinct words remain",
            learned.rules.len(),
            start.elapsed(),
            vocab.len()
        );

        Ok(TrainingOutcome {
            rules: learned.rules,
            frequencies: learned.frequencies,
            vocab,
            stop_reason: learned.stop_reason,
            requested_merges: self.config.merges,
            strategy: self.config.strategy,
            token_count,
            initial_entries,
            initial_symbols,
        })
    }

    fn run_recompute(&self, mut vocab: Vocabulary, learned: &mut Learned) -> Result<Vocabulary> {
        let parallel = self.config.parallel;

        for iteration in 0..self.config.merges {
            let pair_counts = count_pairs(&vocab, parallel);
            let candidate = match select_best(&pair_counts) {
                Ok(candidate) => candidate,
                Err(err) if err.is_early_termination() => {
                    self.stop_early(iteration, learned);
                    break;
                }
                Err(err) => return Err(err),
            };

            vocab = rewrite_vocabulary(&vocab, &candidate.pair, parallel);
            self.record(iteration, candidate, learned);
        }

        Ok(vocab)
    }

    fn run_incremental(&self, vocab: Vocabulary, learned: &mut Learned) -> Result<Vocabulary> {
        let mut stats = IncrementalPairStats::new(vocab);

        for iteration in 0..self.config.merges {
            let candidate = match stats.pop_best() {
                Ok(candidate) => candidate,
                Err(err) if err.is_early_termination() => {
                    self.stop_early(iteration, learned);
                    break;
                }
                Err(err) => return Err(err),
            };

            stats.merge(&candidate.pair);
            self.record(iteration, candidate, learned);
        }

        Ok(stats.into_vocabulary())
    }

    fn record(&self, iteration: usize, candidate: MergeCandidate, learned: &mut Learned) {
        let done = iteration + 1;
        let (left, right) = (&candidate.pair.0, &candidate.pair.1);

        debug!("merge {}: {} {} ({})", done, left, right, candidate.count);
        if done % self.config.progress_interval == 0 || done == self.config.merges {
            info!(
                "Merge {}/{}: ({}, {}) freq {}",
                done, self.config.merges, left, right, candidate.count
            );
        }

        learned.frequencies.push(candidate.count);
        learned.rules.push(candidate.pair);
    }

    fn stop_early(&self, iteration: usize, learned: &mut Learned) {
        warn!(
            "No mergeable pairs left after {} merges ({} requested)",
            iteration, self.config.merges
        );
        learned.stop_reason = StopReason::NoMergeablePairs;
    }
}
