//! Training summary.

use super::trainer::{StatsStrategy, StopReason, TrainingOutcome};
use serde::Serialize;
use std::fmt;

/// One learned rule with the frequency it had when selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub rank: u32,
    pub left: String,
    pub right: String,
    pub fused: String,
    pub frequency: u64,
}

/// Serializable summary of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub requested_merges: usize,
    pub learned_merges: usize,
    pub stop_reason: StopReason,
    pub strategy: StatsStrategy,
    pub token_count: u64,
    pub initial_entries: usize,
    pub final_entries: usize,
    pub initial_symbols: u64,
    pub final_symbols: u64,
    pub rules: Vec<RuleSummary>,
}

impl TrainingReport {
    pub fn from_outcome(outcome: &TrainingOutcome) -> Self {
        let rules = outcome
            .rules
            .iter()
            .zip(&outcome.frequencies)
            .enumerate()
            .map(|(rank, (rule, &frequency))| RuleSummary {
                rank: rank as u32,
                left: rule.left.to_string(),
                right: rule.right.to_string(),
                fused: rule.fused.to_string(),
                frequency,
            })
            .collect();

        Self {
            requested_merges: outcome.requested_merges,
            learned_merges: outcome.rules.len(),
            stop_reason: outcome.stop_reason,
            strategy: outcome.strategy,
            token_count: outcome.token_count,
            initial_entries: outcome.initial_entries,
            final_entries: outcome.vocab.len(),
            initial_symbols: outcome.initial_symbols,
            final_symbols: outcome.vocab.total_symbols(),
            rules,
        }
    }

    /// Average symbols per corpus token after training.
    pub fn symbols_per_token(&self) -> f64 {
        if self.token_count == 0 {
            return 0.0;
        }
        self.final_symbols as f64 / self.token_count as f64
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Learned {} of {} merges ({:?})",
            self.learned_merges, self.requested_merges, self.stop_reason
        )?;
        writeln!(
            f,
            "Words: {} tokens, {} -> {} distinct entries",
            self.token_count, self.initial_entries, self.final_entries
        )?;
        writeln!(
            f,
            "Symbols: {} -> {} ({:.2} per token)",
            self.initial_symbols,
            self.final_symbols,
            self.symbols_per_token()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::training::trainer::{BpeTrainer, StopReason, TrainingConfig};

    #[test]
    fn test_report_from_fixture() {
        let config = TrainingConfig::builder()
            .merges(3)
            .parallel(false)
            .build()
            .unwrap();
        let outcome = BpeTrainer::new(config)
            .train_str("low lower newest widest")
            .unwrap();
        let report = outcome.report();

        assert_eq!(report.learned_merges, 3);
        assert_eq!(report.stop_reason, StopReason::BudgetExhausted);
        assert_eq!(report.token_count, 4);
        // 4 + 6 + 7 + 7 symbols, minus one per merge occurrence (2 + 2 + 2).
        assert_eq!(report.initial_symbols, 24);
        assert_eq!(report.final_symbols, 18);
        assert_eq!(report.rules[2].left, "est");
        assert_eq!(report.rules[2].right, "</w>");
        assert_eq!(report.rules[2].fused, "est</w>");
        assert_eq!(report.rules[2].frequency, 2);
    }

    #[test]
    fn test_report_display() {
        let outcome = BpeTrainer::with_merges(10).train_str("ab").unwrap();
        let text = outcome.report().to_string();

        assert!(text.contains("Learned 2 of 10 merges (NoMergeablePairs)"));
        assert!(text.contains("1 tokens"));
    }
}
