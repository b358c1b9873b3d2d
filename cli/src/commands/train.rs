//! Train command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Train command arguments.
#[derive(Parser, Debug)]
pub struct TrainCommand {
    /// Path to the training corpus
    #[arg(short, long, default_value = "news.txt")]
    pub input: PathBuf,

    /// Number of merges to learn
    #[arg(short, long, default_value_t = 2000)]
    pub merges: usize,

    /// Output file for the merge rules
    #[arg(short, long, default_value = "bpe_codes.txt")]
    pub output: PathBuf,

    /// Disable parallel counting and rewriting
    #[arg(long, default_value_t = false)]
    pub sequential: bool,

    /// Update pair statistics incrementally instead of recounting
    #[arg(long, default_value_t = false)]
    pub incremental: bool,

    /// Unicode normalization applied before splitting (none, nfc, nfd, nfkc, nfkd)
    #[arg(long, default_value = "none")]
    pub normalize: NormalizationForm,

    /// Log progress every N merges
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub progress_every: usize,

    /// Write a JSON training summary to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

use anyhow::{Context, Result as AnyhowResult};
use bpelearn_training::{BpeTrainer, NormalizationForm, StatsStrategy, TrainingConfig};
use log::info;
use std::fs::File;
use std::io::BufWriter;

impl TrainCommand {
    fn config(&self) -> AnyhowResult<TrainingConfig> {
        let strategy = if self.incremental {
            StatsStrategy::Incremental
        } else {
            StatsStrategy::Recompute
        };

        let config = TrainingConfig::builder()
            .merges(self.merges)
            .parallel(!self.sequential)
            .strategy(strategy)
            .normalization(self.normalize)
            .progress_interval(self.progress_every)
            .build()?;
        Ok(config)
    }
}

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let config = cmd.config()?;
    info!(
        "Training {} merges from {} (strategy {:?}, parallel {}, normalization {})",
        config.merges,
        cmd.input.display(),
        config.strategy,
        config.parallel,
        config.normalization
    );

    let trainer = BpeTrainer::new(config);
    let outcome = trainer
        .train_to_path(&cmd.input, &cmd.output)
        .with_context(|| format!("training on {} failed", cmd.input.display()))?;

    let report = outcome.report();
    print!("{}", report);
    println!("Merge rules saved to {}", cmd.output.display());

    if let Some(path) = &cmd.report {
        let file = File::create(path)
            .with_context(|| format!("failed to create report {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
