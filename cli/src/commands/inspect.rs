//! Inspect command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Inspect command arguments.
#[derive(Parser, Debug)]
pub struct InspectCommand {
    /// Path to the corpus
    #[arg(short, long, default_value = "news.txt")]
    pub input: PathBuf,

    /// Number of top pairs to show
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Number of most frequent words to show
    #[arg(short, long, default_value_t = 0)]
    pub words: usize,

    /// Unicode normalization applied before splitting
    #[arg(long, default_value = "none")]
    pub normalize: NormalizationForm,
}

use anyhow::{Context, Result as AnyhowResult};
use bpelearn_training::training::{count_pairs, top_pairs};
use bpelearn_training::{CorpusTokenizer, NormalizationForm, Normalizer, Vocabulary};

/// Text summary of a corpus vocabulary.
fn summarize(vocab: &Vocabulary, top: usize, words: usize) -> String {
    let pair_counts = count_pairs(vocab, true);
    let mut out = String::new();

    out.push_str(&format!("Tokens: {}\n", vocab.total_count()));
    out.push_str(&format!("Distinct words: {}\n", vocab.len()));
    out.push_str(&format!("Distinct pairs: {}\n", pair_counts.len()));

    if words > 0 {
        out.push_str("Top words:\n");
        for (word, count) in vocab.sorted_entries().into_iter().take(words) {
            out.push_str(&format!("  {:>8}  {}\n", count, word));
        }
    }

    if top > 0 {
        out.push_str("Top pairs:\n");
        for candidate in top_pairs(&pair_counts, top) {
            out.push_str(&format!(
                "  {:>8}  {} {}\n",
                candidate.count, candidate.pair.0, candidate.pair.1
            ));
        }
    }

    out
}

pub fn run(cmd: InspectCommand) -> AnyhowResult<()> {
    let tokenizer = CorpusTokenizer::new(Normalizer::new(cmd.normalize));
    let vocab = tokenizer
        .tokenize_path(&cmd.input)
        .with_context(|| format!("failed to load {}", cmd.input.display()))?;

    print!("{}", summarize(&vocab, cmd.top, cmd.words));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_fixture() {
        let vocab = CorpusTokenizer::default()
            .tokenize_str("low lower newest widest")
            .unwrap();
        let text = summarize(&vocab, 2, 1);

        assert!(text.contains("Tokens: 4\n"));
        assert!(text.contains("Distinct words: 4\n"));
        assert!(text.contains("Top words:\n"));
        assert!(text.contains("       2  e s\n"));
        assert!(text.contains("       2  l o\n"));
        assert!(!text.contains("o w\n"));
    }
}
