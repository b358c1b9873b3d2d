//! Corpus tokenization.
//!
//! Turns raw text into the initial vocabulary: each line is split on runs of
//! whitespace, each word becomes one symbol per codepoint plus the end
//! marker, and identical sequences are counted together.

use crate::io::open_corpus;
use crate::pre_tokenizer::Normalizer;
use bpelearn_core::{BpeError, Result, Vocabulary, Word};
use std::io::BufRead;
use std::path::Path;

/// Builds the initial vocabulary from a corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusTokenizer {
    normalizer: Normalizer,
}

impl CorpusTokenizer {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// Add the words of one line to `vocab`. Returns the number of words.
    pub fn add_line(&self, line: &str, vocab: &mut Vocabulary) -> usize {
        let line = self.normalizer.normalize(line);
        let mut words = 0;
        for token in line.split_whitespace() {
            vocab.add(Word::from_token(token), 1);
            words += 1;
        }
        words
    }

    /// Tokenize every line of a reader.
    ///
    /// Read and decoding failures (including invalid UTF-8) are reported as
    /// [`BpeError::CorpusRead`]. A corpus without any word fails with
    /// [`BpeError::EmptyCorpus`].
    pub fn tokenize_reader<R: BufRead>(&self, reader: R) -> Result<Vocabulary> {
        let mut vocab = Vocabulary::new();

        for line in reader.lines() {
            let line = line.map_err(|source| BpeError::CorpusRead { source })?;
            self.add_line(&line, &mut vocab);
        }

        if vocab.is_empty() {
            return Err(BpeError::EmptyCorpus);
        }
        Ok(vocab)
    }

    /// Tokenize an in-memory corpus.
    pub fn tokenize_str(&self, text: &str) -> Result<Vocabulary> {
        self.tokenize_reader(text.as_bytes())
    }

    /// Tokenize a corpus file.
    pub fn tokenize_path(&self, path: &Path) -> Result<Vocabulary> {
        self.tokenize_reader(open_corpus(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pre_tokenizer::NormalizationForm;
    use bpelearn_core::Symbol;

    #[test]
    fn test_counts_identical_words() {
        let vocab = CorpusTokenizer::default()
            .tokenize_str("low low lower\nlow")
            .unwrap();

        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.get(&Word::from_token("low")), Some(3));
        assert_eq!(vocab.get(&Word::from_token("lower")), Some(1));
    }

    #[test]
    fn test_total_count_equals_token_count() {
        let text = "  the cat\tsat on\n\n the   mat \r\nthe end\n";
        let vocab = CorpusTokenizer::default().tokenize_str(text).unwrap();

        assert_eq!(vocab.total_count(), text.split_whitespace().count() as u64);
    }

    #[test]
    fn test_every_entry_ends_with_one_marker() {
        let vocab = CorpusTokenizer::default()
            .tokenize_str("a bb ccc")
            .unwrap();

        for (word, _) in vocab.iter() {
            let markers = word.symbols().iter().filter(|s| s.is_word_final()).count();
            assert_eq!(markers, 1);
            assert!(word.symbols().last().unwrap().is_end_marker());
        }
    }

    #[test]
    fn test_blank_corpus_is_empty() {
        let err = CorpusTokenizer::default()
            .tokenize_str("\n   \n\t\n")
            .unwrap_err();
        assert!(matches!(err, BpeError::EmptyCorpus));

        let err = CorpusTokenizer::default().tokenize_str("").unwrap_err();
        assert!(matches!(err, BpeError::EmptyCorpus));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let bytes: &[u8] = b"abc \xff\xfe def\n";
        let err = CorpusTokenizer::default().tokenize_reader(bytes).unwrap_err();
        assert!(matches!(err, BpeError::CorpusRead { .. }));
    }

    #[test]
    fn test_codepoint_split() {
        let vocab = CorpusTokenizer::default().tokenize_str("日本").unwrap();
        let (word, _) = vocab.iter().next().unwrap();
        assert_eq!(
            word.symbols(),
            &[Symbol::new("日"), Symbol::new("本"), Symbol::end_marker()]
        );
    }

    #[test]
    fn test_normalization_before_split() {
        let tokenizer = CorpusTokenizer::new(Normalizer::new(NormalizationForm::NFKC));
        let vocab = tokenizer.tokenize_str("a\u{00a0}b").unwrap();
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.total_count(), 2);

        let nfd = CorpusTokenizer::new(Normalizer::new(NormalizationForm::NFD));
        let vocab = nfd.tokenize_str("\u{00e9}").unwrap();
        let (word, _) = vocab.iter().next().unwrap();
        assert_eq!(word.len(), 3);
    }

    #[test]
    fn test_tokenize_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        std::fs::write(&path, "low lower newest widest\n").unwrap();

        let vocab = CorpusTokenizer::default().tokenize_path(&path).unwrap();
        assert_eq!(vocab.len(), 4);

        let missing = dir.path().join("missing.txt");
        let err = CorpusTokenizer::default().tokenize_path(&missing).unwrap_err();
        assert!(matches!(err, BpeError::CorpusNotFound { .. }));
    }
}
