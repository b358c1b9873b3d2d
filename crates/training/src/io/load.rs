//! Corpus file access.

use bpelearn_core::{BpeError, Result};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// Open a corpus file for buffered line reading.
///
/// A missing file is reported as [`BpeError::CorpusNotFound`]; any other
/// failure as [`BpeError::CorpusRead`].
pub fn open_corpus(path: &Path) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(BpeError::CorpusNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(BpeError::CorpusRead { source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        match open_corpus(&path) {
            Err(BpeError::CorpusNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected CorpusNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_open_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        std::fs::write(&path, "low lower\n").unwrap();

        let reader = open_corpus(&path).unwrap();
        assert_eq!(reader.lines().count(), 1);
    }
}
