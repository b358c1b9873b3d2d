//! Saving learned merge rules.
//!
//! The rules file holds one rule per line, `<left> <right>`, in learned order,
//! with no header. The end-of-word marker renders as `</w>`.

use bpelearn_core::{BpeError, MergeRules, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Rules saver - writes learned rules to a sink.
pub struct RulesSaver<'a> {
    rules: &'a MergeRules,
}

impl<'a> RulesSaver<'a> {
    pub fn new(rules: &'a MergeRules) -> Self {
        Self { rules }
    }

    /// Write the rules to any sink, one per line.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for rule in self.rules {
            writeln!(writer, "{}", rule)?;
        }
        writer.flush()
    }

    /// Write the rules to a file, creating or truncating it.
    pub fn save(&self, path: &Path) -> Result<()> {
        let to_error = |source| BpeError::OutputWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(to_error)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer).map_err(to_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpelearn_core::{Pair, Symbol};

    fn pair(a: &str, b: &str) -> Pair {
        (Symbol::new(a), Symbol::new(b))
    }

    fn sample_rules() -> MergeRules {
        MergeRules::from_pairs(vec![
            pair("e", "s"),
            pair("es", "t"),
            (Symbol::new("est"), Symbol::end_marker()),
        ])
    }

    #[test]
    fn test_write_to_buffer() {
        let rules = sample_rules();
        let mut buf = Vec::new();
        RulesSaver::new(&rules).write_to(&mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "e s\nes t\nest </w>\n");
    }

    #[test]
    fn test_empty_rules_write_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.txt");
        RulesSaver::new(&MergeRules::new()).save(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.txt");
        RulesSaver::new(&sample_rules()).save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), ["e s", "es t", "est </w>"]);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("codes.txt");

        let err = RulesSaver::new(&sample_rules()).save(&path).unwrap_err();
        assert!(matches!(err, BpeError::OutputWrite { .. }));
    }
}
