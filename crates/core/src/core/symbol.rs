//! Symbols and word entries.
//!
//! A [`Symbol`] is either a single character, a fused compound of earlier
//! symbols, or the reserved end-of-word marker. A [`Word`] is the symbol
//! sequence of one corpus token and always ends with exactly one symbol that
//! carries the end-of-word flag.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text used to render the end-of-word marker in rule files.
pub const END_MARKER: &str = "</w>";

/// Atomic subword unit.
///
/// Symbols compare by text first, then by the end-of-word flag, so an
/// end-marked symbol sorts right after the unmarked symbol with the same text.
/// The end marker itself is the empty text with the flag set, which no
/// character or fusion of characters can produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol {
    text: CompactString,
    end_of_word: bool,
}

impl Symbol {
    /// Create a plain text symbol.
    pub fn new(text: &str) -> Self {
        Self {
            text: CompactString::new(text),
            end_of_word: false,
        }
    }

    /// Create a single-character symbol.
    pub fn from_char(ch: char) -> Self {
        let mut buf = [0u8; 4];
        Self::new(ch.encode_utf8(&mut buf))
    }

    /// The reserved end-of-word marker.
    pub fn end_marker() -> Self {
        Self {
            text: CompactString::default(),
            end_of_word: true,
        }
    }

    /// Create a symbol that closes a word, e.g. `est</w>`.
    pub fn word_final(text: &str) -> Self {
        Self {
            text: CompactString::new(text),
            end_of_word: true,
        }
    }

    /// Fuse two adjacent symbols into one by plain concatenation.
    ///
    /// The result closes a word if either half did.
    pub fn fuse(&self, right: &Symbol) -> Symbol {
        let mut text = CompactString::with_capacity(self.text.len() + right.text.len());
        text.push_str(&self.text);
        text.push_str(&right.text);
        Symbol {
            text,
            end_of_word: self.end_of_word || right.end_of_word,
        }
    }

    /// The character content of the symbol, without the end marker.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this symbol closes a word.
    #[inline]
    pub fn is_word_final(&self) -> bool {
        self.end_of_word
    }

    /// Whether this is the bare end-of-word marker.
    #[inline]
    pub fn is_end_marker(&self) -> bool {
        self.end_of_word && self.text.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        if self.end_of_word {
            f.write_str(END_MARKER)?;
        }
        Ok(())
    }
}

/// Symbol sequence of one corpus token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    symbols: Vec<Symbol>,
}

impl Word {
    /// Split a token into one symbol per codepoint, followed by the end marker.
    pub fn from_token(token: &str) -> Self {
        let mut symbols = Vec::with_capacity(token.chars().count() + 1);
        symbols.extend(token.chars().map(Symbol::from_char));
        symbols.push(Symbol::end_marker());
        Self { symbols }
    }

    /// Wrap an already built symbol sequence.
    ///
    /// The caller keeps the end-marker invariant; rewriting only ever fuses
    /// neighbours, so a sequence derived from [`Word::from_token`] keeps it.
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        debug_assert!(symbols.last().is_some_and(Symbol::is_word_final));
        Self { symbols }
    }

    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over adjacent symbol pairs, left to right.
    pub fn pairs(&self) -> impl Iterator<Item = (&Symbol, &Symbol)> {
        self.symbols.windows(2).map(|w| (&w[0], &w[1]))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
