//! Vocabulary rewriting.
//!
//! Applies one merge across the vocabulary. Matching runs over the symbol
//! sequence, two whole symbols at a time; the concatenated text of a word is
//! never searched, so symbols whose texts overlap (`a` + `bc` vs `ab` + `c`)
//! cannot be confused.

use bpelearn_core::{Pair, Symbol, Vocabulary, Word};
use rayon::prelude::*;

/// Replace every non-overlapping, left-to-right occurrence of `pair` in
/// `symbols` with `fused`.
///
/// Returns `None` when the pair does not occur, so callers can pass the
/// original entry through untouched.
pub fn merge_symbols(symbols: &[Symbol], pair: &Pair, fused: &Symbol) -> Option<Vec<Symbol>> {
    let (left, right) = pair;
    let mut out: Option<Vec<Symbol>> = None;
    let mut i = 0;

    while i < symbols.len() {
        let hit = i + 1 < symbols.len() && symbols[i] == *left && symbols[i + 1] == *right;
        if hit {
            let merged = out.get_or_insert_with(|| {
                let mut v = Vec::with_capacity(symbols.len() - 1);
                v.extend_from_slice(&symbols[..i]);
                v
            });
            merged.push(fused.clone());
            i += 2;
        } else {
            if let Some(merged) = out.as_mut() {
                merged.push(symbols[i].clone());
            }
            i += 1;
        }
    }

    out
}

/// Apply `pair` to a single word entry.
pub fn merge_word(word: &Word, pair: &Pair, fused: &Symbol) -> Option<Word> {
    merge_symbols(word.symbols(), pair, fused).map(Word::from_symbols)
}

/// Rewrite the whole vocabulary with one merge.
///
/// Counts are carried per original entry, and entries that become identical
/// collapse with summed counts.
pub fn rewrite_vocabulary(vocab: &Vocabulary, pair: &Pair, parallel: bool) -> Vocabulary {
    if parallel {
        rewrite_parallel(vocab, pair)
    } else {
        rewrite_sequential(vocab, pair)
    }
}

/// Sequential rewrite.
pub fn rewrite_sequential(vocab: &Vocabulary, pair: &Pair) -> Vocabulary {
    let fused = pair.0.fuse(&pair.1);
    let mut out = Vocabulary::with_capacity(vocab.len());

    for (word, count) in vocab.iter() {
        let rewritten = merge_word(word, pair, &fused).unwrap_or_else(|| word.clone());
        out.add(rewritten, count);
    }

    out
}

/// Parallel rewrite: entries are rewritten independently, then collected
/// into the new vocabulary in one pass.
pub fn rewrite_parallel(vocab: &Vocabulary, pair: &Pair) -> Vocabulary {
    let fused = pair.0.fuse(&pair.1);
    let entries: Vec<(&Word, u64)> = vocab.iter().collect();

    let rewritten: Vec<(Word, u64)> = entries
        .par_iter()
        .map(|&(word, count)| {
            let word = merge_word(word, pair, &fused).unwrap_or_else(|| word.clone());
            (word, count)
        })
        .collect();

    let mut out = Vocabulary::with_capacity(rewritten.len());
    out.extend(rewritten);
    out
}
