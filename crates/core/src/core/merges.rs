//! Merge rule management for BPE.
//!
//! The learned rules form an append-only, ordered list. Rank is the position
//! in that list; an encoder must replay rules in rank order.

use super::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered pair of adjacent symbols.
pub type Pair = (Symbol, Symbol);

/// One learned merge: the original pair and its fused form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRule {
    pub left: Symbol,
    pub right: Symbol,
    pub fused: Symbol,
}

impl MergeRule {
    /// Build the rule for a pair, computing the fused symbol.
    pub fn new(pair: Pair) -> Self {
        let fused = pair.0.fuse(&pair.1);
        Self {
            left: pair.0,
            right: pair.1,
            fused,
        }
    }

    /// The pair this rule merges.
    pub fn pair(&self) -> Pair {
        (self.left.clone(), self.right.clone())
    }

    #[inline]
    pub fn matches(&self, left: &Symbol, right: &Symbol) -> bool {
        self.left == *left && self.right == *right
    }
}

/// Rule-file form: `<left> <right>`.
impl fmt::Display for MergeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.left, self.right)
    }
}

/// Ordered collection of learned merge rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRules {
    rules: Vec<MergeRule>,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
        }
    }

    /// Append the rule for `pair` and return its rank.
    pub fn push(&mut self, pair: Pair) -> u32 {
        let rank = self.rules.len() as u32;
        self.rules.push(MergeRule::new(pair));
        rank
    }

    /// Get the rule learned at `rank`.
    #[inline]
    pub fn get(&self, rank: u32) -> Option<&MergeRule> {
        self.rules.get(rank as usize)
    }

    /// Rank of the rule merging `left` and `right`, if one was learned.
    pub fn rank_of(&self, left: &Symbol, right: &Symbol) -> Option<u32> {
        self.rules
            .iter()
            .position(|rule| rule.matches(left, right))
            .map(|rank| rank as u32)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate in learned order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }

    /// Create merge rules from a list of pairs, ranked in order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair>) -> Self {
        let mut rules = Self::new();
        for pair in pairs {
            rules.push(pair);
        }
        rules
    }
}

impl<'a> IntoIterator for &'a MergeRules {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> Pair {
        (Symbol::new(a), Symbol::new(b))
    }

    #[test]
    fn test_push_assigns_ranks_in_order() {
        let mut rules = MergeRules::new();
        assert_eq!(rules.push(pair("e", "s")), 0);
        assert_eq!(rules.push(pair("es", "t")), 1);

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get(1).unwrap().fused, Symbol::new("est"));
        assert!(rules.get(2).is_none());
    }

    #[test]
    fn test_rank_of() {
        let rules = MergeRules::from_pairs(vec![pair("a", "b"), pair("ab", "c")]);

        assert_eq!(rules.rank_of(&Symbol::new("a"), &Symbol::new("b")), Some(0));
        assert_eq!(rules.rank_of(&Symbol::new("ab"), &Symbol::new("c")), Some(1));
        assert_eq!(rules.rank_of(&Symbol::new("b"), &Symbol::new("a")), None);
    }

    #[test]
    fn test_display_uses_single_space() {
        let rule = MergeRule::new((Symbol::new("est"), Symbol::end_marker()));
        assert_eq!(rule.to_string(), "est </w>");
        assert_eq!(rule.fused.to_string(), "est</w>");
    }
}
