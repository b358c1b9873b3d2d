//! Pre-tokenization applied to corpus lines before word splitting.

pub mod normalize;

pub use normalize::{NormalizationForm, Normalizer};
