//! Corpus loading and merge-rule persistence.

pub mod load;
pub mod save;

pub use load::open_corpus;
pub use save::RulesSaver;
