//! CLI commands for bpelearn.

pub mod inspect;
pub mod train;

pub use inspect::InspectCommand;
pub use train::TrainCommand;
