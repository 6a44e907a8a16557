//! CLI argument parsing

pub mod args;

// Re-exports
pub use args::{Args, Commands, LogFormat, RunArgs, Selection, Shell};
