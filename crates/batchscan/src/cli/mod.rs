//! CLI module for Batch Scanner
//!
//! The interactive scanner lives in [`tui`]; `lookup`, `check` and `config`
//! are headless commands for scripting and troubleshooting.

pub mod error;
pub mod output;

pub mod check;
pub mod config;
pub mod lookup;

pub mod tui;

pub use error::HelpfulError;
