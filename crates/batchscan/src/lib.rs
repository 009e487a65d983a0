//! Batch Scanner library.
//!
//! The binary's TUI and headless commands are thin layers over these
//! modules:
//!
//! - [`scan`]: validate input, look up the batch, export it
//! - [`export`]: CSV file naming, target directory, writing
//! - [`settings`]: TOML configuration with environment overrides

pub mod export;
pub mod scan;
pub mod settings;
