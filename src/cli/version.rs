//! Version information for the khoj CLI.

/// The current version of khoj, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
