//! CLI module for khoj.
//!
//! This module provides the command-line interface:
//! - Argument parsing
//! - Command handlers
//! - Terminal rendering of progress, transcripts, and listings
//!
//! # Usage
//!
//! ```ignore
//! use khoj::cli::{parse_args, run_command};
//!
//! let invocation = parse_args(std::env::args())?;
//! let config = ClientConfig::resolve(invocation.api_url.as_deref());
//! run_command(invocation.command, config, &store).await?;
//! ```

pub mod args;
pub mod commands;
pub mod render;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, Invocation};
pub use commands::{run_command, USAGE};
pub use version::VERSION;
