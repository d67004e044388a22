//! Command-line interface for media-probe.
//!
//! This module provides CLI commands for extracting metadata from media
//! files and checking the analyzer installation.

mod commands;

pub use commands::{Cli, Commands, run_command};
