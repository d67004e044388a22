//! Media Probe - extract track metadata from media files.
//!
//! Run `media-probe extract <FILE>` to print a file's metadata, or
//! `media-probe check-tools` to verify the MediaInfo installation.

use clap::{CommandFactory, Parser};
use media_probe::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("media_probe=info".parse()?))
        .init();

    if !cli::run_command(&args)? {
        // No command specified
        cli::Cli::command().print_help()?;
    }

    Ok(())
}
