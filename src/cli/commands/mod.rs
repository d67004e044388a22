//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `extract`: metadata extraction from a media file
//! - `tools`: mapping table, analyzer and config diagnostics

mod extract;
mod tools;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use extract::cmd_extract;
pub use tools::{cmd_check_tools, cmd_config, cmd_fields};

/// Media Probe CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Extract metadata from a media file
    Extract {
        /// Path to the media file
        path: PathBuf,
        /// Analyzer timeout in seconds (0 = wait forever)
        #[arg(long, env = "MEDIA_PROBE_TIMEOUT")]
        timeout: Option<u64>,
        /// Bytes handed to the analyzer per read
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Skip embedded cover art
        #[arg(long)]
        no_cover: bool,
        /// Write the embedded cover image to this file
        #[arg(long)]
        save_cover: Option<PathBuf>,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the fields surfaced from the analyzer report
    Fields,
    /// Check if the mediainfo tool is installed
    CheckTools,
    /// Show the config file location and effective settings
    Config,
}

/// Overrides from the `extract` command line.
#[derive(Debug, Default)]
pub struct ExtractArgs {
    pub timeout: Option<u64>,
    pub chunk_size: Option<usize>,
    pub no_cover: bool,
    pub save_cover: Option<PathBuf>,
    pub json: bool,
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified.
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Some(Commands::Extract {
            path,
            timeout,
            chunk_size,
            no_cover,
            save_cover,
            json,
        }) => {
            let rt = Runtime::new()?;
            let args = ExtractArgs {
                timeout: *timeout,
                chunk_size: *chunk_size,
                no_cover: *no_cover,
                save_cover: save_cover.clone(),
                json: *json,
            };
            cmd_extract(&rt, path, &args)?;
            Ok(true)
        }
        Some(Commands::Fields) => {
            cmd_fields();
            Ok(true)
        }
        Some(Commands::CheckTools) => {
            let rt = Runtime::new()?;
            cmd_check_tools(&rt)?;
            Ok(true)
        }
        Some(Commands::Config) => {
            cmd_config()?;
            Ok(true)
        }
        None => Ok(false),
    }
}

pub(crate) fn print_mediainfo_install_instructions() {
    eprintln!("Error: mediainfo not found.");
    eprintln!("Install MediaInfo:");
    eprintln!("  Windows: winget install MediaArea.MediaInfo");
    eprintln!("  macOS:   brew install media-info");
    eprintln!("  Linux:   apt install mediainfo");
    eprintln!("Or set [mediainfo] program in the config file.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_flags() {
        let cli = Cli::parse_from([
            "media-probe",
            "extract",
            "song.mp3",
            "--timeout",
            "5",
            "--no-cover",
            "--json",
        ]);
        match cli.command {
            Some(Commands::Extract {
                path,
                timeout,
                no_cover,
                json,
                chunk_size,
                save_cover,
            }) => {
                assert_eq!(path, PathBuf::from("song.mp3"));
                assert_eq!(timeout, Some(5));
                assert!(no_cover);
                assert!(json);
                assert_eq!(chunk_size, None);
                assert_eq!(save_cover, None);
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["media-probe"]);
        assert!(cli.command.is_none());
        assert!(!run_command(&cli).unwrap());
    }
}
