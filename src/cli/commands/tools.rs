//! Mapping table, tool and config diagnostics.

use tokio::runtime::Runtime;

use crate::config;
use crate::metadata::{Namespace, fields};

use super::print_mediainfo_install_instructions;

/// Print the public field to analyzer key mapping
pub fn cmd_fields() {
    for (namespace, title) in [(Namespace::General, "General"), (Namespace::Audio, "Audio")] {
        println!("{} record:", title);
        for (field, key) in fields::table(namespace) {
            println!("  {:<18} <- {}", field.public_name(), key);
        }
        println!();
    }
    println!("albumArt <- {} (base64, General record)", fields::COVER_DATA_KEY);
}

/// Check if the analyzer tool is available
pub fn cmd_check_tools(rt: &Runtime) -> anyhow::Result<()> {
    println!("Checking analyzer tools...\n");

    let mediainfo = config::load().mediainfo();
    match mediainfo.locate() {
        Some(path) => {
            let version = rt
                .block_on(mediainfo.version())
                .unwrap_or_else(|| "unknown version".to_string());
            println!("✓ mediainfo: {} ({})", version, path.display());
        }
        None => {
            println!("✗ mediainfo: NOT FOUND");
            print_mediainfo_install_instructions();
        }
    }

    Ok(())
}

/// Show config file location and effective settings
pub fn cmd_config() -> anyhow::Result<()> {
    match config::config_path() {
        Some(path) => {
            let state = if path.exists() { "" } else { " (not created, using defaults)" };
            println!("Config file: {}{}", path.display(), state);
        }
        None => println!("Config file: no config directory on this system"),
    }
    println!();
    print!("{}", toml::to_string_pretty(&config::load())?);
    Ok(())
}
