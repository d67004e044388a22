//! Metadata extraction command.

use anyhow::Context;
use std::path::Path;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::config;
use crate::error::Error;
use crate::extract::{ExtractionOptions, Extractor};
use crate::metadata::MetadataRecord;

use super::{ExtractArgs, print_mediainfo_install_instructions};

/// Extract and print metadata for one media file
pub fn cmd_extract(rt: &Runtime, path: &Path, args: &ExtractArgs) -> anyhow::Result<()> {
    let config = config::load();
    let options = apply_overrides(ExtractionOptions::from(&config), args);

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    tracing::debug!("Read {} bytes from {:?}", bytes.len(), path);

    let extractor = Extractor::new(config.mediainfo(), options);
    let record = match rt.block_on(extractor.extract_bytes(bytes)) {
        Ok(record) => record,
        Err(e @ Error::DependencyUnavailable(_)) => {
            print_mediainfo_install_instructions();
            return Err(e.into());
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to extract metadata from {:?}", path)),
    };

    if let Some(ref cover_path) = args.save_cover {
        match record.album_art {
            Some(ref art) => {
                std::fs::write(cover_path, art)
                    .with_context(|| format!("Failed to write cover to {:?}", cover_path))?;
                eprintln!("Saved cover ({} bytes) to {:?}", art.len(), cover_path);
            }
            None => eprintln!("No embedded cover art found"),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("File: {:?}", path);
        println!();
        print_record(&record);
    }

    Ok(())
}

/// Command-line flags win over the config file.
fn apply_overrides(mut options: ExtractionOptions, args: &ExtractArgs) -> ExtractionOptions {
    if let Some(secs) = args.timeout {
        options.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    if let Some(size) = args.chunk_size {
        options.chunk_size = size.max(1);
    }
    if args.no_cover {
        options.cover_data = false;
    }
    options
}

fn print_record(record: &MetadataRecord) {
    let line = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            println!("  {:<14}{}", format!("{}:", label), value);
        }
    };

    line("Title", record.track_name.clone());
    line("Artists", record.track_artist_names.as_ref().map(|a| a.join(", ")));
    line("Album", record.album_name.clone());
    line("Album artist", record.album_artist_name.clone());
    line(
        "Track",
        record.track_number.map(|n| match record.album_length {
            Some(total) => format!("{}/{}", n, total),
            None => n.to_string(),
        }),
    );
    line("Year", record.year.map(|y| y.to_string()));
    line("Genre", record.genre.clone());
    line("Writer", record.writer_name.clone());
    line("Duration", record.duration().map(format_duration));
    line("Bitrate", record.bitrate.map(|b| format!("{} kbps", b / 1000)));
    line("Sample rate", record.sample_rate.map(|r| format!("{} Hz", r)));
    line("Channels", record.channels.map(|c| c.to_string()));
    line("BPM", record.bpm.map(|b| b.to_string()));
    line("MIME type", record.mime_type.clone());
    line("Comment", record.comment.clone());
    line(
        "Cover",
        record.album_art.as_ref().map(|art| {
            let mime = record.album_art_mime_type.as_deref().unwrap_or("unknown type");
            format!("{} bytes ({})", art.len(), mime)
        }),
    );
}

/// `m:ss` (or `h:mm:ss` for long tracks).
fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
