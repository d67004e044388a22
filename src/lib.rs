//! Media Probe - media metadata extraction backed by MediaInfo.
//!
//! Raw media bytes are fed to the MediaInfo analyzer through a chunked,
//! pull-based read protocol. Its JSON report is remapped into a small typed
//! [`MetadataRecord`] (track name, artists, album, duration, cover art, ...).
//!
//! ```ignore
//! let bytes = std::fs::read("song.mp3")?;
//! let record = media_probe::extract(bytes).await?;
//! println!("{:?} by {:?}", record.track_name, record.track_artist_names);
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod deferred;
pub mod error;
pub mod extract;
pub mod metadata;

pub use error::{Error, Result};
pub use extract::{ExtractionOptions, Extractor, MetadataSource, extract};
pub use metadata::MetadataRecord;
