//! The public metadata record and the translation that produces it.
//!
//! # Architecture
//!
//! Mirrors the DTO/adapter split used for every external JSON source:
//! - **DTO** (`dto.rs`) - the exact shape of MediaInfo's JSON report
//! - **Field table** (`fields.rs`) - which analyzer keys become which public fields
//! - **Coercion** (`coerce.rs`) - best-effort string/number to typed number
//! - **Adapter** (`adapter.rs`) - the only place DTOs turn into a [`MetadataRecord`]
//!
//! If MediaInfo changes its output, only `dto.rs` and `fields.rs` move.

pub mod adapter;
pub mod coerce;
pub mod dto;
pub mod fields;

pub use adapter::translate;
pub use fields::{Field, Namespace};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Analyzer values collected under their public field, before coercion.
pub type FlatRecord = HashMap<Field, Value>;

/// Track metadata extracted from one media file.
///
/// Every field is optional: a missing tag is `None`, never `""` or `0`.
/// Serialises with the plugin's camelCase field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub track_name: Option<String>,
    /// Performers, split on `/`
    pub track_artist_names: Option<Vec<String>>,
    pub album_name: Option<String>,
    pub album_artist_name: Option<String>,
    pub track_number: Option<u32>,
    /// Total tracks on the album
    pub album_length: Option<u32>,
    pub year: Option<i32>,
    pub disc_number: Option<u32>,
    /// Overall bitrate in bits per second
    pub bitrate: Option<u64>,
    pub bpm: Option<u32>,
    pub channels: Option<u32>,
    /// Sample rate in Hz
    pub sample_rate: Option<u32>,
    /// Duration in seconds, as reported by the analyzer
    pub track_duration: Option<f64>,
    pub genre: Option<String>,
    pub author_name: Option<String>,
    pub writer_name: Option<String>,
    pub mime_type: Option<String>,
    pub album_art_mime_type: Option<String>,
    pub comment: Option<String>,
    /// Raw embedded cover image
    #[serde(default, with = "art_base64", skip_serializing_if = "Option::is_none")]
    pub album_art: Option<Vec<u8>>,
    /// Source file; only set by path-based extractors
    pub file_path: Option<String>,
}

impl MetadataRecord {
    /// Build a record from translated analyzer values.
    ///
    /// Numeric fields go through [`coerce`]; anything unparseable is `None`.
    pub fn from_fields(fields: &FlatRecord, album_art: Option<Vec<u8>>) -> Self {
        let get = |field: Field| fields.get(&field);

        Self {
            track_name: text(get(Field::TrackName)),
            track_artist_names: text(get(Field::TrackArtistNames)).map(|s| split_artists(&s)),
            album_name: text(get(Field::AlbumName)),
            album_artist_name: text(get(Field::AlbumArtistName)),
            track_number: coerce::integer(get(Field::TrackNumber)),
            album_length: coerce::integer(get(Field::AlbumLength)),
            year: coerce::year(get(Field::Year)),
            // not in the mapping table; only native extractors fill these
            disc_number: None,
            author_name: None,
            bitrate: coerce::integer(get(Field::Bitrate)),
            bpm: coerce::integer(get(Field::Bpm)),
            channels: coerce::integer(get(Field::Channels)),
            sample_rate: coerce::integer(get(Field::SampleRate)),
            track_duration: coerce::decimal(get(Field::TrackDuration)),
            genre: text(get(Field::Genre)),
            writer_name: text(get(Field::WriterName)),
            mime_type: text(get(Field::MimeType)),
            album_art_mime_type: text(get(Field::AlbumArtMimeType)),
            comment: text(get(Field::Comment)),
            album_art,
            file_path: None,
        }
    }

    /// Track duration as a [`Duration`], if known and non-negative.
    pub fn duration(&self) -> Option<Duration> {
        self.track_duration
            .filter(|secs| *secs >= 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

/// Split a performer string on `/` into an ordered list.
///
/// Names that themselves contain a slash ("AC/DC") are split too; MediaInfo
/// gives no way to tell the two apart.
pub fn split_artists(raw: &str) -> Vec<String> {
    raw.split('/').map(|name| name.trim().to_string()).collect()
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Serialises cover bytes as a base64 string so JSON output stays compact.
mod art_base64 {
    use base64::prelude::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_str(&BASE64_STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|encoded| BASE64_STANDARD.decode(encoded).map_err(serde::de::Error::custom))
            .transpose()
    }
}
