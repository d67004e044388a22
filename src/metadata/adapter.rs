//! Adapter layer: convert a MediaInfo report into a [`MetadataRecord`]
//!
//! This is the ONLY place where report DTOs are converted to the public record.

use base64::prelude::*;
use serde_json::{Map, Value};

use super::dto::{self, TrackKind};
use super::fields::{self, COVER_DATA_KEY, Namespace};
use super::{FlatRecord, MetadataRecord};
use crate::error::{Error, Result};

/// MediaInfo joins several embedded pictures with this separator.
const COVER_SEPARATOR: &str = " / ";

/// Translate the analyzer's raw JSON output into a record.
///
/// Invalid JSON is a [`Error::Parse`]; valid JSON of the wrong shape is a
/// [`Error::MalformedResult`]; a report without a "General" record is
/// [`Error::NoMetadata`].
pub fn translate(json: &str) -> Result<MetadataRecord> {
    let value: Value = serde_json::from_str(json)?;
    let report: dto::Report =
        serde_json::from_value(value).map_err(|e| Error::malformed(e.to_string()))?;
    to_record(report)
}

/// Convert a parsed report into a record.
pub fn to_record(report: dto::Report) -> Result<MetadataRecord> {
    let records = report.media.map(|m| m.track).unwrap_or_default();

    let mut flat = FlatRecord::new();
    let mut album_art = None;
    let mut saw_general = false;

    // Later records overwrite earlier ones field by field
    for record in records {
        match record.kind {
            TrackKind::General => {
                saw_general = true;
                if let Some(cover) = record.fields.get(COVER_DATA_KEY) {
                    album_art = decode_cover(cover).or(album_art);
                }
                apply_table(&mut flat, Namespace::General, &record.fields);
            }
            TrackKind::Audio => apply_table(&mut flat, Namespace::Audio, &record.fields),
            TrackKind::Other => {}
        }
    }

    if !saw_general {
        return Err(Error::NoMetadata);
    }

    tracing::debug!(
        fields = flat.len(),
        has_cover = album_art.is_some(),
        "Translated analyzer report"
    );

    Ok(MetadataRecord::from_fields(&flat, album_art))
}

/// Copy every mapped analyzer field of one record into the flat output.
fn apply_table(flat: &mut FlatRecord, namespace: Namespace, record: &Map<String, Value>) {
    for (field, key) in fields::table(namespace) {
        if let Some(value) = record.get(*key) {
            flat.insert(*field, value.clone());
        }
    }
}

/// Decode the first picture of a `Cover_Data` value.
///
/// A bad payload only costs the cover: it is logged and dropped.
fn decode_cover(value: &Value) -> Option<Vec<u8>> {
    let Some(encoded) = value.as_str() else {
        tracing::warn!("Ignoring non-string {} value", COVER_DATA_KEY);
        return None;
    };

    let first = encoded.split(COVER_SEPARATOR).next().unwrap_or_default().trim();

    match BASE64_STANDARD.decode(first) {
        Ok(bytes) if !bytes.is_empty() => Some(bytes),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Failed to decode embedded cover art: {}", e);
            None
        }
    }
}
