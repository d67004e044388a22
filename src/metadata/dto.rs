//! MediaInfo JSON report Data Transfer Objects
//!
//! These types match what `MediaInfo` emits with `Output=JSON`.
//! Only the envelope is typed; track records stay an open key/value map
//! because MediaInfo's field set varies per container and per version.
//! DO NOT use these types outside the metadata module - convert via the adapter.
//!
//! Example report:
//! ```json
//! {
//!   "creatingLibrary": {"name": "MediaInfoLib", "version": "24.06"},
//!   "media": {
//!     "@ref": "",
//!     "track": [
//!       {"@type": "General", "Track": "Song", "Performer": "Artist", "Duration": "245.317"},
//!       {"@type": "Audio", "Channels": "2", "SamplingRate": "44100"}
//!     ]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level analyzer report
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Report {
    /// Absent (or `null`) when MediaInfo recognised nothing at all
    #[serde(default)]
    pub media: Option<Media>,
}

/// The analyzed input
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Media {
    /// Input reference (file name or empty for in-memory input)
    #[serde(rename = "@ref", default)]
    pub reference: Option<String>,
    /// Track records in analyzer order
    #[serde(default)]
    pub track: Vec<TrackRecord>,
}

/// One tagged record in `media.track`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackRecord {
    #[serde(rename = "@type")]
    pub kind: TrackKind,
    /// Every other key, analyzer-native names to JSON scalars
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Record discriminant. Kinds this crate doesn't read collapse to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum TrackKind {
    General,
    Audio,
    #[serde(other)]
    Other,
}

// ============================================================================
// CONTRACT TESTS
// These pin the report shapes MediaInfo actually produces.
// If these fail, the output format has changed and the DTOs need updating.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    /// Typical single-audio-stream file
    #[test]
    fn test_parse_general_and_audio() {
        let json = r#"{
            "creatingLibrary": {"name": "MediaInfoLib", "version": "24.06", "url": "https://mediaarea.net/MediaInfo"},
            "media": {
                "@ref": "",
                "track": [
                    {"@type": "General", "Track": "Song", "Duration": "245.317", "OverallBitRate": "320000"},
                    {"@type": "Audio", "Channels": "2", "SamplingRate": "44100"}
                ]
            }
        }"#;

        let report: Report = serde_json::from_str(json).expect("Should parse report");
        let media = report.media.expect("media present");

        assert_eq!(media.reference.as_deref(), Some(""));
        assert_eq!(media.track.len(), 2);
        assert_eq!(media.track[0].kind, TrackKind::General);
        assert_eq!(media.track[0].fields["Track"], "Song");
        assert!(!media.track[0].fields.contains_key("@type"));
        assert_eq!(media.track[1].kind, TrackKind::Audio);
    }

    /// Video, Image, Menu, Text records are tolerated and ignored
    #[test]
    fn test_unknown_track_kinds_collapse_to_other() {
        let json = r#"{"media": {"track": [
            {"@type": "Video", "Width": "1920"},
            {"@type": "Image", "Format": "JPEG"},
            {"@type": "Menu"}
        ]}}"#;

        let report: Report = serde_json::from_str(json).expect("Should parse");
        let kinds: Vec<_> = report.media.unwrap().track.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TrackKind::Other; 3]);
    }

    /// Unrecognised input: MediaInfo emits `"media": null`
    #[test]
    fn test_null_media() {
        let report: Report = serde_json::from_str(r#"{"media": null}"#).expect("Should parse");
        assert!(report.media.is_none());

        let report: Report = serde_json::from_str("{}").expect("Should parse");
        assert!(report.media.is_none());
    }

    /// Nested `extra` objects stay in the open field map
    #[test]
    fn test_extra_object_kept_as_field() {
        let json = r#"{"media": {"track": [
            {"@type": "General", "extra": {"ITUNESADVISORY": "0"}}
        ]}}"#;

        let report: Report = serde_json::from_str(json).expect("Should parse");
        let general = &report.media.unwrap().track[0];
        assert!(general.fields["extra"].is_object());
    }

    #[test]
    fn test_record_without_type_is_rejected() {
        let json = r#"{"media": {"track": [{"Track": "Song"}]}}"#;
        assert!(serde_json::from_str::<Report>(json).is_err());
    }

    #[test]
    fn test_track_not_a_sequence_is_rejected() {
        let json = r#"{"media": {"track": "General"}}"#;
        assert!(serde_json::from_str::<Report>(json).is_err());
    }
}
