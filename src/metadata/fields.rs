//! Field-mapping table between public record fields and MediaInfo keys.
//!
//! MediaInfo reports hundreds of fields per track record; only the ones
//! listed here are surfaced. The table is split by record namespace because
//! the same analyzer key can mean different things on a "General" record and
//! on an "Audio" record.

use std::fmt;

/// Which analyzer record a mapping applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    General,
    Audio,
}

/// A public field of [`super::MetadataRecord`] that the analyzer can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    TrackName,
    TrackArtistNames,
    AlbumName,
    AlbumArtistName,
    TrackNumber,
    AlbumLength,
    Year,
    Genre,
    WriterName,
    TrackDuration,
    Bitrate,
    MimeType,
    AlbumArtMimeType,
    Bpm,
    Comment,
    Channels,
    SampleRate,
}

impl Field {
    /// The plugin's public (camelCase) name for this field.
    pub fn public_name(self) -> &'static str {
        match self {
            Field::TrackName => "trackName",
            Field::TrackArtistNames => "trackArtistNames",
            Field::AlbumName => "albumName",
            Field::AlbumArtistName => "albumArtistName",
            Field::TrackNumber => "trackNumber",
            Field::AlbumLength => "albumLength",
            Field::Year => "year",
            Field::Genre => "genre",
            Field::WriterName => "writerName",
            Field::TrackDuration => "trackDuration",
            Field::Bitrate => "bitrate",
            Field::MimeType => "mimeType",
            Field::AlbumArtMimeType => "albumArtMimeType",
            Field::Bpm => "bpm",
            Field::Comment => "comment",
            Field::Channels => "channels",
            Field::SampleRate => "sampleRate",
        }
    }

    /// The analyzer record this field is read from.
    pub fn namespace(self) -> Namespace {
        match self {
            Field::Channels | Field::SampleRate => Namespace::Audio,
            _ => Namespace::General,
        }
    }

    /// The analyzer key this field is read from.
    pub fn analyzer_key(self) -> &'static str {
        table(self.namespace())
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, key)| *key)
            .unwrap_or_default()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.public_name())
    }
}

/// Track-level fields read from the "General" record.
pub static GENERAL_FIELDS: &[(Field, &str)] = &[
    (Field::TrackName, "Track"),
    (Field::TrackArtistNames, "Performer"),
    (Field::AlbumName, "Album"),
    (Field::AlbumArtistName, "Album_Performer"),
    (Field::TrackNumber, "Track_Position"),
    (Field::AlbumLength, "Track_Position_Total"),
    (Field::Year, "Recorded_Date"),
    (Field::Genre, "Genre"),
    (Field::WriterName, "WrittenBy"),
    (Field::TrackDuration, "Duration"),
    (Field::Bitrate, "OverallBitRate"),
    (Field::MimeType, "InternetMediaType"),
    (Field::AlbumArtMimeType, "Cover_Mime"),
    (Field::Bpm, "BPM"),
    (Field::Comment, "Comment"),
];

/// Stream-level fields read from the "Audio" record.
pub static AUDIO_FIELDS: &[(Field, &str)] = &[
    (Field::Channels, "Channels"),
    (Field::SampleRate, "SamplingRate"),
];

/// Analyzer key holding the base64 cover art on the "General" record.
pub const COVER_DATA_KEY: &str = "Cover_Data";

/// The mapping table for one namespace.
pub fn table(namespace: Namespace) -> &'static [(Field, &'static str)] {
    match namespace {
        Namespace::General => GENERAL_FIELDS,
        Namespace::Audio => AUDIO_FIELDS,
    }
}

/// Reverse lookup: which public field an analyzer key maps to, if any.
pub fn field_for(namespace: Namespace, analyzer_key: &str) -> Option<Field> {
    table(namespace)
        .iter()
        .find(|(_, key)| *key == analyzer_key)
        .map(|(field, _)| *field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_general_lookup_both_directions() {
        assert_eq!(field_for(Namespace::General, "Album_Performer"), Some(Field::AlbumArtistName));
        assert_eq!(Field::AlbumArtistName.analyzer_key(), "Album_Performer");
        assert_eq!(Field::AlbumArtistName.namespace(), Namespace::General);
    }

    #[test]
    fn test_audio_keys_not_visible_in_general() {
        assert_eq!(field_for(Namespace::General, "SamplingRate"), None);
        assert_eq!(field_for(Namespace::Audio, "SamplingRate"), Some(Field::SampleRate));
    }

    #[test]
    fn test_unlisted_key_not_surfaced() {
        assert_eq!(field_for(Namespace::General, "Encoded_Library"), None);
        assert_eq!(field_for(Namespace::General, COVER_DATA_KEY), None);
    }

    #[test]
    fn test_every_field_mapped_exactly_once() {
        let all: Vec<Field> = GENERAL_FIELDS
            .iter()
            .chain(AUDIO_FIELDS)
            .map(|(field, _)| *field)
            .collect();
        let unique: HashSet<Field> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
        assert_eq!(all.len(), 17);
        for field in all {
            assert!(!field.analyzer_key().is_empty(), "{} has no key", field);
        }
    }

    #[test]
    fn test_public_names_are_camel_case() {
        assert_eq!(Field::TrackArtistNames.to_string(), "trackArtistNames");
        assert_eq!(Field::Bpm.public_name(), "bpm");
    }
}
