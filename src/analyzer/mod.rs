//! Boundary to the external media analyzer.
//!
//! The analyzer is an opaque component (MediaInfo) that pulls the input
//! through a chunked read protocol and answers with a single JSON report.
//! Nothing in here knows what the report means; that is the job of
//! [`crate::metadata`].
//!
//! - `source.rs` - the in-memory [`ChunkSource`] handed to analyzers
//! - `traits.rs` - [`AnalyzerFactory`], [`Analyzer`] and the [`ResultSink`]
//! - `mediainfo.rs` - analyzer backed by the `mediainfo` command-line tool

pub mod mediainfo;
pub mod source;
pub mod traits;

pub use mediainfo::MediaInfoCli;
pub use source::BufferSource;
pub use traits::{Analyzer, AnalyzerFactory, ChunkSource, ResultSink};

/// Default number of bytes handed to the analyzer per read.
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

/// Report format requested from the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
}

impl OutputFormat {
    /// Name as MediaInfo spells it in its `Output` option.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON",
        }
    }
}

/// Options an analyzer is constructed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Bytes requested per `read_chunk` call
    pub chunk_size: usize,
    /// Include embedded cover art (base64) in the report
    pub cover_data: bool,
    /// Report format
    pub format: OutputFormat,
    /// Full analysis (every field, not just the summary)
    pub full: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            cover_data: true,
            format: OutputFormat::Json,
            full: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = AnalyzerOptions::default();
        assert_eq!(options.chunk_size, 262_144);
        assert!(options.cover_data);
        assert!(options.full);
        assert_eq!(options.format.as_str(), "JSON");
    }
}
