//! Extraction error types.
//!
//! Library modules return [`Result`] built on `thiserror`; the CLI wraps
//! these in `anyhow` for convenient propagation to `main`.
//!
//! Every variant except cover-art decoding surfaces to the caller as a
//! single failed outcome. A malformed `Cover_Data` payload is only logged
//! (see [`crate::metadata::adapter`]) and never becomes an `Error`.
//!
//! # Example
//!
//! ```ignore
//! use media_probe::error::{Error, Result};
//!
//! fn translate(json: &str) -> Result<MetadataRecord> {
//!     let report = parse_report(json)?; // serde_json errors auto-convert
//!     ...
//! }
//! ```

use std::time::Duration;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can make an extraction fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The call is not available on this platform variant
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// The external analyzer could not be constructed
    #[error("Analyzer unavailable: {0}")]
    DependencyUnavailable(String),

    /// The analyzer reported an error or broke its callback contract
    #[error("Analyzer failed: {0}")]
    Analyzer(String),

    /// No result arrived within the configured bound
    #[error("Analyzer did not produce a result within {0:?}")]
    Timeout(Duration),

    /// The report parsed but held no "General" track record
    #[error("No metadata found")]
    NoMetadata,

    /// The report is valid JSON but not the expected `media.track` shape
    #[error("Malformed analyzer result: {0}")]
    MalformedResult(String),

    /// The report is not valid JSON
    #[error("Failed to parse analyzer result: {0}")]
    Parse(#[from] serde_json::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unsupported-operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Create a dependency-unavailable error.
    pub fn dependency(message: impl Into<String>) -> Self {
        Self::DependencyUnavailable(message.into())
    }

    /// Create an analyzer-failure error.
    pub fn analyzer(message: impl Into<String>) -> Self {
        Self::Analyzer(message.into())
    }

    /// Create a malformed-result error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResult(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::dependency("mediainfo not found");
        assert!(err.to_string().contains("mediainfo not found"));
    }

    #[test]
    fn test_timeout_display_includes_bound() {
        let err = Error::Timeout(Duration::from_secs(30));
        assert!(err.to_string().contains("30s"));
    }

    #[test]
    fn test_parse_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_no_metadata_message() {
        assert_eq!(Error::NoMetadata.to_string(), "No metadata found");
    }
}
