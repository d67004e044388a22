//! Extraction entry point.
//!
//! One call walks `Idle -> AnalyzerStarting -> Analyzing -> Translating` and
//! ends in `Completed` or `Failed`. The analyzer's report, a dropped sink and
//! the timeout all race to resolve the call through a single [`Deferred`];
//! whichever comes first decides the outcome.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::analyzer::{
    AnalyzerFactory, AnalyzerOptions, BufferSource, ChunkSource, DEFAULT_CHUNK_SIZE, MediaInfoCli,
    ResultSink,
};
use crate::deferred::Deferred;
use crate::error::{Error, Result};
use crate::metadata::{self, MetadataRecord};

/// Default bound on how long the analyzer may take.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-call extraction settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOptions {
    /// Bytes handed to the analyzer per read
    pub chunk_size: usize,
    /// Give up after this long (`None` waits forever)
    pub timeout: Option<Duration>,
    /// Ask the analyzer for embedded cover art
    pub cover_data: bool,
    /// Full analysis rather than the summary
    pub full: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout: Some(DEFAULT_TIMEOUT),
            cover_data: true,
            full: true,
        }
    }
}

impl ExtractionOptions {
    /// Options the analyzer is constructed with.
    pub fn analyzer_options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            chunk_size: self.chunk_size.max(1),
            cover_data: self.cover_data,
            full: self.full,
            ..Default::default()
        }
    }
}

/// Uniform call surface for metadata extraction.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Extract metadata from an in-memory media file.
    async fn from_bytes(&self, bytes: Vec<u8>) -> Result<MetadataRecord>;

    /// Extract metadata from a file on disk.
    async fn from_path(&self, path: &Path) -> Result<MetadataRecord>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    AnalyzerStarting,
    Analyzing,
    Translating,
    Completed,
    Failed,
}

/// Phase bookkeeping for one extraction call.
struct Call {
    phase: Phase,
}

impl Call {
    fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    fn enter(&mut self, next: Phase) {
        tracing::debug!("Extraction {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    fn fail<T>(&mut self, error: Error) -> Result<T> {
        tracing::debug!("Extraction failed while {:?}: {}", self.phase, error);
        self.enter(Phase::Failed);
        Err(error)
    }
}

/// Drives an analyzer over a byte buffer and translates its report.
pub struct Extractor<F> {
    factory: F,
    options: ExtractionOptions,
}

impl Extractor<MediaInfoCli> {
    /// Extractor backed by the installed `mediainfo` tool.
    pub fn mediainfo(options: ExtractionOptions) -> Self {
        Self::new(MediaInfoCli::new(), options)
    }
}

impl<F: AnalyzerFactory> Extractor<F> {
    pub fn new(factory: F, options: ExtractionOptions) -> Self {
        Self { factory, options }
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Run one extraction over `bytes`.
    pub async fn extract_bytes(&self, bytes: Vec<u8>) -> Result<MetadataRecord> {
        let mut call = Call::new();
        tracing::debug!(len = bytes.len(), "Starting extraction");

        call.enter(Phase::AnalyzerStarting);
        let analyzer = match self
            .factory
            .create(&self.options.analyzer_options())
            .await
        {
            Ok(analyzer) => analyzer,
            Err(e) => return call.fail(e),
        };

        call.enter(Phase::Analyzing);
        let source: Arc<dyn ChunkSource> = Arc::new(BufferSource::new(bytes));
        let (deferred, mut outcome) = Deferred::new();
        let run = analyzer.run(source, ResultSink::new(Arc::clone(&deferred)));
        tokio::pin!(run);

        let limit = self.options.timeout;
        let deadline = sleep(limit.unwrap_or_default());
        tokio::pin!(deadline);

        let mut running = true;
        let mut expired = false;
        let reported = loop {
            tokio::select! {
                result = &mut outcome => {
                    break result.unwrap_or_else(|_| Err(Error::analyzer("result channel closed")));
                }
                () = &mut run, if running => {
                    running = false;
                }
                () = &mut deadline, if limit.is_some() && !expired => {
                    expired = true;
                    let limit = limit.unwrap_or_default();
                    if deferred.settle(Err(Error::Timeout(limit))) {
                        tracing::warn!("Analyzer timed out after {:?}", limit);
                    }
                }
            }
        };

        let json = match reported {
            Ok(json) => json,
            Err(e) => return call.fail(e),
        };

        call.enter(Phase::Translating);
        match metadata::translate(&json) {
            Ok(record) => {
                call.enter(Phase::Completed);
                Ok(record)
            }
            Err(e) => call.fail(e),
        }
    }
}

#[async_trait]
impl<F: AnalyzerFactory> MetadataSource for Extractor<F> {
    async fn from_bytes(&self, bytes: Vec<u8>) -> Result<MetadataRecord> {
        self.extract_bytes(bytes).await
    }

    async fn from_path(&self, path: &Path) -> Result<MetadataRecord> {
        Err(Error::unsupported(format!(
            "extracting from a path is not supported, read {} into memory and use from_bytes",
            path.display()
        )))
    }
}

/// Extract metadata with the installed `mediainfo` tool and default options.
pub async fn extract(bytes: Vec<u8>) -> Result<MetadataRecord> {
    Extractor::mediainfo(ExtractionOptions::default())
        .extract_bytes(bytes)
        .await
}
