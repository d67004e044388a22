//! Trait definitions for the analyzer boundary.
//!
//! These traits keep analyzer-specific calling conventions out of the
//! extraction flow and let tests substitute scripted analyzers.
//!
//! # Protocol
//!
//! 1. The extractor asks an [`AnalyzerFactory`] for an [`Analyzer`] built with
//!    the call's [`AnalyzerOptions`]. Construction failure means the analyzer
//!    is not usable at all.
//! 2. [`Analyzer::run`] pulls the input through the [`ChunkSource`] and reports
//!    exactly one outcome on the [`ResultSink`].
//! 3. Dropping every clone of the sink without reporting fails the call.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use super::AnalyzerOptions;
use crate::deferred::Deferred;
use crate::error::{Error, Result};

/// Pull-based access to the input bytes.
#[async_trait]
pub trait ChunkSource: Send + Sync {
    /// Total number of bytes.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes `[offset, offset + size)`, clamped to the end.
    ///
    /// An empty result signals end of input; this never fails.
    async fn read_chunk(&self, size: usize, offset: u64) -> Vec<u8>;
}

/// Constructs analyzer instances, one per extraction call.
#[async_trait]
pub trait AnalyzerFactory: Send + Sync {
    /// Build an analyzer, or fail with [`Error::DependencyUnavailable`].
    async fn create(&self, options: &AnalyzerOptions) -> Result<Box<dyn Analyzer>>;
}

/// One analysis of one input.
#[async_trait]
pub trait Analyzer: Send {
    /// Consume the input and report the JSON report (or a failure) on `sink`.
    async fn run(self: Box<Self>, source: Arc<dyn ChunkSource>, sink: ResultSink);
}

/// Where an analyzer reports its single outcome.
///
/// Clones share one underlying result; only the first report counts.
#[derive(Clone)]
pub struct ResultSink {
    inner: Arc<SinkInner>,
}

struct SinkInner {
    deferred: Arc<Deferred<Result<String>>>,
}

impl Drop for SinkInner {
    fn drop(&mut self) {
        if self
            .deferred
            .settle(Err(Error::analyzer("analyzer finished without producing a result")))
        {
            tracing::warn!("Analyzer dropped its result sink without reporting");
        }
    }
}

impl ResultSink {
    pub(crate) fn new(deferred: Arc<Deferred<Result<String>>>) -> Self {
        Self {
            inner: Arc::new(SinkInner { deferred }),
        }
    }

    /// Report the analyzer's JSON output. Returns `false` if the call was
    /// already resolved (e.g. timed out), in which case `json` is discarded.
    pub fn complete(&self, json: String) -> bool {
        let accepted = self.inner.deferred.settle(Ok(json));
        if !accepted {
            tracing::debug!("Ignoring analyzer result for an already resolved call");
        }
        accepted
    }

    /// Report an analyzer failure. Returns `false` if the call was already resolved.
    pub fn fail(&self, error: Error) -> bool {
        let accepted = self.inner.deferred.settle(Err(error));
        if !accepted {
            tracing::debug!("Ignoring analyzer failure for an already resolved call");
        }
        accepted
    }

    /// Whether the call has already been resolved.
    pub fn is_resolved(&self) -> bool {
        self.inner.deferred.is_settled()
    }
}

impl fmt::Debug for ResultSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSink")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
