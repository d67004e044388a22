//! Analyzer backed by the MediaInfo command-line tool.
//!
//! The CLI only analyzes files, so the chunks pulled from the source are
//! spooled into a temporary file which is then handed to
//! `mediainfo --Output=JSON`. The child process is killed if the extraction
//! gives up on it (timeout).
//!
//! Install MediaInfo:
//! - Windows: `winget install MediaArea.MediaInfo` or download from https://mediaarea.net/en/MediaInfo
//! - macOS: `brew install media-info`
//! - Linux: `apt install mediainfo` or equivalent

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::traits::{Analyzer, AnalyzerFactory, ChunkSource, ResultSink};
use super::AnalyzerOptions;
use crate::error::{Error, Result};

/// Common installation paths for mediainfo on Windows
#[cfg(windows)]
const MEDIAINFO_PATHS: &[&str] = &[
    r"C:\Program Files\MediaInfo\mediainfo.exe",
    r"C:\Program Files\MediaInfo_CLI\MediaInfo.exe",
    r"C:\Program Files (x86)\MediaInfo\mediainfo.exe",
];

#[cfg(not(windows))]
const MEDIAINFO_PATHS: &[&str] = &[
    "/usr/bin/mediainfo",
    "/usr/local/bin/mediainfo",
    "/opt/homebrew/bin/mediainfo",
];

/// Find the mediainfo executable.
///
/// An explicit path wins if it exists; then `PATH`; then common install locations.
pub fn find_mediainfo(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Configured mediainfo path {:?} does not exist", path);
    }

    which::which("mediainfo").ok().or_else(|| {
        MEDIAINFO_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file())
    })
}

/// Factory for [`MediaInfoCli`] analyses.
#[derive(Debug, Clone, Default)]
pub struct MediaInfoCli {
    program: Option<PathBuf>,
}

impl MediaInfoCli {
    /// Locate mediainfo on `PATH` or in common install locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer this executable, falling back to the usual search if it is missing.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    /// The executable that would be used, if any.
    pub fn locate(&self) -> Option<PathBuf> {
        find_mediainfo(self.program.as_deref())
    }

    /// Check if mediainfo is available
    pub fn is_available(&self) -> bool {
        self.locate().is_some()
    }

    /// Get mediainfo version string (for diagnostics)
    pub async fn version(&self) -> Option<String> {
        let program = self.locate()?;
        let output = Command::new(program).arg("--Version").output().await.ok()?;
        if !output.status.success() {
            return None;
        }
        // "MediaInfo Command line,\nMediaInfoLib - v24.06"
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(str::to_string)
    }
}

#[async_trait]
impl AnalyzerFactory for MediaInfoCli {
    async fn create(&self, options: &AnalyzerOptions) -> Result<Box<dyn Analyzer>> {
        let program = self.locate().ok_or_else(|| {
            Error::dependency(
                "mediainfo not found. Please install MediaInfo: https://mediaarea.net/en/MediaInfo",
            )
        })?;
        tracing::debug!("Using mediainfo at {:?}", program);

        Ok(Box::new(MediaInfoRun {
            program,
            options: options.clone(),
        }))
    }
}

/// One mediainfo invocation.
struct MediaInfoRun {
    program: PathBuf,
    options: AnalyzerOptions,
}

#[async_trait]
impl Analyzer for MediaInfoRun {
    async fn run(self: Box<Self>, source: Arc<dyn ChunkSource>, sink: ResultSink) {
        match self.analyze(source.as_ref()).await {
            Ok(json) => {
                sink.complete(json);
            }
            Err(e) => {
                sink.fail(e);
            }
        }
    }
}

impl MediaInfoRun {
    async fn analyze(&self, source: &dyn ChunkSource) -> Result<String> {
        let spool = tempfile::NamedTempFile::new()?;
        let written = self.spool(source, spool.path()).await?;
        tracing::debug!(bytes = written, "Spooled input for mediainfo");

        let output = Command::new(&self.program)
            .args(cli_args(&self.options))
            .arg(spool.path())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::analyzer(format!("Failed to run mediainfo: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::analyzer(format!("mediainfo failed: {}", stderr.trim())));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::analyzer(format!("mediainfo output is not UTF-8: {}", e)))
    }

    /// Pull every chunk from `source` into the file at `path`.
    async fn spool(&self, source: &dyn ChunkSource, path: &Path) -> Result<u64> {
        let mut file = tokio::fs::File::create(path).await?;
        let chunk_size = self.options.chunk_size.max(1);
        let mut offset = 0u64;

        loop {
            let chunk = source.read_chunk(chunk_size, offset).await;
            if chunk.is_empty() {
                break;
            }
            file.write_all(&chunk).await?;
            offset += chunk.len() as u64;
        }

        file.flush().await?;
        Ok(offset)
    }
}

/// Command-line flags for the given analyzer options.
fn cli_args(options: &AnalyzerOptions) -> Vec<String> {
    let mut args = vec![format!("--Output={}", options.format.as_str())];
    if options.full {
        args.push("--Full".to_string());
    }
    if options.cover_data {
        args.push("--Cover_Data=base64".to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::BufferSource;

    #[test]
    fn test_cli_args_default() {
        let args = cli_args(&AnalyzerOptions::default());
        assert_eq!(args, vec!["--Output=JSON", "--Full", "--Cover_Data=base64"]);
    }

    #[test]
    fn test_cli_args_minimal() {
        let options = AnalyzerOptions {
            full: false,
            cover_data: false,
            ..Default::default()
        };
        assert_eq!(cli_args(&options), vec!["--Output=JSON"]);
    }

    #[test]
    fn test_missing_explicit_program_falls_back() {
        let cli = MediaInfoCli::with_program("/nonexistent/mediainfo");
        // Either found elsewhere on this machine or not at all, never the bogus path
        assert_ne!(cli.locate(), Some(PathBuf::from("/nonexistent/mediainfo")));
    }

    #[test]
    fn test_is_available() {
        // This test just ensures the function doesn't panic
        let _ = MediaInfoCli::new().is_available();
    }

    #[tokio::test]
    async fn test_spool_writes_every_chunk() {
        let bytes: Vec<u8> = (0..1000).map(|i| (i % 251) as u8).collect();
        let source = BufferSource::new(bytes.clone());
        let run = MediaInfoRun {
            program: PathBuf::from("mediainfo"),
            options: AnalyzerOptions {
                chunk_size: 256,
                ..Default::default()
            },
        };

        let spool = tempfile::NamedTempFile::new().unwrap();
        let written = run.spool(&source, spool.path()).await.unwrap();

        assert_eq!(written, 1000);
        assert_eq!(std::fs::read(spool.path()).unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_missing_program_reports_analyzer_failure() {
        let run = Box::new(MediaInfoRun {
            program: PathBuf::from("/nonexistent/mediainfo"),
            options: AnalyzerOptions::default(),
        });
        let (deferred, rx) = crate::deferred::Deferred::new();

        run.run(Arc::new(BufferSource::new(vec![1, 2, 3])), ResultSink::new(deferred))
            .await;

        assert!(matches!(rx.await.unwrap(), Err(Error::Analyzer(_))));
    }
}
