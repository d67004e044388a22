//! In-memory chunk source.

use async_trait::async_trait;

use super::traits::ChunkSource;

/// Serves a byte buffer that is already fully resident in memory.
///
/// No I/O happens here; `read_chunk` copies a clamped slice.
#[derive(Debug, Clone)]
pub struct BufferSource {
    bytes: Vec<u8>,
}

impl BufferSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The byte range `[offset, offset + size)`, clamped to the buffer.
    pub fn slice(&self, size: usize, offset: u64) -> &[u8] {
        let len = self.bytes.len();
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(len);
        let end = start.saturating_add(size).min(len);
        &self.bytes[start..end]
    }
}

#[async_trait]
impl ChunkSource for BufferSource {
    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read_chunk(&self, size: usize, offset: u64) -> Vec<u8> {
        let chunk = self.slice(size, offset);
        tracing::trace!(offset, requested = size, returned = chunk.len(), "read_chunk");
        chunk.to_vec()
    }
}
