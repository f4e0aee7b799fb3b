//! Splitting a payload into base64 upload segments.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::{Error, Result};

/// Largest decoded segment the upload endpoint accepts (4,000 KiB).
pub const MAX_CHUNK_SIZE: usize = 4 * 1000 * 1024;

/// One APPEND segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Zero-based position, sent as `segment_index`.
    pub index: usize,
    /// Base64-encoded bytes, sent as `media_data`.
    pub data: String,
    /// Length of the segment before encoding.
    pub decoded_len: usize,
}

/// Single-pass iterator over the segments of a payload, in payload order.
#[derive(Debug)]
pub struct Chunks<'a> {
    inner: std::iter::Enumerate<std::slice::Chunks<'a, u8>>,
    total: usize,
}

impl Chunks<'_> {
    /// Number of segments the payload splits into.
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        self.inner.next().map(|(index, bytes)| Chunk {
            index,
            data: BASE64.encode(bytes),
            decoded_len: bytes.len(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Chunks<'_> {}

/// Number of segments for `len` bytes: `ceil(len / chunk_size)`.
pub fn chunk_count(len: usize, chunk_size: usize) -> usize {
    len.div_ceil(chunk_size)
}

/// Split `data` into segments of at most `chunk_size` bytes.
///
/// Every segment but the last is exactly `chunk_size` bytes long. Empty
/// payloads are rejected.
pub fn split_chunks(data: &[u8], chunk_size: usize) -> Result<Chunks<'_>> {
    if data.is_empty() {
        return Err(Error::EmptyMedia);
    }
    if chunk_size == 0 {
        return Err(Error::Config("chunk_size must be greater than zero".into()));
    }

    Ok(Chunks {
        inner: data.chunks(chunk_size).enumerate(),
        total: chunk_count(data.len(), chunk_size),
    })
}
