//! Media module for chunked uploads.
//!
//! This module provides:
//! - MIME types and upload categories
//! - Splitting payloads into base64 segments
//! - The INIT/APPEND/FINALIZE upload flow

pub mod chunk;
pub mod mime;
pub mod upload;

pub use chunk::{chunk_count, split_chunks, Chunk, Chunks, MAX_CHUNK_SIZE};
pub use mime::{MediaCategory, MimeType};
pub use upload::{MediaUploadResponse, MediaUploadSession, ProcessingInfo};
