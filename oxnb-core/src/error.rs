//! Error types for OxNB operations.
//!
//! This module provides one error type covering every failure mode of the
//! cursor and decompression layers: cursor range violations, corrupted
//! compressed streams, table/block/window overruns, and size-limit
//! violations in frame headers.

use thiserror::Error;

/// The main error type for OxNB operations.
#[derive(Debug, Error)]
pub enum OxnbError {
    /// Cursor seek landed outside the buffer.
    #[error("cursor seek out of bounds: position {position}, buffer length {len}")]
    SeekOutOfBounds {
        /// The position the seek attempted to reach.
        position: i64,
        /// Length of the underlying buffer.
        len: usize,
    },

    /// Read past the end of the input buffer.
    #[error("unexpected end of input: need {needed} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were needed but not available.
        needed: usize,
    },

    /// Corrupted or malformed compressed data.
    #[error("corrupt stream: {message}")]
    CorruptStream {
        /// Description of the corruption.
        message: String,
    },

    /// Huffman decode-table construction exceeded its slot budget.
    #[error("decode table overrun: position {position:#x} exceeds capacity {capacity:#x}")]
    TableOverrun {
        /// Fill position that went past the end of the code space.
        position: usize,
        /// Total code-space capacity of the table.
        capacity: usize,
    },

    /// Raw read crossed the declared end of a compressed block.
    #[error("read of {needed} bytes crosses block boundary at offset {boundary}")]
    BlockOverrun {
        /// Number of bytes the read required.
        needed: usize,
        /// Byte offset at which the block ends.
        boundary: usize,
    },

    /// Decoded run would write past the end of the sliding window.
    #[error("run of {run} bytes at window position {position} exceeds window size {window_size}")]
    WindowOverrun {
        /// Window write position at the start of the run.
        position: usize,
        /// Length of the offending run.
        run: usize,
        /// Total window capacity.
        window_size: usize,
    },

    /// A frame header field exceeded its allowed maximum.
    #[error("{field} {value:#x} exceeds limit {limit:#x}")]
    SizeLimit {
        /// Name of the offending header field.
        field: &'static str,
        /// Value read from the stream.
        value: usize,
        /// Maximum allowed value.
        limit: usize,
    },

    /// Requested window size outside the supported range.
    #[error("window bits {bits} outside supported range 15-21")]
    WindowBitsOutOfRange {
        /// The rejected `window_bits` value.
        bits: u32,
    },
}

/// Result type alias for OxNB operations.
pub type Result<T> = std::result::Result<T, OxnbError>;

impl OxnbError {
    /// Create a seek-out-of-bounds error.
    pub fn seek_out_of_bounds(position: i64, len: usize) -> Self {
        Self::SeekOutOfBounds { position, len }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(needed: usize) -> Self {
        Self::UnexpectedEof { needed }
    }

    /// Create a corrupt stream error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptStream {
            message: message.into(),
        }
    }

    /// Create a decode-table overrun error.
    pub fn table_overrun(position: usize, capacity: usize) -> Self {
        Self::TableOverrun { position, capacity }
    }

    /// Create a block boundary overrun error.
    pub fn block_overrun(needed: usize, boundary: usize) -> Self {
        Self::BlockOverrun { needed, boundary }
    }

    /// Create a window overrun error.
    pub fn window_overrun(position: usize, run: usize, window_size: usize) -> Self {
        Self::WindowOverrun {
            position,
            run,
            window_size,
        }
    }

    /// Create a size-limit error.
    pub fn size_limit(field: &'static str, value: usize, limit: usize) -> Self {
        Self::SizeLimit {
            field,
            value,
            limit,
        }
    }

    /// Create a window-bits range error.
    pub fn window_bits_out_of_range(bits: u32) -> Self {
        Self::WindowBitsOutOfRange { bits }
    }
}
