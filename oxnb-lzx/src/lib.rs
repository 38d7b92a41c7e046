//! # OxNB LZX
//!
//! Pure Rust LZX decompression for XNB game-asset containers.
//!
//! XNB content streams are compressed with LZX, the dictionary coder
//! used by Microsoft cabinet files: three block types (Verbatim,
//! Aligned, Uncompressed), canonical Huffman trees whose code lengths
//! delta-code across blocks, a 32 KB - 2 MB sliding window, and a
//! three-entry repeated-offset cache. This crate decodes such streams;
//! compression and the outer XNB container format are out of scope.
//!
//! ## Example
//!
//! ```no_run
//! use oxnb_lzx::decode_lzx;
//!
//! // Compressed payload and expected size come from the XNB header.
//! let compressed: Vec<u8> = std::fs::read("content.lzx").unwrap();
//! let expected_len = 0x4000;
//!
//! let decoded = decode_lzx(&compressed, expected_len).unwrap();
//! assert_eq!(decoded.len(), expected_len);
//! ```
//!
//! For payloads embedded mid-buffer, drive [`decompress_frames`] with a
//! positioned [`oxnb_core::ByteCursor`]; for single frames outside the
//! XNB framing, use [`LzxDecoder`] directly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decoder;
pub mod frame;
pub mod huffman;
pub mod tables;
pub mod window;

// Re-exports
pub use decoder::{BlockType, LzxDecoder};
pub use frame::{DEFAULT_FRAME_SIZE, MAX_CHUNK_SIZE, decode_lzx, decompress_frames};
pub use huffman::{DecodeTable, read_code_lengths};
pub use window::{OffsetCache, SlidingWindow};
