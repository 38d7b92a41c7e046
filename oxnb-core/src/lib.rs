//! # OxNB Core
//!
//! Core components for the OxNB content-decompression library.
//!
//! This crate provides the fundamental building blocks shared by the
//! codec layer:
//!
//! - [`cursor`]: byte- and bit-level reading over an in-memory buffer,
//!   including the LZX bit conventions (MSB-first within little-endian
//!   16-bit words) and the container's numeric/string reads
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! OxNB is a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Container (external)                                │
//! │     XNB header/type-reader parsing, not in this repo    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     LZX block/frame decoding (oxnb-lzx)                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Cursor (this crate)                                 │
//! │     ByteCursor/BitPacker, error types                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxnb_core::cursor::ByteCursor;
//!
//! let data = [0x01, 0x00, 0xFF, 0x7F];
//! let mut cursor = ByteCursor::new(&data);
//! assert_eq!(cursor.read_u16().unwrap(), 1);
//! assert_eq!(cursor.read_bits(4).unwrap(), 0x7);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cursor;
pub mod error;

// Re-exports for convenience
pub use cursor::{BitPacker, ByteCursor, Endian};
pub use error::{OxnbError, Result};
