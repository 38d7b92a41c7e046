//! Sliding window and repeated-offset cache for LZX match decoding.
//!
//! The window holds the most recent `2^window_bits` bytes of decoded
//! output; matches copy from it, and completed frames are sliced out of
//! it. The offset cache keeps the three most-recently-used match offsets
//! (R0/R1/R2) so repeated distances encode in two or three bits.

use oxnb_core::error::{OxnbError, Result};

/// Circular buffer of previously decoded bytes.
///
/// The write position is masked modulo the (power-of-two) capacity on
/// every write, so both literal writes and match copies wrap across the
/// window seam transparently.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    /// The underlying buffer.
    buffer: Vec<u8>,
    /// Current write position (next byte lands here).
    position: usize,
    /// Mask for efficient modulo (capacity - 1).
    mask: usize,
}

impl SlidingWindow {
    /// Create a window with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or not a power of 2.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        assert!(
            capacity.is_power_of_two(),
            "capacity must be a power of 2, got {}",
            capacity
        );

        Self {
            buffer: vec![0; capacity],
            position: 0,
            mask: capacity - 1,
        }
    }

    /// Get the window capacity.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Get the current write position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Write a single decoded byte.
    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        self.buffer[self.position] = byte;
        self.position = (self.position + 1) & self.mask;
    }

    /// Write a run of raw bytes (uncompressed-block payload).
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push_byte(byte);
        }
    }

    /// Copy `length` bytes from `offset` bytes back to the write position.
    ///
    /// The source index is computed modulo the capacity, so a source
    /// range that crosses the window's end wraps exactly: the tail of
    /// the buffer is copied first, then the copy continues from index 0.
    /// Copying proceeds byte by byte, so overlapping copies (offset
    /// smaller than length) repeat the most recent bytes as LZ77
    /// requires.
    pub fn copy_match(&mut self, offset: usize, length: usize) {
        let mut src = self.position.wrapping_sub(offset) & self.mask;
        for _ in 0..length {
            let byte = self.buffer[src];
            self.buffer[self.position] = byte;
            self.position = (self.position + 1) & self.mask;
            src = (src + 1) & self.mask;
        }
    }

    /// The `frame_size` bytes of output ending at the write position.
    ///
    /// A write position of zero means the window wrapped exactly to the
    /// start, so the slice ends at the window's end instead.
    pub fn frame(&self, frame_size: usize) -> Result<Vec<u8>> {
        let end = if self.position == 0 {
            self.buffer.len()
        } else {
            self.position
        };
        let start = end.checked_sub(frame_size).ok_or_else(|| {
            OxnbError::corrupt("frame size exceeds decoded span of the window")
        })?;
        Ok(self.buffer[start..end].to_vec())
    }
}

/// The three most-recently-used match offsets, R0/R1/R2.
///
/// All three start at 1. Position slot 0 reuses R0 unchanged; slots 1
/// and 2 swap the selected offset into R0; any fresh offset pushes the
/// cache down (R2 <- R1 <- R0 <- new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetCache {
    r0: usize,
    r1: usize,
    r2: usize,
}

impl OffsetCache {
    /// Create a cache with all offsets at 1.
    pub fn new() -> Self {
        Self { r0: 1, r1: 1, r2: 1 }
    }

    /// The most recent offset (position slot 0; no reordering).
    pub fn r0(&self) -> usize {
        self.r0
    }

    /// The second most recent offset.
    pub fn r1(&self) -> usize {
        self.r1
    }

    /// The third most recent offset.
    pub fn r2(&self) -> usize {
        self.r2
    }

    /// Select R1 (position slot 1): swaps it with R0 and returns it.
    pub fn promote_r1(&mut self) -> usize {
        std::mem::swap(&mut self.r0, &mut self.r1);
        self.r0
    }

    /// Select R2 (position slot 2): swaps it with R0 and returns it.
    pub fn promote_r2(&mut self) -> usize {
        std::mem::swap(&mut self.r0, &mut self.r2);
        self.r0
    }

    /// Record a fresh offset: R2 <- R1 <- R0 <- `offset`.
    pub fn push(&mut self, offset: usize) {
        self.r2 = self.r1;
        self.r1 = self.r0;
        self.r0 = offset;
    }

    /// Overwrite all three offsets (uncompressed-block header).
    pub fn set_all(&mut self, r0: usize, r1: usize, r2: usize) {
        self.r0 = r0;
        self.r1 = r1;
        self.r2 = r2;
    }
}

impl Default for OffsetCache {
    fn default() -> Self {
        Self::new()
    }
}
