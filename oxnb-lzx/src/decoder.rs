//! LZX block decoding.
//!
//! This module implements the per-frame decode loop: reading block
//! headers, rebuilding the Huffman trees each block announces, and
//! running the literal/match engine against the sliding window.
//!
//! ## Block types
//!
//! - **Verbatim**: Huffman-coded literals and matches; fresh offsets are
//!   raw extra bits over the position-slot base.
//! - **Aligned**: as Verbatim, plus an 8-symbol aligned-offset tree that
//!   codes the low three bits of larger offsets.
//! - **Uncompressed**: byte-aligned raw data, preceded by replacement
//!   values for the whole repeated-offset cache.

use oxnb_core::cursor::ByteCursor;
use oxnb_core::error::{OxnbError, Result};

use crate::huffman::{DecodeTable, read_code_lengths};
use crate::tables::{
    ALIGNED_MAX_SYMBOLS, ALIGNED_TABLE_BITS, LENGTH_MAX_SYMBOLS, LENGTH_TABLE_BITS,
    MAINTREE_MAX_SYMBOLS, MAINTREE_TABLE_BITS, MAX_WINDOW_BITS, MIN_MATCH, MIN_WINDOW_BITS,
    NUM_CHARS, NUM_PRIMARY_LENGTHS, NUM_SECONDARY_LENGTHS, extra_bits, position_base,
    position_slots,
};
use crate::window::{OffsetCache, SlidingWindow};

/// Encoding of one LZX block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    /// No valid block header has been decoded.
    Invalid,
    /// Huffman-coded data with raw extra offset bits.
    Verbatim,
    /// Huffman-coded data with an aligned-offset tree.
    Aligned,
    /// Byte-aligned raw data.
    Uncompressed,
}

impl BlockType {
    /// Map the 3-bit header field to a block type.
    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => Self::Verbatim,
            2 => Self::Aligned,
            3 => Self::Uncompressed,
            _ => Self::Invalid,
        }
    }
}

/// Stateful LZX decoder for one compressed stream.
///
/// The window, the repeated-offset cache, and the main/length code
/// lengths all persist across [`decompress_frame`](Self::decompress_frame)
/// calls: later frames back-reference earlier output and later blocks
/// delta-code their tree lengths against earlier ones. One decoder
/// therefore serves exactly one stream; create a fresh instance per
/// stream rather than reusing one across unrelated inputs.
#[derive(Debug)]
pub struct LzxDecoder {
    /// Sliding window of decoded output.
    window: SlidingWindow,
    /// Repeated match offsets R0/R1/R2.
    offsets: OffsetCache,
    /// Number of main-tree symbols for this window size.
    main_elements: usize,
    /// Whether the one-shot stream-transform bit has been consumed.
    header_read: bool,
    /// Type of the block currently being decoded.
    block_type: BlockType,
    /// Uncompressed bytes left in the current block.
    block_remaining: usize,
    /// Main-tree code lengths; persist for cross-block delta coding.
    main_lengths: Vec<u8>,
    /// Length-tree code lengths; persist for cross-block delta coding.
    length_lengths: Vec<u8>,
    /// Main decode table, rebuilt at each coded block header.
    main_tree: Option<DecodeTable>,
    /// Length decode table, rebuilt at each coded block header.
    length_tree: Option<DecodeTable>,
    /// Aligned-offset decode table, rebuilt at each aligned block header.
    aligned_tree: Option<DecodeTable>,
}

impl LzxDecoder {
    /// Create a decoder for a window of `2^window_bits` bytes.
    ///
    /// LZX supports window sizes of 2^15 (32 KB) to 2^21 (2 MB); XNB
    /// containers use [`XNB_WINDOW_BITS`](crate::tables::XNB_WINDOW_BITS).
    pub fn new(window_bits: u32) -> Result<Self> {
        if !(MIN_WINDOW_BITS..=MAX_WINDOW_BITS).contains(&window_bits) {
            return Err(OxnbError::window_bits_out_of_range(window_bits));
        }

        Ok(Self {
            window: SlidingWindow::new(1 << window_bits),
            offsets: OffsetCache::new(),
            main_elements: NUM_CHARS + (position_slots(window_bits) << 3),
            header_read: false,
            block_type: BlockType::Invalid,
            block_remaining: 0,
            main_lengths: vec![0; MAINTREE_MAX_SYMBOLS],
            length_lengths: vec![0; LENGTH_MAX_SYMBOLS],
            main_tree: None,
            length_tree: None,
            aligned_tree: None,
        })
    }

    /// Decode one frame of `frame_size` bytes from the stream.
    ///
    /// `block_size` is the number of compressed bytes this frame spans in
    /// the input, measured from the cursor's position on entry; it bounds
    /// raw reads in uncompressed blocks. A frame may be served by several
    /// blocks and a block may span several frames. On success the cursor
    /// is left 16-bit aligned after the frame's coded data.
    pub fn decompress_frame(
        &mut self,
        cursor: &mut ByteCursor<'_>,
        frame_size: usize,
        block_size: usize,
    ) -> Result<Vec<u8>> {
        let block_end = cursor.byte_position() + block_size;

        if !self.header_read {
            // A nonzero bit announces the x86 call-translation filter,
            // which XNB streams never use.
            if cursor.read_bits(1)? != 0 {
                return Err(OxnbError::corrupt(
                    "translated (Intel E8) stream is not supported",
                ));
            }
            self.header_read = true;
        }

        let mut togo = frame_size;
        while togo > 0 {
            if self.block_remaining == 0 {
                self.read_block_header(cursor)?;
            }

            let this_run = self.block_remaining.min(togo);
            togo -= this_run;
            self.block_remaining -= this_run;

            if self.window.position() + this_run > self.window.capacity() {
                return Err(OxnbError::window_overrun(
                    self.window.position(),
                    this_run,
                    self.window.capacity(),
                ));
            }

            match self.block_type {
                BlockType::Verbatim => self.decode_run(cursor, this_run, false)?,
                BlockType::Aligned => self.decode_run(cursor, this_run, true)?,
                BlockType::Uncompressed => self.copy_uncompressed(cursor, this_run, block_end)?,
                BlockType::Invalid => {
                    return Err(OxnbError::corrupt("no valid block header decoded"));
                }
            }
        }

        cursor.align()?;
        self.window.frame(frame_size)
    }

    /// Read a block header: 3-bit type, 24-bit remaining-byte count, and
    /// the per-type tree setup.
    fn read_block_header(&mut self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        let type_bits = cursor.read_bits(3)?;
        let block_type = BlockType::from_bits(type_bits);

        let hi = cursor.read_bits(16)? as usize;
        let lo = cursor.read_bits(8)? as usize;
        self.block_remaining = (hi << 8) | lo;

        match block_type {
            BlockType::Aligned => {
                let mut aligned_lengths = [0u8; ALIGNED_MAX_SYMBOLS];
                for length in &mut aligned_lengths {
                    *length = cursor.read_bits(3)? as u8;
                }
                self.aligned_tree = Some(DecodeTable::build(
                    ALIGNED_MAX_SYMBOLS,
                    ALIGNED_TABLE_BITS,
                    &aligned_lengths,
                )?);
                self.read_main_and_length_trees(cursor)?;
            }
            BlockType::Verbatim => {
                self.read_main_and_length_trees(cursor)?;
            }
            BlockType::Uncompressed => {
                cursor.align()?;
                let r0 = cursor.read_i32()? as usize;
                let r1 = cursor.read_i32()? as usize;
                let r2 = cursor.read_i32()? as usize;
                self.offsets.set_all(r0, r1, r2);
            }
            BlockType::Invalid => {
                return Err(OxnbError::corrupt(format!(
                    "invalid block type {type_bits}"
                )));
            }
        }

        self.block_type = block_type;
        Ok(())
    }

    /// Tree setup shared by Verbatim and Aligned blocks: main-tree
    /// lengths in two ranges (literals, then match elements), then the
    /// length tree.
    fn read_main_and_length_trees(&mut self, cursor: &mut ByteCursor<'_>) -> Result<()> {
        read_code_lengths(cursor, &mut self.main_lengths, 0, NUM_CHARS)?;
        read_code_lengths(cursor, &mut self.main_lengths, NUM_CHARS, self.main_elements)?;
        self.main_tree = Some(DecodeTable::build(
            MAINTREE_MAX_SYMBOLS,
            MAINTREE_TABLE_BITS,
            &self.main_lengths,
        )?);

        read_code_lengths(cursor, &mut self.length_lengths, 0, NUM_SECONDARY_LENGTHS)?;
        self.length_tree = Some(DecodeTable::build(
            LENGTH_MAX_SYMBOLS,
            LENGTH_TABLE_BITS,
            &self.length_lengths,
        )?);
        Ok(())
    }

    /// Decode `run` output bytes of Huffman-coded literals and matches.
    fn decode_run(&mut self, cursor: &mut ByteCursor<'_>, run: usize, aligned: bool) -> Result<()> {
        let Self {
            window,
            offsets,
            main_tree,
            length_tree,
            aligned_tree,
            ..
        } = self;
        let main = main_tree
            .as_ref()
            .ok_or_else(|| OxnbError::corrupt("coded block without a main tree"))?;
        let length = length_tree
            .as_ref()
            .ok_or_else(|| OxnbError::corrupt("coded block without a length tree"))?;

        // A match may overshoot the run's byte count; the counter goes
        // negative rather than truncating the copy.
        let mut remaining = run as i64;
        while remaining > 0 {
            let element = usize::from(main.decode_symbol(cursor)?);

            if element < NUM_CHARS {
                window.push_byte(element as u8);
                remaining -= 1;
                continue;
            }

            let element = element - NUM_CHARS;

            // Low three bits carry short match lengths; 7 means the
            // length tree supplies a footer.
            let mut match_length = element & NUM_PRIMARY_LENGTHS;
            if match_length == NUM_PRIMARY_LENGTHS {
                match_length += usize::from(length.decode_symbol(cursor)?);
            }
            match_length += MIN_MATCH;

            let slot = element >> 3;
            let match_offset = match slot {
                0 => offsets.r0(),
                1 => offsets.promote_r1(),
                2 => offsets.promote_r2(),
                _ => {
                    let offset = if aligned {
                        Self::read_aligned_offset(cursor, aligned_tree.as_ref(), slot)?
                    } else {
                        Self::read_verbatim_offset(cursor, slot)?
                    };
                    offsets.push(offset);
                    offset
                }
            };

            window.copy_match(match_offset, match_length);
            remaining -= match_length as i64;
        }
        Ok(())
    }

    /// Fresh offset in a Verbatim block: slot base plus raw extra bits.
    fn read_verbatim_offset(cursor: &mut ByteCursor<'_>, slot: usize) -> Result<usize> {
        if slot == 3 {
            return Ok(1);
        }
        let extra = u32::from(extra_bits()[slot]);
        let verbatim = cursor.read_bits(extra)? as usize;
        Ok(position_base()[slot] as usize - 2 + verbatim)
    }

    /// Fresh offset in an Aligned block: for more than three extra bits
    /// the low three come from the aligned tree and the rest are raw;
    /// exactly three come from the aligned tree alone.
    fn read_aligned_offset(
        cursor: &mut ByteCursor<'_>,
        aligned_tree: Option<&DecodeTable>,
        slot: usize,
    ) -> Result<usize> {
        let aligned = aligned_tree
            .ok_or_else(|| OxnbError::corrupt("aligned block without an aligned-offset tree"))?;

        let extra = u32::from(extra_bits()[slot]);
        let mut offset = position_base()[slot] as usize - 2;
        if extra > 3 {
            offset += (cursor.read_bits(extra - 3)? as usize) << 3;
            offset += usize::from(aligned.decode_symbol(cursor)?);
        } else if extra == 3 {
            offset += usize::from(aligned.decode_symbol(cursor)?);
        } else if extra > 0 {
            offset += cursor.read_bits(extra)? as usize;
        } else {
            // Only slot 3 has no extra bits here; its base arithmetic
            // also yields 1.
            offset = 1;
        }
        Ok(offset)
    }

    /// Copy `run` raw bytes of an uncompressed block into the window.
    ///
    /// `block_end` is the absolute offset where this frame's compressed
    /// data ends; reading past it is an overrun.
    fn copy_uncompressed(
        &mut self,
        cursor: &mut ByteCursor<'_>,
        run: usize,
        block_end: usize,
    ) -> Result<()> {
        if cursor.byte_position() + run > block_end {
            return Err(OxnbError::block_overrun(run, block_end));
        }
        let bytes = cursor.read_bytes(run)?;
        self.window.write_bytes(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxnb_core::cursor::BitPacker;

    /// Bit-level header for an uncompressed block holding `data`, with
    /// the given replacement offsets.
    fn uncompressed_stream(data: &[u8], r: (i32, i32, i32)) -> Vec<u8> {
        let mut packer = BitPacker::new();
        packer.push(0, 1); // stream-transform header
        packer.push(3, 3); // block type: uncompressed
        packer.push((data.len() >> 8) as u32, 16);
        packer.push((data.len() & 0xFF) as u32, 8);
        packer.align();

        let mut stream = packer.finish();
        stream.extend_from_slice(&r.0.to_le_bytes());
        stream.extend_from_slice(&r.1.to_le_bytes());
        stream.extend_from_slice(&r.2.to_le_bytes());
        stream.extend_from_slice(data);
        stream
    }

    #[test]
    fn test_uncompressed_block_overrides_offsets_and_copies_raw_bytes() {
        let data: Vec<u8> = (0u8..20).collect();
        let stream = uncompressed_stream(&data, (4, 9, 20));

        let mut decoder = LzxDecoder::new(15).unwrap();
        let mut cursor = ByteCursor::new(&stream);
        let frame = decoder
            .decompress_frame(&mut cursor, data.len(), stream.len())
            .unwrap();

        assert_eq!(frame, data);
        assert_eq!(
            (
                decoder.offsets.r0(),
                decoder.offsets.r1(),
                decoder.offsets.r2()
            ),
            (4, 9, 20)
        );
        assert_eq!(decoder.window.position(), data.len());
    }

    #[test]
    fn test_uncompressed_block_overrun_past_declared_boundary() {
        let data: Vec<u8> = (0u8..20).collect();
        let stream = uncompressed_stream(&data, (1, 1, 1));

        let mut decoder = LzxDecoder::new(15).unwrap();
        let mut cursor = ByteCursor::new(&stream);
        // Declare the block four bytes short of the payload it promises.
        assert!(matches!(
            decoder.decompress_frame(&mut cursor, data.len(), stream.len() - 4),
            Err(OxnbError::BlockOverrun { .. })
        ));
    }

    #[test]
    fn test_nonzero_stream_transform_header_rejected() {
        let mut packer = BitPacker::new();
        packer.push(1, 1);
        packer.push(1, 3);
        let stream = packer.finish();

        let mut decoder = LzxDecoder::new(16).unwrap();
        let mut cursor = ByteCursor::new(&stream);
        assert!(matches!(
            decoder.decompress_frame(&mut cursor, 16, stream.len()),
            Err(OxnbError::CorruptStream { .. })
        ));
    }

    #[test]
    fn test_invalid_block_type_rejected() {
        let mut packer = BitPacker::new();
        packer.push(0, 1); // stream-transform header
        packer.push(0, 3); // block type 0 is invalid
        packer.push(0, 16);
        packer.push(16, 8);
        let stream = packer.finish();

        let mut decoder = LzxDecoder::new(16).unwrap();
        let mut cursor = ByteCursor::new(&stream);
        let err = decoder
            .decompress_frame(&mut cursor, 16, stream.len())
            .unwrap_err();
        assert!(err.to_string().contains("block type"));
    }

    #[test]
    fn test_window_bits_range() {
        assert!(matches!(
            LzxDecoder::new(14),
            Err(OxnbError::WindowBitsOutOfRange { bits: 14 })
        ));
        assert!(matches!(
            LzxDecoder::new(22),
            Err(OxnbError::WindowBitsOutOfRange { bits: 22 })
        ));
        assert!(LzxDecoder::new(15).is_ok());
        assert!(LzxDecoder::new(21).is_ok());
    }
}
