//! Frame orchestration for XNB compressed content.
//!
//! XNB stores LZX output as a sequence of frames, each preceded by a
//! small header giving the decompressed frame size and the compressed
//! block size. A flag byte of 0xFF announces an explicit frame size;
//! any other value is the start of a block-size word and the frame size
//! defaults to 32 KB. Both sizes use the byte-swapped 16-bit word
//! convention of [`ByteCursor::read_swapped_u16`].

use oxnb_core::cursor::ByteCursor;
use oxnb_core::error::{OxnbError, Result};

use crate::decoder::LzxDecoder;
use crate::tables::XNB_WINDOW_BITS;

/// Decompressed frame size when no explicit header is present (32 KB).
pub const DEFAULT_FRAME_SIZE: usize = 0x8000;

/// Upper bound on frame and block sizes read from headers.
pub const MAX_CHUNK_SIZE: usize = 0x10000;

/// Decompress `compressed_len` bytes of framed LZX data at the cursor.
///
/// Frames are decoded in order by a single [`LzxDecoder`] (XNB's 64 KB
/// window) and concatenated. A frame or block size of zero is the
/// stream's end marker and stops the loop cleanly; a size above
/// [`MAX_CHUNK_SIZE`] is an error. `expected_len` sizes the output
/// allocation; verifying the final length against it is the caller's
/// responsibility, since the container header owns that fact.
pub fn decompress_frames(
    cursor: &mut ByteCursor<'_>,
    compressed_len: usize,
    expected_len: usize,
) -> Result<Vec<u8>> {
    let mut decoder = LzxDecoder::new(XNB_WINDOW_BITS)?;
    let mut output = Vec::with_capacity(expected_len);
    let mut consumed = 0usize;

    while consumed < compressed_len {
        let flag = cursor.read_u8()?;
        let (frame_size, block_size) = if flag == 0xFF {
            let frame_size = usize::from(cursor.read_swapped_u16()?);
            let block_size = usize::from(cursor.read_swapped_u16()?);
            consumed += 5;
            (frame_size, block_size)
        } else {
            cursor.seek(-1)?;
            let block_size = usize::from(cursor.read_swapped_u16()?);
            consumed += 2;
            (DEFAULT_FRAME_SIZE, block_size)
        };

        if block_size == 0 || frame_size == 0 {
            break;
        }
        if frame_size > MAX_CHUNK_SIZE {
            return Err(OxnbError::size_limit("frame size", frame_size, MAX_CHUNK_SIZE));
        }
        if block_size > MAX_CHUNK_SIZE {
            return Err(OxnbError::size_limit("block size", block_size, MAX_CHUNK_SIZE));
        }

        let frame = decoder.decompress_frame(cursor, frame_size, block_size)?;
        output.extend_from_slice(&frame);
        consumed += block_size;
    }

    Ok(output)
}

/// Decompress a whole buffer of framed LZX data.
pub fn decode_lzx(data: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    let mut cursor = ByteCursor::new(data);
    decompress_frames(&mut cursor, data.len(), expected_len)
}
