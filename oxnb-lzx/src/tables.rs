//! LZX constants and static position-slot tables.
//!
//! LZX represents match offsets as a small *position slot* plus a few
//! extra bits of offset-from-base data, instead of one large offset.
//! `extra_bits()[slot]` gives the number of extra bits for a slot and
//! `position_base()[slot]` the base offset the extra bits are added to.
//! Both tables are pure functions of the slot index, built once and
//! shared by every decoder instance.

use std::sync::OnceLock;

/// Smallest allowable match length.
pub const MIN_MATCH: usize = 2;
/// Largest allowable match length.
pub const MAX_MATCH: usize = 257;
/// Number of uncompressed character types (literal byte values).
pub const NUM_CHARS: usize = 256;

/// Match-length values encoded directly in the main-tree element.
pub const NUM_PRIMARY_LENGTHS: usize = 7;
/// Number of elements in the length tree.
pub const NUM_SECONDARY_LENGTHS: usize = 249;

/// Number of symbols in the pretree used for code-length deltas.
pub const PRETREE_MAX_SYMBOLS: usize = 20;
/// Direct-lookup bits for the pretree decode table.
pub const PRETREE_TABLE_BITS: u32 = 6;

/// Maximum number of main-tree symbols (256 literals + 50 slots x 8).
pub const MAINTREE_MAX_SYMBOLS: usize = NUM_CHARS + 50 * 8;
/// Direct-lookup bits for the main decode table.
pub const MAINTREE_TABLE_BITS: u32 = 12;

/// Number of symbols in the length decode table.
pub const LENGTH_MAX_SYMBOLS: usize = NUM_SECONDARY_LENGTHS + 1;
/// Direct-lookup bits for the length decode table.
pub const LENGTH_TABLE_BITS: u32 = 12;

/// Number of symbols in the aligned-offset tree.
pub const ALIGNED_MAX_SYMBOLS: usize = 8;
/// Direct-lookup bits for the aligned-offset decode table.
pub const ALIGNED_TABLE_BITS: u32 = 7;

/// Smallest supported window size exponent (32 KB).
pub const MIN_WINDOW_BITS: u32 = 15;
/// Largest supported window size exponent (2 MB).
pub const MAX_WINDOW_BITS: u32 = 21;
/// Window size exponent used by XNB containers (64 KB).
pub const XNB_WINDOW_BITS: u32 = 16;

/// Number of position slots in use for a given window size.
///
/// ```text
/// window bits:     15 16 17 18 19 20 21
/// position slots:  30 32 34 36 38 42 50
/// ```
pub fn position_slots(window_bits: u32) -> usize {
    match window_bits {
        21 => 50,
        20 => 42,
        bits => (bits as usize) << 1,
    }
}

/// Extra offset bits per position slot.
///
/// Zero for the first two slots, then +1 every two slots up to a ceiling
/// of 17.
pub fn extra_bits() -> &'static [u8; 51] {
    static TABLE: OnceLock<[u8; 51]> = OnceLock::new();

    TABLE.get_or_init(|| {
        let mut table = [0u8; 51];
        let mut bits = 0u8;
        let mut slot = 0usize;
        while slot <= 50 {
            table[slot] = bits;
            if slot + 1 <= 50 {
                table[slot + 1] = bits;
            }
            if slot != 0 && bits < 17 {
                bits += 1;
            }
            slot += 2;
        }
        table
    })
}

/// Base match offset per position slot: the running sum of
/// `1 << extra_bits()[0..slot]`.
pub fn position_base() -> &'static [u32; 51] {
    static TABLE: OnceLock<[u32; 51]> = OnceLock::new();

    TABLE.get_or_init(|| {
        let extra = extra_bits();
        let mut table = [0u32; 51];
        let mut base = 0u32;
        for (slot, entry) in table.iter_mut().enumerate() {
            *entry = base;
            base += 1 << extra[slot];
        }
        table
    })
}
