// crates/repton-core/src/codec/bitstream.rs

/// Width of one packed tile value.
pub const TILE_BITS: u32 = 5;

const TILE_MASK: u32 = (1 << TILE_BITS) - 1;

/// Unpack `count` 5-bit values from an LSB-first bit stream.
///
/// Bit order is LSB-first:
/// - each input byte is ORed into the accumulator above the bits still buffered,
/// - each value is taken from the low 5 bits of the accumulator.
///
/// A 32-value row occupies exactly 20 bytes, so rows never share a byte and a
/// whole grid can be unpacked in one call.
///
/// # Panics
///
/// Panics if `bytes` holds fewer than `ceil(count * 5 / 8)` bytes.
pub fn unpack(bytes: &[u8], count: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(count);

    let mut acc: u32 = 0;
    let mut valid: u32 = 0;
    let mut i = 0usize;

    while out.len() < count {
        if valid < TILE_BITS {
            acc |= (bytes[i] as u32) << valid;
            i += 1;
            valid += 8;
        }
        out.push((acc & TILE_MASK) as u8);
        acc >>= TILE_BITS;
        valid -= TILE_BITS;
    }

    out
}

/// Pack 5-bit values into an LSB-first bit stream.
///
/// Values are masked to 5 bits. A trailing partial byte is flushed with its
/// unused high bits clear, so `unpack(&pack(v), v.len()) == v` for any length.
pub fn pack(values: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(packed_len(values.len()));

    let mut acc: u32 = 0;
    let mut valid: u32 = 0;

    for &v in values {
        acc |= (v as u32 & TILE_MASK) << valid;
        valid += TILE_BITS;
        if valid >= 8 {
            out.push((acc & 0xFF) as u8);
            acc >>= 8;
            valid -= 8;
        }
    }

    if valid > 0 {
        out.push((acc & 0xFF) as u8);
    }

    out
}

/// Number of bytes `pack` emits for `count` values.
#[inline]
pub fn packed_len(count: usize) -> usize {
    (count * TILE_BITS as usize + 7) / 8
}
