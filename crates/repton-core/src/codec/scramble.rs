// crates/repton-core/src/codec/scramble.rs
//
// Reversible byte scrambling used by one release of the Electron tape image.

pub const BLOCK_LEN: usize = 32;

const FIRST_KEY: u8 = 0xE0;
const KEY_STEP: u8 = 0x20;

/// Byte position offsets added to the block key. Groups of eight repeat the
/// pattern 5 4 7 6 1 0 3 2, shifted up by 8 per group.
pub const PERMUTATION: [u8; BLOCK_LEN] = [
    0x05, 0x04, 0x07, 0x06, 0x01, 0x00, 0x03, 0x02, //
    0x0d, 0x0c, 0x0f, 0x0e, 0x09, 0x08, 0x0b, 0x0a, //
    0x15, 0x14, 0x17, 0x16, 0x11, 0x10, 0x13, 0x12, //
    0x1d, 0x1c, 0x1f, 0x1e, 0x19, 0x18, 0x1b, 0x1a, //
];

/// Key for block `k`: 0xE0, 0xC0, ... 0x00, then back to 0xE0.
#[inline]
pub fn block_key(k: usize) -> u8 {
    let steps = (k % 8) as u8;
    FIRST_KEY - steps * KEY_STEP
}

/// Apply the scrambling transform. The transform is its own inverse.
///
/// The first byte of `data` passes through unchanged. A short final block is
/// transformed with the leading part of the permutation.
pub fn scramble(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    scramble_in_place(&mut out);
    out
}

pub fn scramble_in_place(data: &mut [u8]) {
    let first = data.first().copied();

    for (k, block) in data.chunks_mut(BLOCK_LEN).enumerate() {
        let key = block_key(k);
        for (b, &p) in block.iter_mut().zip(PERMUTATION.iter()) {
            *b ^= key + p;
        }
    }

    if let (Some(b), Some(orig)) = (data.first_mut(), first) {
        *b = orig;
    }
}
