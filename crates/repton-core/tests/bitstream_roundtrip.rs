// crates/repton-core/tests/bitstream_roundtrip.rs

use proptest::prelude::*;
use repton_core::codec::bitstream::{pack, packed_len, unpack};

fn lcg_next(x: &mut u64) -> u64 {
    // deterministic, not crypto
    *x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    *x
}

#[test]
fn bitstream_roundtrip_assorted_lengths() {
    let mut seed: u64 = 0x5245_5054_4f4e_3200;

    for &n in &[0usize, 1, 2, 3, 7, 8, 9, 15, 16, 17, 31, 32, 33, 255, 256, 1024] {
        let vals: Vec<u8> = (0..n).map(|_| ((lcg_next(&mut seed) >> 56) as u8) & 0x1f).collect();

        let packed = pack(&vals);
        assert_eq!(packed.len(), packed_len(n), "n={}", n);
        assert_eq!(unpack(&packed, n), vals, "n={}", n);
    }
}

#[test]
fn bitstream_is_lsb_first() {
    // 1 | 2 << 5 = 0x41, the top two bits of value 2 spill into byte 1.
    assert_eq!(pack(&[1, 2]), vec![0x41, 0x00]);
    assert_eq!(pack(&[1, 2, 3]), vec![0x41, 0x0c]);
    assert_eq!(unpack(&[0x41, 0x0c], 3), vec![1, 2, 3]);
}

#[test]
fn bitstream_row_fills_whole_bytes() {
    let row = [31u8; 32];
    let packed = pack(&row);
    assert_eq!(packed, vec![0xff; 20]);
    assert_eq!(unpack(&packed, 32), row.to_vec());
}

#[test]
fn bitstream_masks_wide_values() {
    assert_eq!(pack(&[0x21]), pack(&[0x01]));
}

proptest! {
    #[test]
    fn unpack_inverts_pack(vals in prop::collection::vec(0u8..32, 0..600)) {
        let packed = pack(&vals);
        prop_assert_eq!(unpack(&packed, vals.len()), vals);
    }
}
