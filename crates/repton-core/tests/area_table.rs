// crates/repton-core/tests/area_table.rs

use repton_core::layout::REPTON2_ELECTRON;
use repton_core::repton2::area::{AreaTableBuilder, Selector, AREA_BYTES, AREA_CELLS, MAX_AREAS};
use repton_core::repton2::Repton2Codec;
use repton_core::{MapError, TileGrid};

fn band_with_mark(n: usize) -> Vec<u8> {
    let mut band = vec![0u8; AREA_CELLS];
    band[n % AREA_CELLS] = 1 + (n / AREA_CELLS) as u8;
    band
}

#[test]
fn uniform_bands_use_selector_markers() {
    let mut b = AreaTableBuilder::new();
    assert_eq!(b.push(&vec![0; AREA_CELLS]).unwrap(), Selector::Uniform(0));
    assert_eq!(b.push(&vec![17; AREA_CELLS]).unwrap(), Selector::Uniform(17));
    assert_eq!(b.allocated(), 0);

    assert_eq!(Selector::Uniform(17).to_byte(), 0x91);
    assert_eq!(Selector::from_byte(0x80), Selector::Uniform(0));
    assert_eq!(Selector::from_byte(0x2f), Selector::Area(0x2f));

    let table = b.finish();
    assert!(table.payloads.is_empty());
    assert_eq!(table.uniform_count(), 2);
}

#[test]
fn identical_bands_share_one_area() {
    let mut b = AreaTableBuilder::new();
    let first = band_with_mark(3);
    let second = band_with_mark(9);

    assert_eq!(b.push(&first).unwrap(), Selector::Area(0));
    assert_eq!(b.push(&second).unwrap(), Selector::Area(1));
    assert_eq!(b.push(&first).unwrap(), Selector::Area(0));
    assert_eq!(b.push(&vec![5; AREA_CELLS]).unwrap(), Selector::Uniform(5));
    assert_eq!(b.push(&second).unwrap(), Selector::Area(1));

    let table = b.finish();
    assert_eq!(table.selectors.len(), 5);
    assert_eq!(table.payloads.len(), 2);
    assert_eq!(&table.payloads[0][..], &first[..]);
    assert_eq!(&table.payloads[1][..], &second[..]);
    assert_eq!(table.packed_payloads().len(), 2 * AREA_BYTES);
}

#[test]
fn forty_eight_distinct_areas_fit() {
    let mut b = AreaTableBuilder::new();
    for n in 0..MAX_AREAS {
        assert_eq!(b.push(&band_with_mark(n)).unwrap(), Selector::Area(n as u8));
    }
    assert_eq!(b.finish().payloads.len(), MAX_AREAS);
}

#[test]
fn forty_ninth_distinct_area_overflows() {
    let mut b = AreaTableBuilder::new();
    for n in 0..MAX_AREAS {
        b.push(&band_with_mark(n)).unwrap();
    }
    // A repeat still fits.
    assert_eq!(b.push(&band_with_mark(0)).unwrap(), Selector::Area(0));

    match b.push(&band_with_mark(MAX_AREAS)) {
        Err(MapError::CapacityExceeded { what, needed, limit }) => {
            assert_eq!(what, "area");
            assert_eq!(needed, 49);
            assert_eq!(limit, 48);
        }
        other => panic!("expected capacity error, got {other:?}"),
    }
}

#[test]
fn wrong_band_length_is_rejected() {
    let mut b = AreaTableBuilder::with_limit(4);
    assert!(matches!(b.push(&[0; 10]), Err(MapError::Validation(_))));
}

#[test]
fn encoder_reports_overflow_and_leaves_blob_alone() {
    let codec = Repton2Codec::new(&REPTON2_ELECTRON);
    let blob = vec![0u8; REPTON2_ELECTRON.blob_len];

    // Every stored band of every screen made distinct: 63 areas wanted.
    let mut levels = vec![TileGrid::blank(); 16];
    let mut n = 0;
    for (screen, grid) in levels.iter_mut().enumerate() {
        for band in 0..REPTON2_ELECTRON.bands_for(screen) {
            grid.set(n % 32, band * 8 + n / 32, 1).unwrap();
            n += 1;
        }
    }
    assert_eq!(n, 63);

    let err = codec.encode_levels(&blob, &levels).unwrap_err();
    assert!(matches!(
        err,
        MapError::CapacityExceeded { what: "area", needed: 49, limit: 48 }
    ));
}
