// crates/repton-core/tests/repton_levels.rs

use repton_core::codec::scramble::scramble;
use repton_core::container::{Container, Entry, EntryList};
use repton_core::layout::{ReptonLayout, REPTON_BBC, REPTON_ELECTRON};
use repton_core::{Machine, MapError, Repton, TileGrid};

fn lcg_blob(len: usize, mut x: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            (x >> 56) as u8
        })
        .collect()
}

/// Header filled with a recognisable pattern, level data zero.
fn zero_level_blob(layout: &ReptonLayout) -> Vec<u8> {
    let mut blob = vec![0u8; layout.blob_len];
    for (i, b) in blob[..layout.levels_start].iter_mut().enumerate() {
        *b = (i * 7 + 3) as u8;
    }
    blob
}

#[test]
fn zero_levels_decode_to_blank_grids_and_reencode_in_place() {
    for layout in [&REPTON_ELECTRON, &REPTON_BBC] {
        let blob = zero_level_blob(layout);
        let game = Repton::from_blob(layout.machine, blob.clone(), false).unwrap();

        let levels = game.read_levels().unwrap();
        assert_eq!(levels.len(), 12);
        for grid in &levels {
            assert_eq!(grid, &TileGrid::blank());
        }

        let encoded = game.codec().encode(&blob, &levels).unwrap();
        assert_eq!(encoded.len(), layout.blob_len);
        assert_eq!(&encoded[..layout.levels_start], &blob[..layout.levels_start]);
        assert_eq!(encoded, blob);
    }
}

#[test]
fn arbitrary_level_bytes_roundtrip_byte_identical() {
    let blob = lcg_blob(REPTON_ELECTRON.blob_len, 0xabcdef);
    let mut game = Repton::from_blob(Machine::Electron, blob.clone(), false).unwrap();

    let levels = game.read_levels().unwrap();
    game.write_levels(&levels).unwrap();

    assert_eq!(game.data(), &blob[..]);
    assert_eq!(game.read_levels().unwrap(), levels);
}

#[test]
fn edited_level_survives_reencode() {
    let blob = zero_level_blob(&REPTON_BBC);
    let mut game = Repton::from_blob(Machine::Bbc, blob, false).unwrap();

    let mut levels = game.read_levels().unwrap();
    levels[3].set(5, 7, 23).unwrap();
    levels[11].set(31, 31, 31).unwrap();
    game.write_levels(&levels).unwrap();

    let again = game.read_levels().unwrap();
    assert_eq!(again[3].get(5, 7), Some(23));
    assert_eq!(again[11].get(31, 31), Some(31));
    assert_eq!(again, levels);
}

#[test]
fn wrong_size_is_rejected() {
    let err = Repton::from_blob(Machine::Electron, vec![0; 0x4a01], false).unwrap_err();
    match err {
        MapError::IncorrectSize { expected, actual } => {
            assert_eq!(expected, 0x4a00);
            assert_eq!(actual, 0x4a01);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn encode_rejects_wrong_level_count() {
    let blob = zero_level_blob(&REPTON_ELECTRON);
    let mut game = Repton::from_blob(Machine::Electron, blob, false).unwrap();
    let mut levels = game.read_levels().unwrap();
    levels.pop();
    assert!(matches!(game.write_levels(&levels), Err(MapError::Validation(_))));
}

#[test]
fn missing_entry_is_not_found() {
    let container = EntryList::new(vec![Entry::new(b"REPTON1", vec![0; 0x4a00])]);
    let err = Repton::from_container(&container, Machine::Electron).unwrap_err();
    assert!(matches!(err, MapError::NotFound(name) if name == "REPTON2"));
}

#[test]
fn legacy_tape_release_is_unscrambled_and_rescrambled() {
    let plain = zero_level_blob(&REPTON_ELECTRON);
    let stored = scramble(&plain);
    let mut container = EntryList::new(vec![
        Entry::new(b"REPTON", vec![1, 2, 3]),
        Entry::new(b"REPTON1", vec![4, 5, 6]),
        Entry::new(b"SCREEN", vec![7]),
        Entry::new(b"REPTON2", stored.clone()),
    ]);

    let mut game = Repton::from_container(&container, Machine::Electron).unwrap();
    assert!(game.is_scrambled());
    assert_eq!(game.data(), &plain[..]);

    let mut levels = game.read_levels().unwrap();
    levels[0].set(0, 0, 9).unwrap();
    game.write_levels(&levels).unwrap();
    game.save_to(&mut container).unwrap();

    let saved = &container.entry(3).unwrap().data;
    assert_eq!(saved.len(), 0x4a00);
    let reopened = Repton::from_container(&container, Machine::Electron).unwrap();
    assert_eq!(reopened.read_levels().unwrap()[0].get(0, 0), Some(9));
    assert_eq!(container.entry(0).unwrap().data, vec![1, 2, 3]);
}

#[test]
fn other_releases_are_not_scrambled() {
    let plain = zero_level_blob(&REPTON_ELECTRON);
    let container = EntryList::new(vec![
        Entry::new(b"REPTON", vec![]),
        Entry::new(b"REPTON2", plain.clone()),
    ]);
    let game = Repton::from_container(&container, Machine::Electron).unwrap();
    assert!(!game.is_scrambled());
    assert_eq!(game.to_blob(), plain);
}

#[test]
fn sprite_sheets_have_machine_geometry() {
    let e = Repton::from_blob(Machine::Electron, lcg_blob(0x4a00, 1), false).unwrap();
    let sprites = e.read_sprites().unwrap();
    assert_eq!(sprites.len(), 32);
    assert!(sprites.iter().all(|s| s.width == 8 && s.height == 16));
    assert!(sprites.iter().flat_map(|s| s.pixels.iter()).all(|&p| p < 4));

    let b = Repton::from_blob(Machine::Bbc, lcg_blob(0x5600, 2), false).unwrap();
    let sprites = b.read_sprites().unwrap();
    assert_eq!(sprites.len(), 32);
    assert!(sprites.iter().all(|s| s.width == 16 && s.height == 32));
}

#[test]
fn blank_sprite_reuses_one_fragment() {
    let mut blob = zero_level_blob(&REPTON_ELECTRON);
    let blank = REPTON_ELECTRON.sprites_start + 0x6a0;
    blob[blank..blank + 8].copy_from_slice(&[0x11; 8]);

    let game = Repton::from_blob(Machine::Electron, blob, false).unwrap();
    let sprite = &game.read_sprites().unwrap()[0];
    // 0x11 sets pixel bits 0 and 4: the rightmost pixel of each quadrant is 3.
    for y in 0..16 {
        assert_eq!(sprite.row(y), &[0, 0, 0, 3, 0, 0, 0, 3]);
    }
}

#[test]
fn palettes_follow_level_colours() {
    let game = Repton::from_blob(Machine::Electron, vec![0; 0x4a00], false).unwrap();
    let p = game.palette(1).unwrap();
    assert_eq!((p[2].r, p[2].g, p[2].b), (0, 0, 255));
    assert_eq!((p[3].r, p[3].g, p[3].b), (0, 0, 0));
    assert!(game.palette(12).is_none());
}
