// crates/repton-core/src/layout.rs
//
// Fixed byte layouts of the embedded program image, one per (game, machine).
// Every offset is relative to the start of the named container entry.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Machine {
    /// Acorn Electron, tape image.
    Electron,
    /// BBC Micro, DFS disk image.
    Bbc,
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Machine::Electron => f.write_str("Electron"),
            Machine::Bbc => f.write_str("BBC"),
        }
    }
}

/// Tile pixel size plus the integer scale used to show it with square-ish pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGeometry {
    pub width: usize,
    pub height: usize,
    pub x_scale: usize,
    pub y_scale: usize,
}

/// How the sprite table of a first-game layout is addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteTable {
    /// Fixed 2x2 fragment table (see `sprite::ELECTRON_SPRITE_TABLE`).
    Quadrants,
    /// `count` sprites of `columns x rows` consecutive fragments starting at `base`.
    Sequential {
        base: usize,
        columns: usize,
        rows: usize,
        count: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReptonLayout {
    pub machine: Machine,
    pub entry_name: &'static [u8],
    pub blob_len: usize,
    pub levels_start: usize,
    pub level_count: usize,
    /// Bytes per packed 32x32 level.
    pub level_stride: usize,
    pub sprites_start: usize,
    pub sprites_finish: usize,
    pub sprite_table: SpriteTable,
    pub tile: TileGeometry,
}

pub static REPTON_ELECTRON: ReptonLayout = ReptonLayout {
    machine: Machine::Electron,
    entry_name: b"REPTON2",
    blob_len: 0x4a00,
    levels_start: 0x2c00,
    level_count: 12,
    level_stride: 640,
    sprites_start: 0x2500,
    sprites_finish: 0x2c00,
    sprite_table: SpriteTable::Quadrants,
    tile: TileGeometry { width: 8, height: 16, x_scale: 4, y_scale: 2 },
};

pub static REPTON_BBC: ReptonLayout = ReptonLayout {
    machine: Machine::Bbc,
    entry_name: b"D.REPTON2",
    blob_len: 0x5600,
    levels_start: 0x3800,
    level_count: 12,
    level_stride: 640,
    sprites_start: 0x25c0,
    sprites_finish: 0x3600,
    sprite_table: SpriteTable::Sequential { base: 0x40, columns: 4, rows: 4, count: 32 },
    tile: TileGeometry { width: 16, height: 32, x_scale: 2, y_scale: 1 },
};

impl ReptonLayout {
    pub fn for_machine(machine: Machine) -> &'static ReptonLayout {
        match machine {
            Machine::Electron => &REPTON_ELECTRON,
            Machine::Bbc => &REPTON_BBC,
        }
    }

    pub fn level_offset(&self, number: usize) -> usize {
        self.levels_start + number * self.level_stride
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Repton2Layout {
    pub machine: Machine,
    pub entry_name: &'static [u8],
    pub blob_len: usize,
    pub screen_count: usize,
    /// Screen that stores only three bands; its last eight rows are blank.
    pub short_screen: usize,
    /// 9 fragment bytes per tile sprite.
    pub sprite_defs: usize,
    pub puzzle_sprite_defs: usize,
    pub sprites_start: usize,
    pub sprites_finish: usize,
    pub puzzle_start: usize,
    pub sentinel_start: usize,
    pub transporters_start: usize,
    pub transporters_end: usize,
    pub totals_start: usize,
    /// 4 area selector bytes per screen.
    pub selectors_start: usize,
    pub areas_start: usize,
    pub tile: TileGeometry,
}

const BBC_SHIFT: usize = 0xc00;

pub static REPTON2_ELECTRON: Repton2Layout = Repton2Layout {
    machine: Machine::Electron,
    entry_name: b"REPTONB",
    blob_len: 0x4c00,
    screen_count: 16,
    short_screen: 15,
    sprite_defs: 0x1b00,
    puzzle_sprite_defs: 0x1c20,
    sprites_start: 0x2340,
    sprites_finish: 0x2e00,
    puzzle_start: 0x1da0,
    sentinel_start: 0x1e48,
    transporters_start: 0x1e50,
    transporters_end: 0x1fd0,
    totals_start: 0x1fd0,
    selectors_start: 0x2000,
    areas_start: 0x2e00,
    tile: TileGeometry { width: 12, height: 24, x_scale: 2, y_scale: 1 },
};

pub static REPTON2_BBC: Repton2Layout = Repton2Layout {
    machine: Machine::Bbc,
    entry_name: b"D.REPTONB",
    blob_len: 0x4c00 + BBC_SHIFT,
    screen_count: 16,
    short_screen: 15,
    sprite_defs: 0x1b00 + BBC_SHIFT,
    puzzle_sprite_defs: 0x1c20 + BBC_SHIFT,
    sprites_start: 0x2340 + BBC_SHIFT,
    sprites_finish: 0x2e00 + BBC_SHIFT,
    puzzle_start: 0x1da0 + BBC_SHIFT,
    sentinel_start: 0x1e48 + BBC_SHIFT,
    transporters_start: 0x1e50 + BBC_SHIFT,
    transporters_end: 0x1fd0 + BBC_SHIFT,
    totals_start: 0x1fd0 + BBC_SHIFT,
    selectors_start: 0x2000 + BBC_SHIFT,
    areas_start: 0x2e00 + BBC_SHIFT,
    tile: TileGeometry { width: 12, height: 24, x_scale: 2, y_scale: 1 },
};

impl Repton2Layout {
    pub fn for_machine(machine: Machine) -> &'static Repton2Layout {
        match machine {
            Machine::Electron => &REPTON2_ELECTRON,
            Machine::Bbc => &REPTON2_BBC,
        }
    }

    pub fn selector_offset(&self, screen: usize) -> usize {
        self.selectors_start + screen * 4
    }

    pub fn bands_for(&self, screen: usize) -> usize {
        if screen == self.short_screen {
            3
        } else {
            4
        }
    }
}
