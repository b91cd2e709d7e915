// crates/repton-core/src/repton2/mod.rs
//
// Second game: sixteen screens assembled from shared 8-row areas, plus the
// puzzle, transporter and totals tables that precede the area data.

pub mod area;
pub mod puzzle;
pub mod totals;
pub mod transporter;

use std::fmt;

use tracing::{debug, warn};

use crate::codec::bitstream;
use crate::container::Container;
use crate::error::{MapError, Result};
use crate::grid::{validate_collection, LevelCollection, TileGrid, GRID_COLUMNS, GRID_ROWS};
use crate::layout::{Machine, Repton2Layout};
use crate::palette::{repton2_palette, Palette};
use crate::sprite::{SpriteAssembler, SpriteSheet, SPIRIT_FRAGMENTS};

use self::area::{AreaTableBuilder, Selector, AREA_BYTES, AREA_CELLS, AREA_ROWS};
use self::puzzle::{decode_puzzle, encode_puzzle, PuzzleTable, PIECE_COUNT, PUZZLE_RECORD_LEN};
use self::totals::{Totals, TOTALS_LEN};
use self::transporter::{decode_transporters, encode_transporters, Transporter, TransporterGraph};

/// Tile values of the second game.
pub mod tiles {
    use crate::grid::TileIndex;

    pub const BLANK: TileIndex = 0;
    pub const DESTINATION: TileIndex = 1;
    pub const TRANSPORTER: TileIndex = 2;
    pub const EARTH: [TileIndex; 3] = [3, 4, 5];
    pub const DIAMOND: TileIndex = 6;
    pub const KEY: TileIndex = 7;
    pub const SKULL: TileIndex = 8;
    pub const SPIRIT: TileIndex = 9;
    pub const CAGE: TileIndex = 12;
    pub const SAFE: TileIndex = 13;
    pub const BOULDER: TileIndex = 14;
    pub const EGG: TileIndex = 15;
}

/// Screens in either release.
pub const SCREEN_COUNT: usize = 16;

/// Sprites per sheet: 32 tiles, 42 puzzle pieces, the spirit.
pub const SPRITE_COUNT: usize = 32 + PIECE_COUNT + 1;

const SPRITE_DEF_LEN: usize = 9;

/// A cell on a screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub screen: u8,
    pub x: u8,
    pub y: u8,
}

impl Location {
    pub const fn new(screen: u8, x: u8, y: u8) -> Self {
        Location { screen, x, y }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.screen, self.x, self.y]
    }

    /// True for a cell of a 32x32 screen below `screen_count`.
    pub fn is_within(self, screen_count: usize) -> bool {
        (self.screen as usize) < screen_count
            && (self.x as usize) < GRID_COLUMNS
            && (self.y as usize) < GRID_ROWS
    }
}

impl fmt::Display for Location {
    /// Screens are lettered A..P as in the game.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'A' + self.screen.min(25)) as char;
        write!(f, "{letter} ({},{})", self.x, self.y)
    }
}

/// Everything the editor changes in one program image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repton2Content {
    pub levels: LevelCollection,
    pub transporters: TransporterGraph,
    pub puzzle: PuzzleTable,
    pub totals: Totals,
}

#[derive(Clone, Copy, Debug)]
pub struct Repton2Codec {
    layout: &'static Repton2Layout,
}

impl Repton2Codec {
    pub fn new(layout: &'static Repton2Layout) -> Self {
        Repton2Codec { layout }
    }

    pub fn layout(&self) -> &'static Repton2Layout {
        self.layout
    }

    pub fn decode_levels(&self, blob: &[u8]) -> Result<LevelCollection> {
        MapError::check_size(self.layout.blob_len, blob.len())?;

        (0..self.layout.screen_count)
            .map(|screen| self.decode_screen(blob, screen))
            .collect()
    }

    fn decode_screen(&self, blob: &[u8], screen: usize) -> Result<TileGrid> {
        let selectors = self.layout.selector_offset(screen);
        let bands = self.layout.bands_for(screen);
        let mut cells = Vec::with_capacity(GRID_ROWS * GRID_COLUMNS);

        for &byte in &blob[selectors..selectors + bands] {
            match Selector::from_byte(byte) {
                Selector::Uniform(tile) => cells.extend(std::iter::repeat(tile).take(AREA_CELLS)),
                Selector::Area(index) => {
                    let start = self.layout.areas_start + index as usize * AREA_BYTES;
                    if start + AREA_BYTES > blob.len() {
                        return Err(MapError::Validation(format!(
                            "screen {screen}: area {index} lies outside the program data"
                        )));
                    }
                    cells.extend(bitstream::unpack(&blob[start..start + AREA_BYTES], AREA_CELLS));
                }
            }
        }

        cells.resize(GRID_ROWS * GRID_COLUMNS, tiles::BLANK);
        TileGrid::from_cells(cells)
    }

    /// Re-encode the screens into a copy of `blob`: new selectors, the area
    /// payloads in index order, and zero fill to the end of the data.
    ///
    /// Rows past the stored bands of the short screen must be blank.
    pub fn encode_levels(&self, blob: &[u8], levels: &[TileGrid]) -> Result<Vec<u8>> {
        MapError::check_size(self.layout.blob_len, blob.len())?;
        validate_collection(levels, self.layout.screen_count)?;

        for (screen, grid) in levels.iter().enumerate() {
            let stored_rows = self.layout.bands_for(screen) * AREA_ROWS;
            if grid.band(stored_rows, GRID_ROWS - stored_rows).iter().any(|&t| t != tiles::BLANK) {
                return Err(MapError::Validation(format!(
                    "screen {screen}: rows {stored_rows}..{GRID_ROWS} are not stored and must be blank"
                )));
            }
        }

        let mut builder = AreaTableBuilder::new();
        for (screen, grid) in levels.iter().enumerate() {
            for band in 0..self.layout.bands_for(screen) {
                builder.push(grid.band(band * AREA_ROWS, AREA_ROWS))?;
            }
        }
        let table = builder.finish();

        let mut out = blob.to_vec();
        let mut selectors = table.selectors.iter();
        for screen in 0..self.layout.screen_count {
            let offset = self.layout.selector_offset(screen);
            for band in 0..self.layout.bands_for(screen) {
                if let Some(s) = selectors.next() {
                    out[offset + band] = s.to_byte();
                }
            }
        }

        let payload = table.packed_payloads();
        let areas = &mut out[self.layout.areas_start..];
        areas.fill(0);
        areas[..payload.len()].copy_from_slice(&payload);

        debug!(
            areas = table.payloads.len(),
            uniform = table.uniform_count(),
            bytes = payload.len(),
            "encoded screens"
        );
        Ok(out)
    }

    pub fn decode_transporters(&self, blob: &[u8]) -> Result<TransporterGraph> {
        MapError::check_size(self.layout.blob_len, blob.len())?;
        let region = &blob[self.layout.transporters_start..self.layout.transporters_end];
        Ok(decode_transporters(region, self.layout.screen_count))
    }

    pub fn decode_puzzle(&self, blob: &[u8]) -> Result<PuzzleTable> {
        MapError::check_size(self.layout.blob_len, blob.len())?;
        let start = self.layout.puzzle_start;
        let region = &blob[start..start + PIECE_COUNT * PUZZLE_RECORD_LEN];
        Ok(decode_puzzle(region, self.layout.screen_count))
    }

    pub fn decode_totals(&self, blob: &[u8]) -> Result<Totals> {
        MapError::check_size(self.layout.blob_len, blob.len())?;
        let start = self.layout.totals_start;
        Totals::decode(&blob[start..start + TOTALS_LEN])
    }

    /// Write puzzle records, sentinel and transporters (in the order given)
    /// into a copy of `blob`.
    pub fn encode_objects<'a, I>(&self, blob: &[u8], puzzle: &PuzzleTable, transporters: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = &'a Transporter>,
    {
        MapError::check_size(self.layout.blob_len, blob.len())?;

        let transporters: Vec<&Transporter> = transporters.into_iter().collect();
        let screens = self.layout.screen_count;
        if let Some(t) = transporters
            .iter()
            .find(|t| !t.source.is_within(screens) || !t.destination.is_within(screens))
        {
            return Err(MapError::Validation(format!(
                "transporter {} -> {} lies outside the {screens} screens",
                t.source, t.destination
            )));
        }
        if let Some(loc) = puzzle.placements().keys().find(|l| !l.is_within(screens)) {
            return Err(MapError::Validation(format!(
                "puzzle piece at {loc} lies outside the {screens} screens"
            )));
        }

        let puzzle_bytes = encode_puzzle(puzzle);
        let region_len = self.layout.transporters_end - self.layout.transporters_start;
        let transporter_bytes = encode_transporters(transporters, region_len)?;

        let mut out = blob.to_vec();
        let p = self.layout.puzzle_start;
        out[p..p + puzzle_bytes.len()].copy_from_slice(&puzzle_bytes);
        let t = self.layout.transporters_start;
        out[t..t + region_len].copy_from_slice(&transporter_bytes);
        Ok(out)
    }

    pub fn encode_totals(&self, blob: &[u8], totals: &Totals) -> Result<Vec<u8>> {
        MapError::check_size(self.layout.blob_len, blob.len())?;
        let bytes = totals.encode()?;
        let mut out = blob.to_vec();
        let start = self.layout.totals_start;
        out[start..start + TOTALS_LEN].copy_from_slice(&bytes);
        Ok(out)
    }

    /// Decode all content. Stored totals that are not valid BCD are replaced
    /// by a recount of the decoded levels; use `decode_totals` to see the error.
    pub fn decode(&self, blob: &[u8]) -> Result<Repton2Content> {
        let levels = self.decode_levels(blob)?;
        let transporters = self.decode_transporters(blob)?;
        let puzzle = self.decode_puzzle(blob)?;
        let totals = match self.decode_totals(blob) {
            Ok(totals) => totals,
            Err(MapError::Validation(reason)) => {
                warn!(%reason, "stored totals unreadable, recounting from levels");
                Totals::recalculate(&levels, &transporters, &puzzle)
            }
            Err(e) => return Err(e),
        };
        Ok(Repton2Content {
            levels,
            transporters,
            puzzle,
            totals,
        })
    }

    /// Encode all content; transporters are written in graph order. Nothing is
    /// returned unless every part encodes.
    pub fn encode(&self, blob: &[u8], content: &Repton2Content) -> Result<Vec<u8>> {
        let out = self.encode_levels(blob, &content.levels)?;
        let out = self.encode_objects(&out, &content.puzzle, content.transporters.edges())?;
        self.encode_totals(&out, &content.totals)
    }

    /// 32 tile sprites, 42 puzzle-piece sprites, then the spirit.
    pub fn sprites(&self, blob: &[u8]) -> Result<SpriteSheet> {
        MapError::check_size(self.layout.blob_len, blob.len())?;

        let region = &blob[self.layout.sprites_start..self.layout.sprites_finish];
        let asm = SpriteAssembler::new(region);

        let defined = |defs: usize, count: usize| {
            (0..count).map(move |n| {
                let addr = defs + n * SPRITE_DEF_LEN;
                let offsets: Vec<usize> =
                    blob[addr..addr + SPRITE_DEF_LEN].iter().map(|&b| b as usize * 8).collect();
                offsets
            })
        };

        let mut sheet: SpriteSheet = defined(self.layout.sprite_defs, 32)
            .chain(defined(self.layout.puzzle_sprite_defs, PIECE_COUNT))
            .map(|offsets| asm.assemble(&offsets, 3))
            .collect();
        sheet.push(asm.nine(SPIRIT_FRAGMENTS));
        Ok(sheet)
    }
}

/// An opened copy of the second game's program data.
#[derive(Clone, Debug)]
pub struct Repton2 {
    codec: Repton2Codec,
    data: Vec<u8>,
    entry_index: Option<usize>,
}

impl Repton2 {
    pub fn from_blob(machine: Machine, blob: Vec<u8>) -> Result<Self> {
        let layout = Repton2Layout::for_machine(machine);
        MapError::check_size(layout.blob_len, blob.len())?;
        Ok(Repton2 {
            codec: Repton2Codec::new(layout),
            data: blob,
            entry_index: None,
        })
    }

    pub fn from_container<C: Container>(container: &C, machine: Machine) -> Result<Self> {
        let layout = Repton2Layout::for_machine(machine);
        let (index, entry) = container.find_entry_by_name(layout.entry_name)?;
        debug!(entry = %entry.display_name(), index, "opened program entry");

        let mut game = Repton2::from_blob(machine, entry.data.clone())?;
        game.entry_index = Some(index);
        Ok(game)
    }

    pub fn machine(&self) -> Machine {
        self.codec.layout().machine
    }

    pub fn codec(&self) -> &Repton2Codec {
        &self.codec
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn read_levels(&self) -> Result<LevelCollection> {
        self.codec.decode_levels(&self.data)
    }

    pub fn read_transporters(&self) -> Result<TransporterGraph> {
        self.codec.decode_transporters(&self.data)
    }

    pub fn read_puzzle(&self) -> Result<PuzzleTable> {
        self.codec.decode_puzzle(&self.data)
    }

    pub fn read_totals(&self) -> Result<Totals> {
        self.codec.decode_totals(&self.data)
    }

    pub fn read_content(&self) -> Result<Repton2Content> {
        self.codec.decode(&self.data)
    }

    pub fn read_sprites(&self) -> Result<SpriteSheet> {
        self.codec.sprites(&self.data)
    }

    pub fn palette(&self, screen: usize) -> Option<Palette> {
        repton2_palette(screen)
    }

    /// Encode `content` into the program data. On any error the data is left
    /// as it was.
    pub fn write(&mut self, content: &Repton2Content) -> Result<()> {
        self.data = self.codec.encode(&self.data, content)?;
        Ok(())
    }

    pub fn to_blob(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn save_to<C: Container>(&self, container: &mut C) -> Result<()> {
        let index = match self.entry_index {
            Some(i) => i,
            None => container.find_entry_by_name(self.codec.layout().entry_name)?.0,
        };
        container.replace_entry(index, self.to_blob())
    }
}
