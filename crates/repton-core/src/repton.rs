// crates/repton-core/src/repton.rs
//
// First game: twelve 32x32 levels packed back to back at a fixed offset.

use tracing::debug;

use crate::codec::{bitstream, scramble};
use crate::container::Container;
use crate::error::{MapError, Result};
use crate::grid::{validate_collection, LevelCollection, TileGrid, GRID_COLUMNS, GRID_ROWS};
use crate::layout::{Machine, ReptonLayout, SpriteTable};
use crate::palette::{repton_palette, Palette};
use crate::sprite::{SpriteAssembler, SpriteSheet, ELECTRON_SPRITE_TABLE, FRAGMENT_ROWS};

/// Entry count of the tape image release whose program data is scrambled.
pub const LEGACY_SCRAMBLED_SHAPE: usize = 4;

/// Level codec for one machine layout.
#[derive(Clone, Copy, Debug)]
pub struct ReptonCodec {
    layout: &'static ReptonLayout,
}

impl ReptonCodec {
    pub fn new(layout: &'static ReptonLayout) -> Self {
        ReptonCodec { layout }
    }

    pub fn layout(&self) -> &'static ReptonLayout {
        self.layout
    }

    pub fn decode(&self, blob: &[u8]) -> Result<LevelCollection> {
        MapError::check_size(self.layout.blob_len, blob.len())?;

        let cells = GRID_ROWS * GRID_COLUMNS;
        (0..self.layout.level_count)
            .map(|n| {
                let start = self.layout.level_offset(n);
                let span = &blob[start..start + self.layout.level_stride];
                TileGrid::from_cells(bitstream::unpack(span, cells))
            })
            .collect()
    }

    /// Header bytes before the level data, followed by every level packed in order.
    pub fn encode(&self, blob: &[u8], levels: &[TileGrid]) -> Result<Vec<u8>> {
        MapError::check_size(self.layout.blob_len, blob.len())?;
        validate_collection(levels, self.layout.level_count)?;

        let mut out = Vec::with_capacity(self.layout.blob_len);
        out.extend_from_slice(&blob[..self.layout.levels_start]);
        for grid in levels {
            out.extend_from_slice(&bitstream::pack(grid.cells()));
        }

        MapError::check_size(self.layout.blob_len, out.len())?;
        debug!(levels = levels.len(), bytes = out.len(), "encoded levels");
        Ok(out)
    }

    pub fn sprites(&self, blob: &[u8]) -> Result<SpriteSheet> {
        MapError::check_size(self.layout.blob_len, blob.len())?;

        let region = &blob[self.layout.sprites_start..self.layout.sprites_finish];
        let asm = SpriteAssembler::new(region);

        let sheet: SpriteSheet = match self.layout.sprite_table {
            SpriteTable::Quadrants => ELECTRON_SPRITE_TABLE
                .iter()
                .map(|&offsets| asm.quadrants(offsets))
                .collect(),
            SpriteTable::Sequential { base, columns, rows, count } => {
                let fragments = columns * rows;
                (0..count)
                    .map(|n| {
                        let start = base + n * fragments * FRAGMENT_ROWS;
                        let offsets: Vec<usize> =
                            (0..fragments).map(|f| start + f * FRAGMENT_ROWS).collect();
                        asm.assemble(&offsets, columns)
                    })
                    .collect()
            }
        };
        Ok(sheet)
    }
}

/// An opened copy of the first game's program data.
///
/// `data` is always held unscrambled; `to_blob` reapplies scrambling for
/// releases that need it.
#[derive(Clone, Debug)]
pub struct Repton {
    codec: ReptonCodec,
    data: Vec<u8>,
    entry_index: Option<usize>,
    scrambled: bool,
}

impl Repton {
    pub fn from_blob(machine: Machine, blob: Vec<u8>, scrambled: bool) -> Result<Self> {
        let layout = ReptonLayout::for_machine(machine);
        MapError::check_size(layout.blob_len, blob.len())?;

        let data = if scrambled { scramble::scramble(&blob) } else { blob };
        Ok(Repton {
            codec: ReptonCodec::new(layout),
            data,
            entry_index: None,
            scrambled,
        })
    }

    /// Locate the program entry, check its size and unscramble the legacy
    /// Electron release (recognised by its entry count).
    pub fn from_container<C: Container>(container: &C, machine: Machine) -> Result<Self> {
        let layout = ReptonLayout::for_machine(machine);
        let (index, entry) = container.find_entry_by_name(layout.entry_name)?;
        let scrambled =
            machine == Machine::Electron && container.revision_shape() == LEGACY_SCRAMBLED_SHAPE;

        debug!(entry = %entry.display_name(), index, scrambled, "opened program entry");
        let mut game = Repton::from_blob(machine, entry.data.clone(), scrambled)?;
        game.entry_index = Some(index);
        Ok(game)
    }

    pub fn machine(&self) -> Machine {
        self.codec.layout().machine
    }

    pub fn codec(&self) -> &ReptonCodec {
        &self.codec
    }

    pub fn is_scrambled(&self) -> bool {
        self.scrambled
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn read_levels(&self) -> Result<LevelCollection> {
        self.codec.decode(&self.data)
    }

    pub fn write_levels(&mut self, levels: &[TileGrid]) -> Result<()> {
        self.data = self.codec.encode(&self.data, levels)?;
        Ok(())
    }

    pub fn read_sprites(&self) -> Result<SpriteSheet> {
        self.codec.sprites(&self.data)
    }

    pub fn palette(&self, level: usize) -> Option<Palette> {
        repton_palette(level)
    }

    /// Program data as stored in the container.
    pub fn to_blob(&self) -> Vec<u8> {
        if self.scrambled {
            scramble::scramble(&self.data)
        } else {
            self.data.clone()
        }
    }

    /// Write the program data back into the entry it was read from.
    pub fn save_to<C: Container>(&self, container: &mut C) -> Result<()> {
        let index = match self.entry_index {
            Some(i) => i,
            None => container.find_entry_by_name(self.codec.layout().entry_name)?.0,
        };
        container.replace_entry(index, self.to_blob())
    }
}
