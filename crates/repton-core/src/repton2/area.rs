// crates/repton-core/src/repton2/area.rs
//
// Screens of the second game are stored as four 8-row bands ("areas"). Each
// band is either a uniform fill, encoded directly in its selector byte, or an
// index into a shared table of packed areas.

use std::collections::HashMap;

use crate::codec::bitstream;
use crate::error::{MapError, Result};
use crate::grid::{TileIndex, GRID_COLUMNS};

pub const AREA_ROWS: usize = 8;
pub const AREA_CELLS: usize = AREA_ROWS * GRID_COLUMNS;
/// Packed size of one area: 256 cells x 5 bits.
pub const AREA_BYTES: usize = 160;
/// Number of areas the program has room for.
pub const MAX_AREAS: usize = 0x30;

const UNIFORM_FLAG: u8 = 0x80;
const UNIFORM_TILE_MASK: u8 = 0x1f;

pub type Area = [TileIndex; AREA_CELLS];

/// How one band of a screen is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    /// All 256 cells hold this tile.
    Uniform(TileIndex),
    /// Index into the packed area table.
    Area(u8),
}

impl Selector {
    pub fn from_byte(b: u8) -> Self {
        if b & UNIFORM_FLAG != 0 {
            Selector::Uniform(b & UNIFORM_TILE_MASK)
        } else {
            Selector::Area(b)
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Selector::Uniform(tile) => UNIFORM_FLAG | (tile & UNIFORM_TILE_MASK),
            Selector::Area(index) => index,
        }
    }
}

/// Area table produced by one encode: a selector per band, in band order, and
/// the distinct area payloads in index order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaTable {
    pub selectors: Vec<Selector>,
    pub payloads: Vec<Area>,
}

impl AreaTable {
    /// Payloads packed back to back, `AREA_BYTES` each.
    pub fn packed_payloads(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payloads.len() * AREA_BYTES);
        for area in &self.payloads {
            out.extend_from_slice(&bitstream::pack(area));
        }
        out
    }

    pub fn uniform_count(&self) -> usize {
        self.selectors
            .iter()
            .filter(|s| matches!(s, Selector::Uniform(_)))
            .count()
    }
}

/// Assigns selectors to bands for a single encode.
///
/// Bands must be pushed in storage order (screen 0 bands 0..3, screen 1, ...).
/// Indices are allocated sequentially from 0 in order of first appearance.
#[derive(Debug)]
pub struct AreaTableBuilder {
    seen: HashMap<Area, u8>,
    bands: Vec<(Selector, Area)>,
    limit: usize,
}

impl Default for AreaTableBuilder {
    fn default() -> Self {
        AreaTableBuilder::new()
    }
}

impl AreaTableBuilder {
    pub fn new() -> Self {
        AreaTableBuilder::with_limit(MAX_AREAS)
    }

    pub fn with_limit(limit: usize) -> Self {
        AreaTableBuilder {
            seen: HashMap::new(),
            bands: Vec::new(),
            limit,
        }
    }

    /// Number of distinct areas allocated so far.
    pub fn allocated(&self) -> usize {
        self.seen.len()
    }

    /// Add the next band (256 cells, row-major) and return its selector.
    pub fn push(&mut self, band: &[TileIndex]) -> Result<Selector> {
        let area: Area = band.try_into().map_err(|_| {
            MapError::Validation(format!("area: expected {AREA_CELLS} cells, got {}", band.len()))
        })?;

        let selector = if let Some(&index) = self.seen.get(&area) {
            Selector::Area(index)
        } else if area.iter().all(|&t| t == area[0]) {
            Selector::Uniform(area[0])
        } else {
            let index = self.seen.len();
            if index >= self.limit {
                return Err(MapError::CapacityExceeded {
                    what: "area",
                    needed: index + 1,
                    limit: self.limit,
                });
            }
            self.seen.insert(area, index as u8);
            Selector::Area(index as u8)
        };

        self.bands.push((selector, area));
        Ok(selector)
    }

    /// Collect the payloads in increasing index order.
    ///
    /// Bands are scanned again in push order; uniform bands and bands whose
    /// index is below the next expected index are skipped, so a shared area is
    /// written once.
    pub fn finish(self) -> AreaTable {
        let mut payloads = Vec::with_capacity(self.seen.len());
        let mut expected: u8 = 0;

        for (selector, area) in &self.bands {
            match *selector {
                Selector::Uniform(_) => continue,
                Selector::Area(index) if index < expected => continue,
                Selector::Area(index) => {
                    debug_assert_eq!(index, expected);
                    payloads.push(*area);
                    expected += 1;
                }
            }
        }

        AreaTable {
            selectors: self.bands.into_iter().map(|(s, _)| s).collect(),
            payloads,
        }
    }
}
