// crates/repton-core/src/repton2/totals.rs
//
// HUD counters, stored as packed BCD.

use crate::error::{MapError, Result};
use crate::grid::TileGrid;
use crate::repton2::puzzle::PuzzleTable;
use crate::repton2::tiles;
use crate::repton2::transporter::TransporterGraph;

/// Layout: diamonds lo, diamonds hi, earth lo, earth hi, monsters,
/// transporters, pieces.
pub const TOTALS_LEN: usize = 7;

const MAX_WIDE: u16 = 9999;
const MAX_NARROW: u16 = 99;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub diamonds: u16,
    pub earth: u16,
    pub monsters: u16,
    pub transporters: u16,
    pub pieces: u16,
}

/// Two decimal digits in one byte. `value` must be below 100.
#[inline]
pub fn to_bcd(value: u8) -> u8 {
    (value % 10) | ((value / 10) % 10) << 4
}

pub fn from_bcd(byte: u8) -> Result<u8> {
    let (hi, lo) = (byte >> 4, byte & 0x0f);
    if hi > 9 || lo > 9 {
        return Err(MapError::Validation(format!("invalid BCD byte {byte:#04x}")));
    }
    Ok(hi * 10 + lo)
}

impl Totals {
    pub fn encode(&self) -> Result<[u8; TOTALS_LEN]> {
        let wide = |name: &str, v: u16| -> Result<(u8, u8)> {
            if v > MAX_WIDE {
                return Err(MapError::Validation(format!("totals: {name} {v} above {MAX_WIDE}")));
            }
            Ok((to_bcd((v % 100) as u8), to_bcd((v / 100) as u8)))
        };
        let narrow = |name: &str, v: u16| -> Result<u8> {
            if v > MAX_NARROW {
                return Err(MapError::Validation(format!("totals: {name} {v} above {MAX_NARROW}")));
            }
            Ok(to_bcd(v as u8))
        };

        let (d_lo, d_hi) = wide("diamonds", self.diamonds)?;
        let (e_lo, e_hi) = wide("earth", self.earth)?;
        Ok([
            d_lo,
            d_hi,
            e_lo,
            e_hi,
            narrow("monsters", self.monsters)?,
            narrow("transporters", self.transporters)?,
            narrow("pieces", self.pieces)?,
        ])
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < TOTALS_LEN {
            return Err(MapError::Validation(format!(
                "totals: need {TOTALS_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let d = |i: usize| -> Result<u16> { Ok(from_bcd(bytes[i])? as u16) };
        Ok(Totals {
            diamonds: d(0)? + d(1)? * 100,
            earth: d(2)? + d(3)? * 100,
            monsters: d(4)?,
            transporters: d(5)?,
            pieces: d(6)?,
        })
    }

    /// Recount the totals from level content.
    ///
    /// Per screen: earth tiles and diamonds are counted, as are eggs (each
    /// hatches one monster). A screen holding a key turns all its safes into
    /// diamonds. On every screen but the first, each cage paired with a spirit
    /// yields one diamond.
    pub fn recalculate(
        levels: &[TileGrid],
        transporters: &TransporterGraph,
        puzzle: &PuzzleTable,
    ) -> Totals {
        let mut diamonds = 0usize;
        let mut earth = 0usize;
        let mut monsters = 0usize;

        for (screen, grid) in levels.iter().enumerate() {
            earth += tiles::EARTH.iter().map(|&t| grid.count(t)).sum::<usize>();
            diamonds += grid.count(tiles::DIAMOND);
            monsters += grid.count(tiles::EGG);

            if grid.contains(tiles::KEY) {
                diamonds += grid.count(tiles::SAFE);
            }
            if screen > 0 {
                diamonds += grid.count(tiles::CAGE).min(grid.count(tiles::SPIRIT));
            }
        }

        let clamp = |v: usize| v.min(u16::MAX as usize) as u16;
        Totals {
            diamonds: clamp(diamonds),
            earth: clamp(earth),
            monsters: clamp(monsters),
            transporters: clamp(transporters.len()),
            pieces: clamp(puzzle.len()),
        }
    }
}
