// crates/repton-core/src/repton2/puzzle.rs

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::{MapError, Result};
use crate::repton2::{Location, SCREEN_COUNT};

pub const PIECE_COUNT: usize = 42;

/// Record layout: screen, x, y, destination code.
pub const PUZZLE_RECORD_LEN: usize = 4;

/// Marker written after the last puzzle record.
pub const PUZZLE_SENTINEL: [u8; 8] = [0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00];

/// Bytes of the puzzle records plus the sentinel.
pub const PUZZLE_REGION_LEN: usize = PIECE_COUNT * PUZZLE_RECORD_LEN + PUZZLE_SENTINEL.len();

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PuzzlePiece {
    pub id: u8,
    /// Opaque to the codec; written back unchanged.
    pub destination: u8,
}

/// Puzzle pieces by cell, with the reverse numbering from piece id to cell.
///
/// Both maps change together: every placed piece has exactly one numbering
/// entry, and an unplaced id has none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PuzzleTable {
    placements: BTreeMap<Location, PuzzlePiece>,
    numbering: BTreeMap<u8, Location>,
}

impl PuzzleTable {
    pub fn new() -> Self {
        PuzzleTable::default()
    }

    /// Place piece `id` at `location`, moving it if it was already placed and
    /// displacing any other piece on that cell. Returns the piece's previous
    /// location.
    pub fn place(&mut self, id: u8, location: Location, destination: u8) -> Result<Option<Location>> {
        if id as usize >= PIECE_COUNT {
            return Err(MapError::Validation(format!(
                "puzzle piece {id} out of range (0..{PIECE_COUNT})"
            )));
        }
        if !location.is_within(SCREEN_COUNT) {
            return Err(MapError::Validation(format!(
                "puzzle piece {id}: {location} is off the map"
            )));
        }

        let previous = self.remove(id);
        self.remove_at(location);

        self.placements.insert(location, PuzzlePiece { id, destination });
        self.numbering.insert(id, location);
        Ok(previous)
    }

    /// Take piece `id` off the map. Returns where it was.
    pub fn remove(&mut self, id: u8) -> Option<Location> {
        let location = self.numbering.remove(&id)?;
        self.placements.remove(&location);
        Some(location)
    }

    /// Clear the cell at `location`. Returns the piece that was there.
    pub fn remove_at(&mut self, location: Location) -> Option<PuzzlePiece> {
        let piece = self.placements.remove(&location)?;
        self.numbering.remove(&piece.id);
        Some(piece)
    }

    pub fn piece_at(&self, location: Location) -> Option<&PuzzlePiece> {
        self.placements.get(&location)
    }

    pub fn location_of(&self, id: u8) -> Option<Location> {
        self.numbering.get(&id).copied()
    }

    pub fn placements(&self) -> &BTreeMap<Location, PuzzlePiece> {
        &self.placements
    }

    pub fn numbering(&self) -> &BTreeMap<u8, Location> {
        &self.numbering
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Decode the puzzle records (sentinel excluded). The record index is the
/// piece id; all-zero records are unplaced ids.
///
/// A piece placed at A (0,0) with destination code 0 is therefore written as
/// an all-zero record and reads back unplaced, in the same way that empty
/// transporter padding reads back as a transporter at A (0,0).
pub fn decode_puzzle(records: &[u8], screen_count: usize) -> PuzzleTable {
    let mut table = PuzzleTable::new();
    for (id, r) in records
        .chunks_exact(PUZZLE_RECORD_LEN)
        .take(PIECE_COUNT)
        .enumerate()
    {
        if r.iter().all(|&b| b == 0) {
            continue;
        }
        let location = Location::new(r[0], r[1], r[2]);
        if !location.is_within(screen_count) {
            warn!(id, record = ?r, "dropping puzzle piece outside the screens");
            continue;
        }
        if let Err(e) = table.place(id as u8, location, r[3]) {
            warn!(id, error = %e, "dropping puzzle record");
        }
    }
    table
}

/// 42 records by id, zero-filled for unplaced ids, followed by the sentinel.
pub fn encode_puzzle(table: &PuzzleTable) -> Vec<u8> {
    let mut out = Vec::with_capacity(PUZZLE_REGION_LEN);
    for id in 0..PIECE_COUNT as u8 {
        match table.location_of(id) {
            Some(loc) => {
                let destination = table.placements[&loc].destination;
                out.extend_from_slice(&loc.to_bytes());
                out.push(destination);
            }
            None => out.extend_from_slice(&[0; PUZZLE_RECORD_LEN]),
        }
    }
    out.extend_from_slice(&PUZZLE_SENTINEL);
    out
}
