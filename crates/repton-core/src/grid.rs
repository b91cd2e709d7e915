// crates/repton-core/src/grid.rs

use crate::error::{MapError, Result};

pub type TileIndex = u8;

/// Highest tile value a 5-bit cell can hold.
pub const MAX_TILE: TileIndex = 31;

pub const GRID_COLUMNS: usize = 32;
pub const GRID_ROWS: usize = 32;

/// One screen of tiles, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileGrid {
    rows: usize,
    cells: Vec<TileIndex>,
}

impl TileGrid {
    /// A grid of `rows` rows filled with `tile`.
    pub fn filled(rows: usize, tile: TileIndex) -> Result<Self> {
        check_tile(tile)?;
        Ok(TileGrid {
            rows,
            cells: vec![tile; rows * GRID_COLUMNS],
        })
    }

    pub fn blank() -> Self {
        TileGrid {
            rows: GRID_ROWS,
            cells: vec![0; GRID_ROWS * GRID_COLUMNS],
        }
    }

    /// Build from row-major cells. `cells.len()` must be a whole number of rows.
    pub fn from_cells(cells: Vec<TileIndex>) -> Result<Self> {
        if cells.len() % GRID_COLUMNS != 0 {
            return Err(MapError::Validation(format!(
                "grid: {} cells is not a multiple of {} columns",
                cells.len(),
                GRID_COLUMNS
            )));
        }
        if let Some(&bad) = cells.iter().find(|&&t| t > MAX_TILE) {
            return Err(MapError::Validation(format!("grid: tile {bad} out of range")));
        }
        Ok(TileGrid {
            rows: cells.len() / GRID_COLUMNS,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        GRID_COLUMNS
    }

    pub fn get(&self, x: usize, y: usize) -> Option<TileIndex> {
        if x >= GRID_COLUMNS || y >= self.rows {
            return None;
        }
        Some(self.cells[y * GRID_COLUMNS + x])
    }

    pub fn set(&mut self, x: usize, y: usize, tile: TileIndex) -> Result<()> {
        check_tile(tile)?;
        if x >= GRID_COLUMNS || y >= self.rows {
            return Err(MapError::Validation(format!(
                "grid: cell ({x},{y}) outside {}x{}",
                GRID_COLUMNS, self.rows
            )));
        }
        self.cells[y * GRID_COLUMNS + x] = tile;
        Ok(())
    }

    pub fn row(&self, y: usize) -> &[TileIndex] {
        &self.cells[y * GRID_COLUMNS..(y + 1) * GRID_COLUMNS]
    }

    pub fn cells(&self) -> &[TileIndex] {
        &self.cells
    }

    /// Rows `start..start + count` as one row-major slice.
    pub fn band(&self, start: usize, count: usize) -> &[TileIndex] {
        &self.cells[start * GRID_COLUMNS..(start + count) * GRID_COLUMNS]
    }

    pub fn count(&self, tile: TileIndex) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    pub fn contains(&self, tile: TileIndex) -> bool {
        self.cells.contains(&tile)
    }

    pub fn fill(&mut self, tile: TileIndex) -> Result<()> {
        check_tile(tile)?;
        self.cells.fill(tile);
        Ok(())
    }
}

/// Ordered screens of one game. Length is fixed per variant.
pub type LevelCollection = Vec<TileGrid>;

/// Check that a collection has `expected` grids of `GRID_ROWS` x `GRID_COLUMNS`.
pub fn validate_collection(levels: &[TileGrid], expected: usize) -> Result<()> {
    if levels.len() != expected {
        return Err(MapError::Validation(format!(
            "expected {expected} levels, got {}",
            levels.len()
        )));
    }
    for (n, grid) in levels.iter().enumerate() {
        if grid.rows() != GRID_ROWS {
            return Err(MapError::Validation(format!(
                "level {n}: expected {GRID_ROWS} rows, got {}",
                grid.rows()
            )));
        }
    }
    Ok(())
}

#[inline]
fn check_tile(tile: TileIndex) -> Result<()> {
    if tile > MAX_TILE {
        return Err(MapError::Validation(format!("tile {tile} out of range")));
    }
    Ok(())
}
