// crates/repton-core/src/sprite.rs
//
// Sprites are stored as 8-byte fragments, one byte per row of four 2-bit
// pixels. Bit n and bit n+4 of a byte hold the low and high bits of one pixel,
// with bit 3/7 being the leftmost pixel.

pub const FRAGMENT_ROWS: usize = 8;
pub const FRAGMENT_COLUMNS: usize = 4;

/// A `height x width` image of 2-bit pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Sprite {
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == 0)
    }
}

pub type SpriteSheet = Vec<Sprite>;

/// Decode one fragment byte into four pixels, leftmost first.
#[inline]
pub fn decode_columns(mut byte: u8) -> [u8; FRAGMENT_COLUMNS] {
    let mut columns = [0u8; FRAGMENT_COLUMNS];
    for i in 0..FRAGMENT_COLUMNS {
        columns[FRAGMENT_COLUMNS - 1 - i] = (byte & 0x01) | ((byte & 0x10) >> 3);
        byte >>= 1;
    }
    columns
}

/// Reconstructs sprites from fragments of a sprite data region.
pub struct SpriteAssembler<'a> {
    data: &'a [u8],
}

impl<'a> SpriteAssembler<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        SpriteAssembler { data }
    }

    /// Decode the 8x4 fragment at `offset` within the region.
    ///
    /// # Panics
    ///
    /// Panics if the fragment extends past the end of the region.
    pub fn fragment(&self, offset: usize) -> [[u8; FRAGMENT_COLUMNS]; FRAGMENT_ROWS] {
        let mut rows = [[0u8; FRAGMENT_COLUMNS]; FRAGMENT_ROWS];
        for (row, &byte) in rows.iter_mut().zip(&self.data[offset..offset + FRAGMENT_ROWS]) {
            *row = decode_columns(byte);
        }
        rows
    }

    /// Compose fragments laid out row-major in a grid `columns` fragments wide.
    ///
    /// Matching rows of the fragments in one grid row are concatenated left to
    /// right, and grid rows are stacked top to bottom.
    pub fn assemble(&self, offsets: &[usize], columns: usize) -> Sprite {
        let grid_rows = offsets.len() / columns;
        let width = columns * FRAGMENT_COLUMNS;
        let height = grid_rows * FRAGMENT_ROWS;
        let mut pixels = Vec::with_capacity(width * height);

        for grid_row in offsets.chunks(columns) {
            let pieces: Vec<_> = grid_row.iter().map(|&o| self.fragment(o)).collect();
            for r in 0..FRAGMENT_ROWS {
                for piece in &pieces {
                    pixels.extend_from_slice(&piece[r]);
                }
            }
        }

        Sprite { width, height, pixels }
    }

    /// Four fragments: top-left, top-right, bottom-left, bottom-right.
    pub fn quadrants(&self, offsets: [usize; 4]) -> Sprite {
        self.assemble(&offsets, 2)
    }

    /// Nine fragments, three per row.
    pub fn nine(&self, offsets: [usize; 9]) -> Sprite {
        self.assemble(&offsets, 3)
    }
}

/// Fragment offsets (TL, TR, BL, BR) of the 32 Electron tile sprites of the
/// first game. Entry 0 points all four quadrants at an empty stretch of data.
pub const ELECTRON_SPRITE_TABLE: [[usize; 4]; 32] = [
    [0x6a0, 0x6a0, 0x6a0, 0x6a0], // blank
    [0x110, 0x118, 0x120, 0x128], // diamond
    [0x130, 0x138, 0x140, 0x148], // boulder
    [0x150, 0x158, 0x160, 0x168], // egg
    [0x170, 0x178, 0x180, 0x188], // key
    [0x108, 0x108, 0x108, 0x108], // earth
    [0x0f0, 0x0f8, 0x100, 0x0f0], // earth
    [0x0f8, 0x0f0, 0x0f0, 0x100], // earth
    [0x0d0, 0x0d8, 0x0e0, 0x0e8], // safe
    [0x050, 0x050, 0x050, 0x050], // brick wall
    [0x0b0, 0x0b8, 0x0b0, 0x0b8], // double wall, top/bottom
    [0x0a0, 0x0a0, 0x0a8, 0x0a8], // double wall, left/right
    [0x000, 0x008, 0x008, 0x000], // quadruple wall
    [0x0c0, 0x0c8, 0x0c0, 0x0c8], // fancy wall
    [0x098, 0x098, 0x098, 0x098], // smooth wall
    [0x098, 0x098, 0x078, 0x078], // smooth wall, lower edge
    [0x060, 0x060, 0x098, 0x098], // smooth wall, upper edge
    [0x098, 0x090, 0x098, 0x090], // smooth wall, right edge
    [0x088, 0x098, 0x088, 0x098], // smooth wall, left edge
    [0x098, 0x090, 0x078, 0x080], // smooth wall, lower right curve
    [0x088, 0x098, 0x070, 0x078], // smooth wall, lower left curve
    [0x060, 0x068, 0x098, 0x090], // smooth wall, upper right curve
    [0x058, 0x060, 0x088, 0x098], // smooth wall, upper left curve
    [0x190, 0x198, 0x1a0, 0x1a8], // map
    [0x050, 0x050, 0x030, 0x030], // brick wall, lower edge
    [0x018, 0x018, 0x050, 0x050], // brick wall, upper edge
    [0x050, 0x048, 0x050, 0x048], // brick wall, right edge
    [0x040, 0x050, 0x040, 0x050], // brick wall, left edge
    [0x050, 0x048, 0x030, 0x038], // brick wall, lower right curve
    [0x040, 0x050, 0x028, 0x030], // brick wall, lower left curve
    [0x018, 0x020, 0x050, 0x048], // brick wall, upper right curve
    [0x010, 0x018, 0x040, 0x050], // brick wall, upper left curve
];

/// Fragment offsets of the second game's spirit: a blank border around the
/// fragment at offset 0.
pub const SPIRIT_FRAGMENTS: [usize; 9] = [
    0x300, 0x300, 0x300, //
    0x300, 0x000, 0x300, //
    0x300, 0x300, 0x300, //
];
