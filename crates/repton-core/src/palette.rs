// crates/repton-core/src/palette.rs
//
// Per-level colour assignments. Level numbers are 0-based here.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}

const BLACK: Rgb = rgb(0, 0, 0);
const RED: Rgb = rgb(255, 0, 0);
const GREEN: Rgb = rgb(0, 255, 0);
const BLUE: Rgb = rgb(0, 0, 255);
const YELLOW: Rgb = rgb(255, 255, 0);
const MAGENTA: Rgb = rgb(255, 0, 255);
const CYAN: Rgb = rgb(0, 255, 255);

/// Wall colour of each of the twelve first-game levels.
pub const REPTON_COLOURS: [Rgb; 12] = [
    RED, BLUE, MAGENTA, RED, RED, BLUE, CYAN, RED, BLUE, RED, MAGENTA, CYAN,
];

/// Wall colour of each of the sixteen second-game screens.
pub const REPTON2_COLOURS: [Rgb; 16] = [
    BLUE, RED, CYAN, BLUE, MAGENTA, BLUE, CYAN, BLUE, MAGENTA, BLUE, CYAN, BLUE, MAGENTA, BLUE,
    CYAN, CYAN,
];

/// The 4-entry palette indexed by 2-bit sprite pixels.
pub type Palette = [Rgb; 4];

/// Palette of a first-game level; `None` past the last level.
pub fn repton_palette(level: usize) -> Option<Palette> {
    let wall = *REPTON_COLOURS.get(level)?;
    Some([GREEN, YELLOW, wall, BLACK])
}

/// Palette of a second-game screen; `None` past the last screen.
pub fn repton2_palette(screen: usize) -> Option<Palette> {
    let wall = *REPTON2_COLOURS.get(screen)?;
    Some([BLACK, wall, YELLOW, GREEN])
}
