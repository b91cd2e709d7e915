// crates/repton-core/src/lib.rs

pub mod error;

pub mod codec;
pub mod container;
pub mod document;
pub mod fingerprint;
pub mod grid;
pub mod layout;
pub mod palette;
pub mod repton;
pub mod repton2;
pub mod sprite;

pub use crate::error::{MapError, Result};
pub use crate::grid::{LevelCollection, TileGrid, TileIndex};
pub use crate::layout::Machine;
pub use crate::repton::Repton;
pub use crate::repton2::{Location, Repton2, Repton2Content};
