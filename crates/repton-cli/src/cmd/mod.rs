// crates/repton-cli/src/cmd/mod.rs

pub mod export;
pub mod import;
pub mod inspect;
pub mod scramble;
pub mod totals;

use anyhow::{bail, Context};
use clap::{Args, ValueEnum};

use repton_core::repton2::totals::Totals;
use repton_core::{Machine, Repton, Repton2, TileGrid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GameKind {
    /// Repton: twelve levels
    #[value(name = "repton")]
    Repton,
    /// Repton 2: sixteen screens, transporters, puzzle
    #[value(name = "repton2")]
    Repton2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MachineKind {
    Electron,
    Bbc,
}

impl From<MachineKind> for Machine {
    fn from(m: MachineKind) -> Machine {
        match m {
            MachineKind::Electron => Machine::Electron,
            MachineKind::Bbc => Machine::Bbc,
        }
    }
}

/// Which program blob to open and how.
#[derive(Args, Debug)]
pub struct GameArgs {
    #[arg(long, value_enum)]
    pub game: GameKind,

    #[arg(long, value_enum, default_value_t = MachineKind::Electron)]
    pub machine: MachineKind,

    /// Program data, already extracted from its tape or disk image
    #[arg(long)]
    pub blob: String,

    /// Blob is stored scrambled (early Repton Electron tape release)
    #[arg(long, default_value_t = false)]
    pub scrambled: bool,
}

pub enum Opened {
    Repton(Repton),
    Repton2(Repton2),
}

pub fn open(args: &GameArgs, raw: Vec<u8>) -> anyhow::Result<Opened> {
    let machine = Machine::from(args.machine);
    let opened = match args.game {
        GameKind::Repton => Opened::Repton(
            Repton::from_blob(machine, raw, args.scrambled)
                .with_context(|| format!("open Repton blob: {}", args.blob))?,
        ),
        GameKind::Repton2 => {
            if args.scrambled {
                bail!("--scrambled only applies to Repton");
            }
            Opened::Repton2(
                Repton2::from_blob(machine, raw)
                    .with_context(|| format!("open Repton 2 blob: {}", args.blob))?,
            )
        }
    };
    Ok(opened)
}

/// One line per level: how many distinct tiles and how many non-blank cells.
pub fn level_summary(grid: &TileGrid) -> String {
    let mut used = [false; 32];
    for &t in grid.cells() {
        used[t as usize & 31] = true;
    }
    let distinct = used.iter().filter(|&&u| u).count();
    let filled = grid.cells().iter().filter(|&&t| t != 0).count();
    format!("distinct_tiles={distinct} non_blank={filled}")
}

pub fn totals_line(t: &Totals) -> String {
    format!(
        "diamonds={} earth={} monsters={} transporters={} pieces={}",
        t.diamonds, t.earth, t.monsters, t.transporters, t.pieces
    )
}
