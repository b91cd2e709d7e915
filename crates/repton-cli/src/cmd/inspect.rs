// crates/repton-cli/src/cmd/inspect.rs

use anyhow::Context;
use clap::Args;

use repton_core::fingerprint::Fingerprint;
use repton_core::repton2::totals::Totals;

use crate::cmd::{level_summary, open, totals_line, GameArgs, Opened};
use crate::io::blob;

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub game: GameArgs,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let raw = blob::read_blob(&args.game.blob)?;
    let fp = Fingerprint::of(&raw);

    eprintln!("--- inspect ---");
    eprintln!("file       = {}", args.game.blob);
    eprintln!("game       = {:?}", args.game.game);
    eprintln!("machine    = {:?}", args.game.machine);
    eprintln!("bytes      = {:#06x}", fp.len);
    eprintln!("crc32      = {:08x}", fp.crc32);
    eprintln!("blob_id    = {}", fp.id_hex());
    eprintln!("scrambled  = {}", args.game.scrambled);

    match open(&args.game, raw)? {
        Opened::Repton(game) => {
            let levels = game.read_levels().context("decode levels")?;
            for (n, grid) in levels.iter().enumerate() {
                eprintln!("level[{n:02}]  = {}", level_summary(grid));
            }
            let sprites = game.read_sprites().context("decode sprites")?;
            let tile = game.codec().layout().tile;
            eprintln!(
                "sprites    = {} ({}x{} px, scale {}x{})",
                sprites.len(),
                tile.width,
                tile.height,
                tile.x_scale,
                tile.y_scale
            );
        }
        Opened::Repton2(game) => {
            let content = game.read_content().context("decode Repton 2 content")?;
            for (n, grid) in content.levels.iter().enumerate() {
                eprintln!("screen[{}]  = {}", (b'A' + n as u8) as char, level_summary(grid));
            }
            eprintln!("transporters = {}", content.transporters.len());
            eprintln!("pieces       = {}", content.puzzle.len());
            eprintln!("totals       = {}", totals_line(&content.totals));
            let recount =
                Totals::recalculate(&content.levels, &content.transporters, &content.puzzle);
            eprintln!("recount      = {}", totals_line(&recount));
            if recount != content.totals {
                eprintln!("WARNING: stored totals differ from level content");
            }
            let sprites = game.read_sprites().context("decode sprites")?;
            eprintln!("sprites      = {}", sprites.len());
        }
    }

    Ok(())
}
