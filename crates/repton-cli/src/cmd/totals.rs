// crates/repton-cli/src/cmd/totals.rs

use anyhow::{bail, Context};
use clap::Args;

use repton_core::repton2::totals::Totals;

use crate::cmd::{open, totals_line, GameArgs, Opened};
use crate::io::blob;

#[derive(Args, Debug)]
pub struct TotalsArgs {
    #[command(flatten)]
    pub game: GameArgs,
}

pub fn run(args: TotalsArgs) -> anyhow::Result<()> {
    let raw = blob::read_blob(&args.game.blob)?;
    let game = match open(&args.game, raw)? {
        Opened::Repton2(game) => game,
        Opened::Repton(_) => bail!("totals are only stored by Repton 2"),
    };

    let content = game.read_content().context("decode Repton 2 content")?;
    let recount = Totals::recalculate(&content.levels, &content.transporters, &content.puzzle);

    println!("stored       {}", totals_line(&content.totals));
    println!("recalculated {}", totals_line(&recount));
    Ok(())
}
