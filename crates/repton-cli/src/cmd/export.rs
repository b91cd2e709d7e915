// crates/repton-cli/src/cmd/export.rs

use anyhow::Context;
use clap::Args;

use repton_core::document::levels::{repton2_document, repton_document};

use crate::cmd::{open, GameArgs, Opened};
use crate::io::{blob, doc};

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Output .rdat path
    #[arg(long)]
    pub out: String,
}

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    let raw = blob::read_blob(&args.game.blob)?;

    let value = match open(&args.game, raw)? {
        Opened::Repton(game) => repton_document(&game.read_levels().context("decode levels")?),
        Opened::Repton2(game) => {
            repton2_document(&game.read_content().context("decode Repton 2 content")?)
        }
    };

    let bytes = doc::write_doc(&args.out, &value)?;
    eprintln!("--- export ---");
    eprintln!("blob = {}", args.game.blob);
    eprintln!("out  = {} ({} bytes)", args.out, bytes);
    Ok(())
}
