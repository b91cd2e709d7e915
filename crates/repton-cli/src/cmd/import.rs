// crates/repton-cli/src/cmd/import.rs

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use repton_core::document::levels::{repton2_from_document, repton_from_document};
use repton_core::fingerprint::Fingerprint;
use repton_core::repton2::totals::Totals;

use crate::cmd::{open, totals_line, GameArgs, Opened};
use crate::io::{blob, doc};

#[derive(Args, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Input .rdat path
    #[arg(long)]
    pub doc: String,

    /// Output blob path
    #[arg(long)]
    pub out: String,

    /// Recount Repton 2 totals instead of taking them from the document
    #[arg(long, default_value_t = false)]
    pub recalculate: bool,
}

pub fn run(args: ImportArgs) -> anyhow::Result<()> {
    let raw = blob::read_blob(&args.game.blob)?;
    let value = doc::read_doc(&args.doc)?;

    let encoded = match open(&args.game, raw)? {
        Opened::Repton(mut game) => {
            if args.recalculate {
                warn!("--recalculate has no effect for Repton");
            }
            let levels = repton_from_document(&value)
                .with_context(|| format!("read levels from {}", args.doc))?;
            game.write_levels(&levels).context("encode levels")?;
            game.to_blob()
        }
        Opened::Repton2(mut game) => {
            let mut content = repton2_from_document(&value)
                .with_context(|| format!("read Repton 2 content from {}", args.doc))?;
            if args.recalculate {
                content.totals =
                    Totals::recalculate(&content.levels, &content.transporters, &content.puzzle);
                info!(totals = %totals_line(&content.totals), "recalculated totals");
            }
            game.write(&content).context("encode Repton 2 content")?;
            game.to_blob()
        }
    };

    blob::write_blob(&args.out, &encoded)?;
    let fp = Fingerprint::of(&encoded);
    eprintln!("--- import ---");
    eprintln!("doc     = {}", args.doc);
    eprintln!("out     = {} ({} bytes)", args.out, fp.len);
    eprintln!("crc32   = {:08x}", fp.crc32);
    eprintln!("blob_id = {}", fp.id_hex());
    Ok(())
}
