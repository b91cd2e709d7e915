// crates/repton-cli/src/cmd/scramble.rs

use clap::Args;

use repton_core::codec::scramble::scramble;
use repton_core::fingerprint::Fingerprint;

use crate::io::blob;

#[derive(Args, Debug)]
pub struct ScrambleArgs {
    /// Input blob path
    #[arg(long)]
    pub r#in: String,

    /// Output blob path
    #[arg(long)]
    pub out: String,
}

pub fn run(args: ScrambleArgs) -> anyhow::Result<()> {
    let data = blob::read_blob(&args.r#in)?;
    let out = scramble(&data);
    blob::write_blob(&args.out, &out)?;

    eprintln!("--- scramble ---");
    eprintln!("in    = {} (crc32 {:08x})", args.r#in, Fingerprint::of(&data).crc32);
    eprintln!("out   = {} (crc32 {:08x})", args.out, Fingerprint::of(&out).crc32);
    eprintln!("bytes = {}", out.len());
    Ok(())
}
