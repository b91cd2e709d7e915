// crates/repton-cli/src/main.rs

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "repton-cli")]
#[command(about = "Repton / Repton 2 level and object codec", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show blob identity, per-level summary and totals
    Inspect(cmd::inspect::InspectArgs),

    /// Decode a program blob into an .rdat document
    Export(cmd::export::ExportArgs),

    /// Encode an .rdat document into a copy of a program blob
    Import(cmd::import::ImportArgs),

    /// Recount Repton 2 totals from level content
    Totals(cmd::totals::TotalsArgs),

    /// Apply the legacy Electron tape scrambling (self-inverse)
    Scramble(cmd::scramble::ScrambleArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Inspect(args) => cmd::inspect::run(args),
        Commands::Export(args) => cmd::export::run(args),
        Commands::Import(args) => cmd::import::run(args),
        Commands::Totals(args) => cmd::totals::run(args),
        Commands::Scramble(args) => cmd::scramble::run(args),
    }
}
