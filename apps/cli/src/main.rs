//! Thesaurus CLI: grow a vocabulary from a few seed terms.
//!
//! Crawls linked pages for candidate terms, ranks them against the accepted
//! vocabulary and asks for accept/reject feedback one term at a time.

mod commands;
mod review;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
