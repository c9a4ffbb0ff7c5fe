use anyhow::Result;
use clap::Parser;
use threadkeep::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
