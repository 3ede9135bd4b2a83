//! Starload CLI - build and load a shipment star schema from a flat CSV extract

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{load, plan, query, report};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Load(args) => load::execute(args, &cli.global),
        cli::Commands::Plan(args) => plan::execute(args, &cli.global),
        cli::Commands::Query(args) => query::execute(args, &cli.global),
        cli::Commands::Report(args) => report::execute(args, &cli.global),
    }
}
