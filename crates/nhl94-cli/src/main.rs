mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise warn, or info with --verbose
    let default_filter = if args.verbose {
        "nhl94_cli=info,nhl94_core=info"
    } else {
        "nhl94_cli=warn,nhl94_core=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let layout = cli_utils::resolve_layout(args.layout.as_deref())?;

    match args.command {
        Command::Info { rom, json } => commands::info::run(&rom, &layout, json),
        Command::Roster { rom, team, format } => {
            commands::roster::run(&rom, &layout, team.as_deref(), format)
        }
        Command::Lines { rom, team, plain } => commands::lines::run(&rom, &layout, &team, plain),
        Command::Export {
            rom,
            output,
            format,
        } => commands::export::run(&rom, &layout, output.as_deref(), format),
        Command::Apply { rom, edits, output } => {
            commands::apply::run(&rom, &layout, &edits, &output)
        }
        Command::Checksum { rom, fix, output } => {
            commands::checksum::run(&rom, &layout, fix, output.as_deref())
        }
        Command::Layout { output } => commands::layout::run(&layout, &output),
    }
}
