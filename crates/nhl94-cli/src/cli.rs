//! CLI argument definitions for nhl94.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nhl94")]
#[command(about = "NHL '94 Genesis roster and lineup editor", version)]
pub struct Args {
    /// Load cartridge layout from file (default: NHL '94 offsets)
    #[arg(long, value_name = "FILE", env = "NHL94_LAYOUT", global = true)]
    pub layout: Option<PathBuf>,

    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show cartridge name, checksum status and team list
    Info {
        /// ROM image
        rom: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show team rosters
    Roster {
        /// ROM image
        rom: PathBuf,
        /// Team abbreviation, name or pointer (default: all teams)
        #[arg(short, long)]
        team: Option<String>,
        /// Output format
        #[arg(long, short, value_enum, default_value = "console")]
        format: RosterFormat,
    },
    /// Show a team's lines
    Lines {
        /// ROM image
        rom: PathBuf,
        /// Team abbreviation, name or pointer
        #[arg(short, long)]
        team: String,
        /// Plain text without colors
        #[arg(long)]
        plain: bool,
    },
    /// Export all teams, players and lines
    Export {
        /// ROM image
        rom: PathBuf,
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(long, short, value_enum, default_value = "json")]
        format: ExportFormat,
    },
    /// Apply a JSON lineup edit document and save a new image
    Apply {
        /// ROM image
        rom: PathBuf,
        /// Edit document (JSON)
        #[arg(short, long)]
        edits: PathBuf,
        /// Output image path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Verify or fix the header checksum
    Checksum {
        /// ROM image
        rom: PathBuf,
        /// Write the recomputed checksum
        #[arg(long)]
        fix: bool,
        /// Output image path for --fix (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the active layout to a file
    Layout {
        /// Output file path
        #[arg(short, long, default_value = "layout.txt")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum RosterFormat {
    Console,
    Tsv,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    Tsv,
    Json,
}
