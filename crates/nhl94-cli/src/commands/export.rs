//! Export command for rosters and lines.

use std::path::Path;

use anyhow::Result;
use nhl94_core::RomLayout;
use nhl94_core::export::{generate_cartridge_json, generate_roster_tsv};

use crate::cli::ExportFormat;
use crate::cli_utils;

pub fn run(rom: &Path, layout: &RomLayout, output: Option<&Path>, format: ExportFormat) -> Result<()> {
    let (_, cartridge) = cli_utils::open_cartridge(rom, layout)?;

    if !cartridge.skipped.is_empty() {
        eprintln!("Skipped {} unreadable team(s)", cartridge.skipped.len());
    }

    let content = match format {
        ExportFormat::Tsv => generate_roster_tsv(&cartridge.teams),
        ExportFormat::Json => generate_cartridge_json(&cartridge)?,
    };

    cli_utils::write_output(output, &content)
}
