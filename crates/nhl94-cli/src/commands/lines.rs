//! Lineup sheet for one team.

use std::path::Path;

use anyhow::Result;
use nhl94_core::RomLayout;
use nhl94_core::export::{format_lineup_console, format_lineup_text};

use crate::cli_utils;

pub fn run(rom: &Path, layout: &RomLayout, team: &str, plain: bool) -> Result<()> {
    let (_, cartridge) = cli_utils::open_cartridge(rom, layout)?;
    let team = cli_utils::find_team(&cartridge, team)?;

    if plain {
        print!("{}", format_lineup_text(team));
    } else {
        print!("{}", format_lineup_console(team));
    }

    Ok(())
}
