//! Cartridge overview.

use std::path::Path;

use anyhow::Result;
use nhl94_core::RomLayout;
use nhl94_core::checksum::{compute_checksum_from, stored_checksum};
use nhl94_core::export::format_cartridge_console;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::cli_utils;

pub fn run(rom: &Path, layout: &RomLayout, json: bool) -> Result<()> {
    let (image, cartridge) = cli_utils::open_cartridge(rom, layout)?;

    let stored = stored_checksum(&image, layout).ok();
    let computed = compute_checksum_from(&image, layout.checksum_start);

    if json {
        let teams: Vec<_> = cartridge
            .teams
            .iter()
            .map(|team| {
                json!({
                    "pointer": format!("{:#X}", team.pointer()),
                    "abbreviation": team.record.abbreviation,
                    "name": team.display_name(),
                    "players": team.players.len(),
                })
            })
            .collect();
        let skipped: Vec<_> = cartridge
            .skipped
            .iter()
            .map(|skip| json!({ "pointer": format!("{:#X}", skip.pointer), "reason": skip.reason }))
            .collect();

        let value = json!({
            "cartridge_name": cartridge.index.cartridge_name,
            "layout": layout.name,
            "size": image.len(),
            "team_count": cartridge.index.team_count,
            "checksum": {
                "stored": stored.map(|c| format!("{:#06X}", c)),
                "computed": format!("{:#06X}", computed),
                "valid": stored == Some(computed),
            },
            "teams": teams,
            "skipped": skipped,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", format_cartridge_console(&cartridge));
    let status = match stored {
        Some(stored) if stored == computed => format!("{:#06X} OK", stored).green().to_string(),
        Some(stored) => format!("{:#06X} (expected {:#06X})", stored, computed)
            .red()
            .to_string(),
        None => "unreadable".red().to_string(),
    };
    println!("Checksum: {}", status);

    Ok(())
}
