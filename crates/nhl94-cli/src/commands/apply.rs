//! Apply a lineup edit document and save the result.

use std::path::Path;

use anyhow::{Context, Result};
use nhl94_core::{EditDocument, RomLayout, save_lineups};
use tracing::warn;

use crate::cli_utils;

pub fn run(rom: &Path, layout: &RomLayout, edits: &Path, output: &Path) -> Result<()> {
    let (image, cartridge) = cli_utils::open_cartridge(rom, layout)?;

    let document = EditDocument::load(edits)
        .with_context(|| format!("Failed to load edits {}", edits.display()))?;
    let changes = document.apply(&cartridge)?;

    let outcome = save_lineups(&image, &changes, layout)?;
    for anomaly in &outcome.anomalies {
        warn!("Slot written as empty: {}", anomaly);
    }
    if !outcome.patched {
        warn!("Image too small for the save patch at {:#X}", layout.patch_offset);
    }

    std::fs::write(output, &outcome.image)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    eprintln!(
        "Saved {} team(s) to {} (checksum {:#06X})",
        changes.len(),
        output.display(),
        outcome.checksum
    );

    Ok(())
}
