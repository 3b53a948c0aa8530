//! Checksum verification and repair.

use std::path::Path;

use anyhow::{Context, Result};
use nhl94_core::RomLayout;
use nhl94_core::checksum::{compute_checksum_from, recompute_checksum_with, stored_checksum};

use crate::cli_utils;

pub fn run(rom: &Path, layout: &RomLayout, fix: bool, output: Option<&Path>) -> Result<()> {
    let mut image = cli_utils::read_rom(rom)?;

    let stored = stored_checksum(&image, layout)?;
    let computed = compute_checksum_from(&image, layout.checksum_start);
    println!("Stored:   {:#06X}", stored);
    println!("Computed: {:#06X}", computed);

    if !fix {
        if stored != computed {
            println!("Checksum mismatch");
        }
        return Ok(());
    }

    recompute_checksum_with(&mut image, layout)?;
    let target = output.unwrap_or(rom);
    std::fs::write(target, &image)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    eprintln!("Wrote checksum {:#06X} to {}", computed, target.display());

    Ok(())
}
