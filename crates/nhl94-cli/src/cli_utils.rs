//! Common CLI utility functions shared across commands.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use nhl94_core::{Cartridge, RomLayout, Team, load_layout, parse_cartridge_with};
use tracing::info;

/// Load the layout file, or the NHL '94 defaults when none is given.
pub fn resolve_layout(path: Option<&Path>) -> Result<RomLayout> {
    match path {
        Some(path) => {
            let layout = load_layout(path)
                .with_context(|| format!("Failed to load layout {}", path.display()))?;
            info!("Loaded layout: {}", layout.name);
            Ok(layout)
        }
        None => Ok(RomLayout::default()),
    }
}

pub fn read_rom(path: &Path) -> Result<Vec<u8>> {
    let image =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    info!("Read {} bytes from {}", image.len(), path.display());
    Ok(image)
}

/// Read and decode a ROM image.
pub fn open_cartridge(path: &Path, layout: &RomLayout) -> Result<(Vec<u8>, Cartridge)> {
    let image = read_rom(path)?;
    let cartridge = parse_cartridge_with(&image, layout)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok((image, cartridge))
}

pub fn find_team<'a>(cartridge: &'a Cartridge, query: &str) -> Result<&'a Team> {
    cartridge
        .find_team(query)
        .ok_or_else(|| anyhow!("No team matching \"{}\"", query))
}

/// Write to `output`, or print to stdout when no path is given.
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
