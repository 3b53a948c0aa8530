//! Write the active layout as an editable file.

use std::path::Path;

use anyhow::{Context, Result};
use nhl94_core::{RomLayout, save_layout};

pub fn run(layout: &RomLayout, output: &Path) -> Result<()> {
    save_layout(output, layout)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    eprintln!("Layout '{}' written to {}", layout.name, output.display());
    Ok(())
}
