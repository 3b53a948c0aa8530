//! Writing edited lineups back into an image.

use serde::Serialize;
use tracing::{debug, info};

use crate::cartridge::{Cartridge, parse_cartridge_with};
use crate::checksum::recompute_checksum_with;
use crate::error::Result;
use crate::layout::{RomLayout, SAVE_PATCH};
use crate::rom::RomWriter;
use crate::team::{Lineup, LineupAnomaly, encode_lineup};

/// An edited lineup for the team at `team_pointer`.
#[derive(Debug, Clone)]
pub struct LineupChange {
    pub team_pointer: u32,
    pub lineup: Lineup,
}

/// A lineup slot that was written as empty because its player was not in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveAnomaly {
    pub team_pointer: u32,
    pub anomaly: LineupAnomaly,
}

impl std::fmt::Display for SaveAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "team {:#X}, {}", self.team_pointer, self.anomaly)
    }
}

/// Result of `save_lineups`.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub image: Vec<u8>,
    pub checksum: u16,
    /// False when the image was too small to hold the save patch.
    pub patched: bool,
    pub anomalies: Vec<SaveAnomaly>,
    /// The saved image decoded again.
    pub cartridge: Cartridge,
}

/// Writes the save patch at the layout's patch offset.
///
/// Returns false, leaving the image unchanged, when the patch does not fit.
pub fn apply_save_patch(image: &mut [u8], layout: &RomLayout) -> bool {
    match RomWriter::new(image).write_bytes(layout.patch_offset, &SAVE_PATCH) {
        Ok(()) => true,
        Err(e) => {
            debug!("Skipping save patch: {}", e);
            false
        }
    }
}

/// Produces a new image with every change applied.
///
/// Lineups are encoded first, then the save patch is applied, and the
/// checksum is recomputed last so it covers every written byte. The input
/// image is never modified.
///
/// # Errors
///
/// Fails if a lineup table lies outside the image, if the checksum field
/// cannot be written, or if the result no longer decodes.
pub fn save_lineups(
    image: &[u8],
    changes: &[LineupChange],
    layout: &RomLayout,
) -> Result<SaveOutcome> {
    let mut out = image.to_vec();
    let mut anomalies = Vec::new();

    for change in changes {
        let team_anomalies = encode_lineup(&mut out, change.team_pointer, &change.lineup)?;
        anomalies.extend(team_anomalies.into_iter().map(|anomaly| SaveAnomaly {
            team_pointer: change.team_pointer,
            anomaly,
        }));
    }

    let patched = apply_save_patch(&mut out, layout);
    let checksum = recompute_checksum_with(&mut out, layout)?;
    let cartridge = parse_cartridge_with(&out, layout)?;

    info!(
        "Saved {} lineup(s), checksum {:#06X}, {} anomalies",
        changes.len(),
        checksum,
        anomalies.len()
    );

    Ok(SaveOutcome {
        image: out,
        checksum,
        patched,
        anomalies,
        cartridge,
    })
}
