use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::layout::RomLayout;
use crate::rom::RomReader;
use crate::rom::text::{clean_cartridge_name, decode_latin1};

/// Size of one entry in the team pointer table.
pub const TEAM_POINTER_SIZE: usize = 4;

/// Header name used when the image is too small to hold one.
pub const UNKNOWN_CARTRIDGE_NAME: &str = "Unknown";

/// Cartridge name, team count and team pointer table.
///
/// Derived from the image bytes; re-parse after any modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartridgeIndex {
    pub cartridge_name: String,
    pub team_count: u8,
    /// Absolute offsets of each team header, in table order.
    pub team_pointers: Vec<u32>,
}

impl CartridgeIndex {
    /// Reads the index.
    ///
    /// # Errors
    ///
    /// Returns `RomTooSmall` when the image cannot hold the team count or the
    /// full pointer table. A missing cartridge name is not an error.
    pub fn parse(image: &[u8], layout: &RomLayout) -> Result<Self> {
        let reader = RomReader::new(image);

        let cartridge_name =
            match reader.read_bytes_at(layout.cartridge_name_offset, layout.cartridge_name_len) {
                Ok(bytes) => clean_cartridge_name(&decode_latin1(bytes)),
                Err(_) => {
                    warn!("ROM is too small to read cartridge name");
                    UNKNOWN_CARTRIDGE_NAME.to_string()
                }
            };

        let team_count = reader.read_u8_at(layout.team_count_offset).map_err(|_| {
            Error::RomTooSmall(format!(
                "cannot read the number of teams at {:#X} (image is {:#X} bytes)",
                layout.team_count_offset,
                image.len()
            ))
        })?;

        let table_len = team_count as usize * TEAM_POINTER_SIZE;
        let table = reader
            .read_bytes_at(layout.team_table_offset, table_len)
            .map_err(|_| {
                Error::RomTooSmall(format!(
                    "cannot read the team pointer table ({} teams at {:#X})",
                    team_count, layout.team_table_offset
                ))
            })?;

        let team_pointers: Vec<u32> = table
            .chunks_exact(TEAM_POINTER_SIZE)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        debug!(
            "Cartridge '{}' has {} teams: {:X?}",
            cartridge_name, team_count, team_pointers
        );

        Ok(Self {
            cartridge_name,
            team_count,
            team_pointers,
        })
    }
}
