//! Fixed absolute offsets of the cartridge layout.
//!
//! The defaults describe the NHL '94 Genesis cartridge. A layout file can
//! override them for hacks that relocate the header tables.

mod loader;

pub use loader::{format_layout, load_layout, parse_layout, save_layout};

use serde::{Deserialize, Serialize};

/// Bytes written over the code at `patch_offset` on every save (three `NOP`s).
pub const SAVE_PATCH: [u8; 6] = [0x4E, 0x71, 0x4E, 0x71, 0x4E, 0x71];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomLayout {
    pub name: String,
    pub cartridge_name_offset: usize,
    pub cartridge_name_len: usize,
    pub team_count_offset: usize,
    pub team_table_offset: usize,
    pub checksum_offset: usize,
    pub checksum_start: usize,
    pub patch_offset: usize,
}

impl RomLayout {
    pub const DEFAULT_NAME: &'static str = "NHL94:GENESIS";

    /// End (exclusive) of the cartridge name field.
    pub fn cartridge_name_end(&self) -> usize {
        self.cartridge_name_offset + self.cartridge_name_len
    }
}

impl Default for RomLayout {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            cartridge_name_offset: 0x120,
            cartridge_name_len: 0x30,
            team_count_offset: 0xF7923,
            team_table_offset: 0x30E,
            checksum_offset: 0x18E,
            checksum_start: 0x200,
            patch_offset: 0x300,
        }
    }
}
