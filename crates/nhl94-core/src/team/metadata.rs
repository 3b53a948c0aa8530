use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::rom::text::{clean_abbreviation, clean_name};
use crate::rom::{RomReader, read_length_prefixed, split_byte};
use crate::team::{LINE_RECORD_SIZE, LINEUP_COUNT, LINEUP_TABLE_OFFSET, LineupSlotRecord};

/// A 16-color palette as 32 raw bytes (9-bit Genesis color words).
pub type Palette = [u8; 32];

/// Decoded team header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Absolute offset of the team header. Identity of the team.
    pub team_pointer: u32,
    pub player_data_offset: u16,
    pub player_data_size: usize,
    pub home_palette: Palette,
    pub away_palette: Palette,
    pub city: String,
    pub abbreviation: String,
    pub name: String,
    pub forward_count: u8,
    pub defenseman_count: u8,
    pub goalie_count: u8,
    /// Raw goalie occupancy bytes the goalie count is derived from.
    pub goalie_roster_bytes: [u8; 2],
    pub lineups: [LineupSlotRecord; LINEUP_COUNT],
}

impl TeamRecord {
    // Header layout (relative to the team pointer):
    //   0x00: player data offset (u16)
    //   0x04: name table offset (u16)
    //   0x0C: home palette (32 bytes)
    //   0x2C: away palette (32 bytes)
    //   0x4F: forwards (high nibble) / defensemen (low nibble)
    //   0x50: goalie occupancy (2 bytes)
    //   0x52: lineup table (8 x 8 bytes)
    const PLAYER_DATA_FIELD: usize = 0x00;
    const NAME_TABLE_FIELD: usize = 0x04;
    const HOME_PALETTE_FIELD: usize = 0x0C;
    const AWAY_PALETTE_FIELD: usize = 0x2C;
    const ROSTER_COUNTS_FIELD: usize = 0x4F;
    const GOALIE_OCCUPANCY_FIELD: usize = 0x50;

    /// Decodes the team header at `team_pointer`.
    ///
    /// Any read outside the image fails the whole team.
    pub fn parse(image: &[u8], team_pointer: u32) -> Result<Self> {
        let reader = RomReader::new(image);
        let base = team_pointer as usize;
        let at = |relative: usize| base.saturating_add(relative);

        let player_data_offset = reader.read_u16_be_at(at(Self::PLAYER_DATA_FIELD))?;
        let name_table_offset = reader.read_u16_be_at(at(Self::NAME_TABLE_FIELD))?;
        let home_palette: Palette = reader.read_array_at(at(Self::HOME_PALETTE_FIELD))?;
        let away_palette: Palette = reader.read_array_at(at(Self::AWAY_PALETTE_FIELD))?;

        let player_data_size =
            player_data_size(team_pointer, player_data_offset, name_table_offset);

        let mut string_offset = at(name_table_offset as usize);
        let city = read_length_prefixed(&reader, string_offset)?;
        string_offset += city.bytes_consumed;
        let abbreviation = read_length_prefixed(&reader, string_offset)?;
        string_offset += abbreviation.bytes_consumed;
        let name = read_length_prefixed(&reader, string_offset)?;

        let (forward_count, defenseman_count) =
            split_byte(reader.read_u8_at(at(Self::ROSTER_COUNTS_FIELD))?);

        let goalie_roster_bytes: [u8; 2] =
            reader.read_array_at(at(Self::GOALIE_OCCUPANCY_FIELD))?;
        let goalie_count = count_goalies(goalie_roster_bytes);

        let mut lineups = [LineupSlotRecord::default(); LINEUP_COUNT];
        for (i, line) in lineups.iter_mut().enumerate() {
            let record: [u8; LINE_RECORD_SIZE] =
                reader.read_array_at(at(LINEUP_TABLE_OFFSET + i * LINE_RECORD_SIZE))?;
            *line = LineupSlotRecord::from_bytes(record);
        }

        let record = Self {
            team_pointer,
            player_data_offset,
            player_data_size,
            home_palette,
            away_palette,
            city: clean_name(&city.text),
            abbreviation: clean_abbreviation(&abbreviation.text),
            name: clean_name(&name.text),
            forward_count,
            defenseman_count,
            goalie_count,
            goalie_roster_bytes,
            lineups,
        };

        debug!(
            "Parsed team {} at {:#X}: {}G/{}F/{}D, player block {:#X}+{:#X}",
            record.display_name(),
            team_pointer,
            goalie_count,
            forward_count,
            defenseman_count,
            player_data_offset,
            player_data_size
        );

        Ok(record)
    }

    /// City and nickname, e.g. "Boston Bruins".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.city, self.name)
    }

    pub fn total_players(&self) -> usize {
        self.goalie_count as usize + self.forward_count as usize + self.defenseman_count as usize
    }
}

/// `name_table - player_data - 2`; a header that yields a negative size has an empty player block.
fn player_data_size(team_pointer: u32, player_data_offset: u16, name_table_offset: u16) -> usize {
    let size = name_table_offset as i64 - player_data_offset as i64 - 2;
    if size < 0 {
        warn!(
            "Team at {:#X} has name table {:#X} before player data {:#X}, treating player block as empty",
            team_pointer, name_table_offset, player_data_offset
        );
        return 0;
    }
    size as usize
}

/// Counts the nonzero nibbles of the goalie occupancy bytes.
pub fn count_goalies(bytes: [u8; 2]) -> u8 {
    bytes
        .iter()
        .flat_map(|&b| {
            let (high, low) = split_byte(b);
            [high, low]
        })
        .filter(|nibble| *nibble != 0)
        .count() as u8
}
