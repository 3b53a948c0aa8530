//! Synthetic cartridge images for tests.
//!
//! `RomBuilder` lays out headers, team blocks, player records and lineup
//! tables at arbitrary offsets so parsers can be exercised without a real
//! ROM dump.

use crate::layout::RomLayout;
use crate::rom::bytes::{encode_bcd, join_nibbles};
use crate::team::{LINEUP_COUNT, LINEUP_TABLE_OFFSET, LINE_MARKER, LINE_RECORD_SIZE};

/// A player record as it is laid out in a team's player block.
#[derive(Debug, Clone)]
pub struct MockPlayer {
    pub name: String,
    pub jersey: u8,
    pub attributes: [u8; 7],
}

impl MockPlayer {
    pub fn new(name: &str, jersey: u8) -> Self {
        Self {
            name: name.to_string(),
            jersey,
            attributes: [0x55; 7],
        }
    }

    pub fn with_attributes(mut self, attributes: [u8; 7]) -> Self {
        self.attributes = attributes;
        self
    }

    /// Encoded record: length-prefixed name, BCD jersey, 7 attribute bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = length_prefixed(self.name.as_bytes());
        out.push(encode_bcd(self.jersey));
        out.extend_from_slice(&self.attributes);
        out
    }
}

/// A team block: header, player records and trailing name table.
#[derive(Debug, Clone)]
pub struct MockTeam {
    pub city: String,
    pub abbreviation: String,
    pub name: String,
    pub goalie_bytes: [u8; 2],
    pub forwards: u8,
    pub defensemen: u8,
    pub players: Vec<MockPlayer>,
    pub lines: [[u8; 7]; LINEUP_COUNT],
    pub home_palette: [u8; 32],
    pub away_palette: [u8; 32],
}

impl MockTeam {
    /// Offset of the player block relative to the team pointer.
    pub const PLAYER_DATA_OFFSET: u16 = 0xA0;

    pub fn new(city: &str, abbreviation: &str, name: &str) -> Self {
        Self {
            city: city.to_string(),
            abbreviation: abbreviation.to_string(),
            name: name.to_string(),
            goalie_bytes: [0, 0],
            forwards: 0,
            defensemen: 0,
            players: Vec::new(),
            lines: [[0, 0, 0, 0, 0, 0, 0xFF]; LINEUP_COUNT],
            home_palette: [0x0E; 32],
            away_palette: [0x02; 32],
        }
    }

    pub fn goalie(mut self, player: MockPlayer) -> Self {
        self.players.insert(self.goalie_count(), player);
        self.goalie_bytes = goalie_nibbles(self.goalie_count() + 1);
        self
    }

    pub fn forward(mut self, player: MockPlayer) -> Self {
        let at = self.goalie_count() + self.forwards as usize;
        self.players.insert(at, player);
        self.forwards += 1;
        self
    }

    pub fn defenseman(mut self, player: MockPlayer) -> Self {
        self.players.push(player);
        self.defensemen += 1;
        self
    }

    /// Sets the raw 7 slot bytes (LD, RD, LW, C, RW, EX, G) for one line.
    pub fn line(mut self, index: usize, slots: [u8; 7]) -> Self {
        self.lines[index] = slots;
        self
    }

    fn goalie_count(&self) -> usize {
        self.goalie_bytes
            .iter()
            .flat_map(|b| [b >> 4, b & 0x0F])
            .filter(|n| *n != 0)
            .count()
    }

    /// Encodes the whole team block as it sits at its team pointer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut players: Vec<u8> = self.players.iter().flat_map(|p| p.to_bytes()).collect();
        // Zero-length terminator record
        players.extend_from_slice(&[0x00, 0x00]);

        let player_offset = Self::PLAYER_DATA_OFFSET as usize;
        let name_table_offset = player_offset + players.len();

        let mut out = vec![0u8; name_table_offset];
        out[0..2].copy_from_slice(&Self::PLAYER_DATA_OFFSET.to_be_bytes());
        out[4..6].copy_from_slice(&(name_table_offset as u16).to_be_bytes());
        out[0x0C..0x2C].copy_from_slice(&self.home_palette);
        out[0x2C..0x4C].copy_from_slice(&self.away_palette);
        out[0x4F] = join_nibbles(self.forwards, self.defensemen);
        out[0x50..0x52].copy_from_slice(&self.goalie_bytes);

        for (i, slots) in self.lines.iter().enumerate() {
            let at = LINEUP_TABLE_OFFSET + i * LINE_RECORD_SIZE;
            out[at] = LINE_MARKER;
            out[at + 1..at + 8].copy_from_slice(slots);
        }

        out[player_offset..name_table_offset].copy_from_slice(&players);

        out.extend(length_prefixed(self.city.as_bytes()));
        out.extend(length_prefixed(self.abbreviation.as_bytes()));
        out.extend(length_prefixed(self.name.as_bytes()));
        out
    }
}

/// Builder for complete cartridge images.
#[derive(Debug, Clone)]
pub struct RomBuilder {
    data: Vec<u8>,
    layout: RomLayout,
    pointers: Vec<u32>,
}

impl Default for RomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RomBuilder {
    /// Creates an image just large enough to hold the team count byte.
    pub fn new() -> Self {
        Self::with_layout(RomLayout::default())
    }

    pub fn with_layout(layout: RomLayout) -> Self {
        let size = layout.team_count_offset + 1;
        let mut builder = Self {
            data: Vec::new(),
            layout,
            pointers: Vec::new(),
        };
        builder.ensure_size(size);
        builder
    }

    /// Pre-allocates the image with zeros up to the specified size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.ensure_size(size);
        self
    }

    pub fn cartridge_name(mut self, name: &str) -> Self {
        let start = self.layout.cartridge_name_offset;
        let len = self.layout.cartridge_name_len;
        self.ensure_size(self.layout.cartridge_name_end());
        let mut field = vec![b' '; len];
        let n = name.len().min(len);
        field[..n].copy_from_slice(&name.as_bytes()[..n]);
        self.data[start..start + len].copy_from_slice(&field);
        self
    }

    /// Writes a team block at `pointer` and registers it in the pointer table.
    pub fn team(mut self, pointer: u32, team: &MockTeam) -> Self {
        let bytes = team.to_bytes();
        self = self.write_bytes(pointer as usize, &bytes);
        self.pointers.push(pointer);
        self
    }

    /// Registers a pointer without writing a team block behind it.
    pub fn raw_pointer(mut self, pointer: u32) -> Self {
        self.pointers.push(pointer);
        self
    }

    pub fn write_bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.ensure_size(offset + bytes.len());
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Writes the team count and pointer table, then returns the image.
    pub fn build(mut self) -> Vec<u8> {
        let table = self.layout.team_table_offset;
        let pointers = std::mem::take(&mut self.pointers);
        self.ensure_size(table + pointers.len() * 4);
        for (i, pointer) in pointers.iter().enumerate() {
            let at = table + i * 4;
            self.data[at..at + 4].copy_from_slice(&pointer.to_be_bytes());
        }
        self.data[self.layout.team_count_offset] = pointers.len() as u8;
        self.data
    }

    fn ensure_size(&mut self, required: usize) {
        if self.data.len() < required {
            self.data.resize(required, 0);
        }
    }
}

fn length_prefixed(text: &[u8]) -> Vec<u8> {
    let mut out = ((text.len() + 2) as u16).to_be_bytes().to_vec();
    out.extend_from_slice(text);
    out
}

/// Goalie occupancy bytes with `count` nonzero nibbles (at most 4).
fn goalie_nibbles(count: usize) -> [u8; 2] {
    let mut nibbles = [0u8; 4];
    for nibble in nibbles.iter_mut().take(count.min(4)) {
        *nibble = 1;
    }
    [
        join_nibbles(nibbles[0], nibbles[1]),
        join_nibbles(nibbles[2], nibbles[3]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_writes_count_and_table() {
        let layout = RomLayout::default();
        let team = MockTeam::new("Boston", "BOS", "Bruins");
        let image = RomBuilder::new().team(0x10_0000, &team).build();

        assert_eq!(image[layout.team_count_offset], 1);
        let t = layout.team_table_offset;
        assert_eq!(&image[t..t + 4], &[0x00, 0x10, 0x00, 0x00]);
    }

    #[test]
    fn test_team_block_layout() {
        let team = MockTeam::new("A", "B", "C")
            .goalie(MockPlayer::new("G", 1))
            .forward(MockPlayer::new("F", 2))
            .defenseman(MockPlayer::new("D", 3));
        let bytes = team.to_bytes();

        assert_eq!(bytes[0x4F], 0x11);
        assert_eq!(&bytes[0x50..0x52], &[0x10, 0x00]);
        assert_eq!(bytes[LINEUP_TABLE_OFFSET], LINE_MARKER);
        assert_eq!(bytes[LINEUP_TABLE_OFFSET + 7], 0xFF);
        assert_eq!(&bytes[0xA0..0xA3], &[0x00, 0x03, b'G']);
    }

    #[test]
    fn test_player_order_is_goalies_forwards_defense() {
        let team = MockTeam::new("A", "B", "C")
            .defenseman(MockPlayer::new("D", 3))
            .forward(MockPlayer::new("F", 2))
            .goalie(MockPlayer::new("G", 1));
        let names: Vec<&str> = team.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["G", "F", "D"]);
    }
}
