//! Lineup slot tables and the application-level lineup built from them.
//!
//! Each team carries eight line records of eight bytes: a constant marker
//! followed by one roster index per position in the order LD, RD, LW, C, RW,
//! EX, G. Skater slots are 1-based with 0 meaning empty; the goalie slot is
//! 0-based with 255 meaning empty.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, FromRepr, IntoStaticStr};
use tracing::{error, warn};

use crate::error::{Error, Result};
use crate::rom::RomWriter;
use crate::team::{
    LINE_MARKER, LINE_RECORD_SIZE, LINEUP_COUNT, LINEUP_TABLE_OFFSET, PlayerId, PlayerRecord,
    SLOTS_PER_LINE, line_slots_offset,
};

/// Empty value for skater slots.
pub const EMPTY_SKATER_SLOT: u8 = 0;

/// Empty value for the goalie slot.
pub const EMPTY_GOALIE_SLOT: u8 = 0xFF;

/// Lineup positions in slot-table order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    IntoStaticStr,
    EnumIter,
    EnumString,
)]
#[repr(u8)]
#[strum(ascii_case_insensitive)]
pub enum Position {
    #[serde(rename = "LD")]
    #[strum(serialize = "LD")]
    LeftDefense = 0,
    #[serde(rename = "RD")]
    #[strum(serialize = "RD")]
    RightDefense = 1,
    #[serde(rename = "LW")]
    #[strum(serialize = "LW")]
    LeftWing = 2,
    #[serde(rename = "C")]
    #[strum(serialize = "C")]
    Center = 3,
    #[serde(rename = "RW")]
    #[strum(serialize = "RW")]
    RightWing = 4,
    #[serde(rename = "EX")]
    #[strum(serialize = "EX")]
    Extra = 5,
    #[serde(rename = "G")]
    #[strum(serialize = "G")]
    Goalie = 6,
}

impl Position {
    /// All positions in slot-table order.
    pub const ALL: [Position; SLOTS_PER_LINE] = [
        Self::LeftDefense,
        Self::RightDefense,
        Self::LeftWing,
        Self::Center,
        Self::RightWing,
        Self::Extra,
        Self::Goalie,
    ];

    /// Index of this position's byte within a line's seven slot bytes.
    pub fn slot_index(&self) -> usize {
        *self as usize
    }

    pub fn is_goalie(&self) -> bool {
        matches!(self, Self::Goalie)
    }

    pub fn empty_sentinel(&self) -> u8 {
        if self.is_goalie() {
            EMPTY_GOALIE_SLOT
        } else {
            EMPTY_SKATER_SLOT
        }
    }

    /// Resolves a raw slot byte to a roster index.
    ///
    /// Returns `None` for the empty sentinel and for indices past the roster end.
    pub fn decode_slot(&self, raw: u8, roster_len: usize) -> Option<usize> {
        if raw == self.empty_sentinel() {
            return None;
        }
        let index = if self.is_goalie() {
            raw as usize
        } else {
            raw as usize - 1
        };
        (index < roster_len).then_some(index)
    }

    /// Encodes a roster index (or empty) as a raw slot byte.
    ///
    /// Returns `None` when the index cannot be represented without colliding
    /// with the sentinel.
    pub fn encode_slot(&self, roster_index: Option<usize>) -> Option<u8> {
        match roster_index {
            None => Some(self.empty_sentinel()),
            Some(index) if self.is_goalie() => u8::try_from(index)
                .ok()
                .filter(|raw| *raw != EMPTY_GOALIE_SLOT),
            Some(index) => u8::try_from(index + 1).ok(),
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// One raw line record from the lineup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineupSlotRecord {
    pub marker: u8,
    /// Raw slot bytes in `Position::ALL` order.
    pub slots: [u8; SLOTS_PER_LINE],
}

impl Default for LineupSlotRecord {
    fn default() -> Self {
        Self {
            marker: LINE_MARKER,
            slots: Position::ALL.map(|p| p.empty_sentinel()),
        }
    }
}

impl LineupSlotRecord {
    pub fn from_bytes(bytes: [u8; LINE_RECORD_SIZE]) -> Self {
        let mut slots = [0u8; SLOTS_PER_LINE];
        slots.copy_from_slice(&bytes[1..]);
        Self {
            marker: bytes[0],
            slots,
        }
    }

    pub fn to_bytes(&self) -> [u8; LINE_RECORD_SIZE] {
        let mut bytes = [0u8; LINE_RECORD_SIZE];
        bytes[0] = self.marker;
        bytes[1..].copy_from_slice(&self.slots);
        bytes
    }

    pub fn get(&self, position: Position) -> u8 {
        self.slots[position.slot_index()]
    }

    pub fn set(&mut self, position: Position, raw: u8) {
        self.slots[position.slot_index()] = raw;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardLine {
    pub lw: Option<PlayerId>,
    pub c: Option<PlayerId>,
    pub rw: Option<PlayerId>,
    pub ex: Option<PlayerId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefensePairing {
    pub ld: Option<PlayerId>,
    pub rd: Option<PlayerId>,
    pub g: Option<PlayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// The player id is not in the team's roster.
    NotInRoster,
    /// The player's roster index has no slot byte at this position.
    Unencodable { roster_index: usize },
}

/// A lineup slot that could not be encoded. The slot was written as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupAnomaly {
    pub line: usize,
    pub position: Position,
    pub player: PlayerId,
    pub kind: AnomalyKind,
}

impl std::fmt::Display for LineupAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {} {}: player '{}' ",
            self.line + 1,
            self.position,
            self.player
        )?;
        match self.kind {
            AnomalyKind::NotInRoster => write!(f, "not in roster"),
            AnomalyKind::Unencodable { roster_index } => {
                write!(f, "roster index {} has no slot encoding", roster_index)
            }
        }
    }
}

/// Application-level lineup: eight forward lines and eight defense pairings
/// resolved against the team's roster.
///
/// This is the structure editors mutate. Slots hold player ids; the roster
/// index of a player is looked up by id when the lineup is encoded.
///
/// The raw records the lineup was decoded from are kept so that a slot byte
/// pointing past the roster survives encoding until that slot is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub forward_lines: [ForwardLine; LINEUP_COUNT],
    pub defense_pairings: [DefensePairing; LINEUP_COUNT],
    pub roster: Vec<PlayerRecord>,
    #[serde(skip)]
    source: [LineupSlotRecord; LINEUP_COUNT],
}

impl Lineup {
    /// A lineup with every slot empty.
    pub fn empty(roster: Vec<PlayerRecord>) -> Self {
        Self {
            forward_lines: Default::default(),
            defense_pairings: Default::default(),
            roster,
            source: Default::default(),
        }
    }

    /// Resolves raw slot records against `roster`.
    pub fn decode(records: &[LineupSlotRecord; LINEUP_COUNT], roster: Vec<PlayerRecord>) -> Self {
        let mut lineup = Self::empty(roster);
        lineup.source = *records;
        for (line, record) in records.iter().enumerate() {
            for position in Position::ALL {
                let raw = record.get(position);
                let player = position
                    .decode_slot(raw, lineup.roster.len())
                    .map(|index| lineup.roster[index].id.clone());
                if player.is_none() && raw != position.empty_sentinel() {
                    warn!(
                        "Line {} {} slot {:#04X} is past the roster ({} players)",
                        line + 1,
                        position,
                        raw,
                        lineup.roster.len()
                    );
                }
                *lineup.slot_mut(line, position) = player;
            }
        }
        lineup
    }

    pub fn get(&self, line: usize, position: Position) -> Option<&PlayerId> {
        let forward = self.forward_lines.get(line)?;
        let defense = &self.defense_pairings[line];
        match position {
            Position::LeftDefense => defense.ld.as_ref(),
            Position::RightDefense => defense.rd.as_ref(),
            Position::LeftWing => forward.lw.as_ref(),
            Position::Center => forward.c.as_ref(),
            Position::RightWing => forward.rw.as_ref(),
            Position::Extra => forward.ex.as_ref(),
            Position::Goalie => defense.g.as_ref(),
        }
    }

    /// Assigns (or clears) one slot. Clearing also drops any unresolved byte.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLineup` for a line index past the table and
    /// `PlayerNotFound` for a player outside this lineup's roster.
    pub fn set(&mut self, line: usize, position: Position, player: Option<PlayerId>) -> Result<()> {
        if line >= LINEUP_COUNT {
            return Err(Error::InvalidLineup(format!(
                "line {} out of range (0..{})",
                line, LINEUP_COUNT
            )));
        }
        if let Some(id) = &player {
            if self.roster_index_of(id).is_none() {
                return Err(Error::PlayerNotFound(id.to_string()));
            }
        }
        *self.slot_mut(line, position) = player;
        self.source[line].set(position, position.empty_sentinel());
        Ok(())
    }

    /// Raw byte of a slot that points past the roster and has not been reassigned.
    pub fn unresolved(&self, line: usize, position: Position) -> Option<u8> {
        let raw = self.source.get(line)?.get(position);
        let unresolved = raw != position.empty_sentinel()
            && position.decode_slot(raw, self.roster.len()).is_none();
        (unresolved && self.get(line, position).is_none()).then_some(raw)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&PlayerRecord> {
        self.roster.iter().find(|p| &p.id == id)
    }

    pub fn roster_index_of(&self, id: &PlayerId) -> Option<usize> {
        self.roster.iter().position(|p| &p.id == id)
    }

    /// Encodes all eight lines.
    ///
    /// An empty slot keeps its unresolved source byte, if any. A slot whose
    /// player cannot be encoded is written as empty and reported in the
    /// returned anomalies.
    pub fn encode(&self) -> ([LineupSlotRecord; LINEUP_COUNT], Vec<LineupAnomaly>) {
        let mut records = [LineupSlotRecord::default(); LINEUP_COUNT];
        let mut anomalies = Vec::new();

        for (line, record) in records.iter_mut().enumerate() {
            for position in Position::ALL {
                let raw = match self.get(line, position) {
                    None => self
                        .unresolved(line, position)
                        .unwrap_or_else(|| position.empty_sentinel()),
                    Some(id) => match self.encode_player(line, position, id) {
                        Ok(raw) => raw,
                        Err(anomaly) => {
                            anomalies.push(anomaly);
                            position.empty_sentinel()
                        }
                    },
                };
                record.set(position, raw);
            }
        }

        (records, anomalies)
    }

    fn encode_player(
        &self,
        line: usize,
        position: Position,
        id: &PlayerId,
    ) -> std::result::Result<u8, LineupAnomaly> {
        let anomaly = |kind| LineupAnomaly {
            line,
            position,
            player: id.clone(),
            kind,
        };

        let Some(roster_index) = self.roster_index_of(id) else {
            error!(
                "Player from lineup not found in team roster: {} (line {}, {})",
                id,
                line + 1,
                position
            );
            return Err(anomaly(AnomalyKind::NotInRoster));
        };

        position.encode_slot(Some(roster_index)).ok_or_else(|| {
            error!(
                "Roster index {} of {} has no {} slot encoding (line {})",
                roster_index,
                id,
                position,
                line + 1
            );
            anomaly(AnomalyKind::Unencodable { roster_index })
        })
    }

    fn slot_mut(&mut self, line: usize, position: Position) -> &mut Option<PlayerId> {
        let forward = &mut self.forward_lines[line];
        let defense = &mut self.defense_pairings[line];
        match position {
            Position::LeftDefense => &mut defense.ld,
            Position::RightDefense => &mut defense.rd,
            Position::LeftWing => &mut forward.lw,
            Position::Center => &mut forward.c,
            Position::RightWing => &mut forward.rw,
            Position::Extra => &mut forward.ex,
            Position::Goalie => &mut defense.g,
        }
    }
}

/// Writes `lineup` into the lineup table of the team at `team_pointer`.
///
/// Only the seven slot bytes of each line are written; the marker byte is
/// left untouched. The whole table is bounds-checked before any byte changes.
pub fn encode_lineup(
    image: &mut [u8],
    team_pointer: u32,
    lineup: &Lineup,
) -> Result<Vec<LineupAnomaly>> {
    let table_start = (team_pointer as usize).saturating_add(LINEUP_TABLE_OFFSET);
    let table_size = LINEUP_COUNT * LINE_RECORD_SIZE;
    if table_start.saturating_add(table_size) > image.len() {
        return Err(Error::OutOfBounds {
            offset: table_start,
            size: table_size,
            len: image.len(),
        });
    }

    let (records, anomalies) = lineup.encode();
    let mut writer = RomWriter::new(image);
    for (line, record) in records.iter().enumerate() {
        writer.write_bytes(line_slots_offset(team_pointer, line), &record.slots)?;
    }

    Ok(anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::{PlayerAttributes, Role};
    use std::str::FromStr;

    fn roster(roles: &[Role]) -> Vec<PlayerRecord> {
        roles
            .iter()
            .enumerate()
            .map(|(i, role)| PlayerRecord {
                id: PlayerId::synthesize(&format!("Player {}", i), i as u8, i),
                name: format!("Player {}", i),
                jersey_number: i as u8,
                role: *role,
                ordinal: i,
                attributes: PlayerAttributes::from_bytes([0x55; 7]),
            })
            .collect()
    }

    #[test]
    fn test_position_order_and_names() {
        let names: Vec<&str> = Position::ALL.iter().map(|p| p.short_name()).collect();
        assert_eq!(names, vec!["LD", "RD", "LW", "C", "RW", "EX", "G"]);
        assert_eq!(Position::from_repr(6), Some(Position::Goalie));
        assert_eq!(Position::from_str("lw").unwrap(), Position::LeftWing);
        assert!(Position::from_str("XX").is_err());
    }

    #[test]
    fn test_position_serde_uses_short_names() {
        let json = serde_json::to_string(&Position::Extra).unwrap();
        assert_eq!(json, "\"EX\"");
        let back: Position = serde_json::from_str("\"RD\"").unwrap();
        assert_eq!(back, Position::RightDefense);
    }

    #[test]
    fn test_skater_slot_sentinel_law() {
        for position in Position::ALL.iter().filter(|p| !p.is_goalie()) {
            assert_eq!(position.decode_slot(0, 20), None);
            assert_eq!(position.decode_slot(1, 20), Some(0));
            assert_eq!(position.decode_slot(20, 20), Some(19));
            assert_eq!(position.decode_slot(21, 20), None);
            assert_eq!(position.decode_slot(255, 20), None);
        }
    }

    #[test]
    fn test_goalie_slot_sentinel_law() {
        let g = Position::Goalie;
        assert_eq!(g.decode_slot(255, 20), None);
        assert_eq!(g.decode_slot(0, 20), Some(0));
        assert_eq!(g.decode_slot(1, 20), Some(1));
        assert_eq!(g.decode_slot(20, 20), None);
    }

    #[test]
    fn test_encode_slot() {
        assert_eq!(Position::Center.encode_slot(None), Some(0));
        assert_eq!(Position::Center.encode_slot(Some(0)), Some(1));
        assert_eq!(Position::Center.encode_slot(Some(255)), None);
        assert_eq!(Position::Goalie.encode_slot(None), Some(255));
        assert_eq!(Position::Goalie.encode_slot(Some(0)), Some(0));
        assert_eq!(Position::Goalie.encode_slot(Some(255)), None);
    }

    #[test]
    fn test_slot_record_bytes() {
        let record = LineupSlotRecord::from_bytes([0x01, 1, 2, 3, 4, 5, 6, 0]);
        assert_eq!(record.marker, 0x01);
        assert_eq!(record.get(Position::LeftDefense), 1);
        assert_eq!(record.get(Position::Extra), 6);
        assert_eq!(record.get(Position::Goalie), 0);
        assert_eq!(record.to_bytes(), [0x01, 1, 2, 3, 4, 5, 6, 0]);
    }

    #[test]
    fn test_decode_then_encode_is_identity() {
        let players = roster(&[
            Role::Goalie,
            Role::Goalie,
            Role::Forward,
            Role::Forward,
            Role::Forward,
            Role::Defenseman,
            Role::Defenseman,
        ]);
        let mut records = [LineupSlotRecord::default(); LINEUP_COUNT];
        records[0].slots = [6, 7, 3, 4, 5, 0, 0];
        records[1].slots = [7, 6, 5, 3, 4, 3, 1];
        records[7].slots = [0, 0, 0, 0, 0, 0, 255];

        let lineup = Lineup::decode(&records, players);
        assert_eq!(lineup.get(0, Position::Goalie), Some(&lineup.roster[0].id));
        assert_eq!(lineup.get(0, Position::LeftDefense), Some(&lineup.roster[5].id));
        assert_eq!(lineup.get(0, Position::Extra), None);

        let (encoded, anomalies) = lineup.encode();
        assert!(anomalies.is_empty());
        assert_eq!(encoded, records);
    }

    #[test]
    fn test_set_validates_line_and_player() {
        let mut lineup = Lineup::empty(roster(&[Role::Goalie, Role::Forward]));
        let goalie = lineup.roster[0].id.clone();

        lineup.set(3, Position::Goalie, Some(goalie.clone())).unwrap();
        assert_eq!(lineup.get(3, Position::Goalie), Some(&goalie));
        assert_eq!(lineup.defense_pairings[3].g, Some(goalie.clone()));

        assert!(matches!(
            lineup.set(8, Position::Goalie, Some(goalie)),
            Err(Error::InvalidLineup(_))
        ));
        assert!(matches!(
            lineup.set(0, Position::Center, Some(PlayerId::from("nobody-0-9"))),
            Err(Error::PlayerNotFound(_))
        ));

        lineup.set(3, Position::Goalie, None).unwrap();
        assert_eq!(lineup.get(3, Position::Goalie), None);
        assert_eq!(lineup.get(9, Position::Goalie), None);
    }

    #[test]
    fn test_encode_unknown_player_writes_sentinel() {
        let mut lineup = Lineup::empty(roster(&[Role::Goalie, Role::Forward]));
        lineup.forward_lines[2].c = Some(PlayerId::from("ghost-99-5"));
        lineup.defense_pairings[2].g = Some(PlayerId::from("ghost-1-6"));

        let (records, anomalies) = lineup.encode();

        assert_eq!(records[2].get(Position::Center), 0);
        assert_eq!(records[2].get(Position::Goalie), 255);
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies[0].line, 2);
        assert_eq!(anomalies[0].position, Position::Center);
        assert_eq!(anomalies[0].kind, AnomalyKind::NotInRoster);
        assert_eq!(anomalies[1].position, Position::Goalie);
    }

    #[test]
    fn test_encode_unrepresentable_goalie_index() {
        let mut roles = vec![Role::Forward; 255];
        roles.push(Role::Goalie);
        let mut lineup = Lineup::empty(roster(&roles));
        let goalie = lineup.roster[255].id.clone();
        lineup.set(0, Position::Goalie, Some(goalie.clone())).unwrap();

        let (records, anomalies) = lineup.encode();

        assert_eq!(records[0].get(Position::Goalie), 255);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].player, goalie);
        assert_eq!(
            anomalies[0].kind,
            AnomalyKind::Unencodable { roster_index: 255 }
        );
        assert!(anomalies[0].to_string().contains("no slot encoding"));
    }

    #[test]
    fn test_unresolved_slot_bytes_survive_encoding() {
        let mut records = [LineupSlotRecord::default(); LINEUP_COUNT];
        records[2].slots = [9, 0, 0, 0, 0, 0, 7];
        let players = roster(&[Role::Goalie, Role::Forward, Role::Defenseman]);
        let mut lineup = Lineup::decode(&records, players);

        assert_eq!(lineup.get(2, Position::LeftDefense), None);
        assert_eq!(lineup.unresolved(2, Position::LeftDefense), Some(9));
        assert_eq!(lineup.unresolved(2, Position::Goalie), Some(7));
        assert_eq!(lineup.unresolved(2, Position::Center), None);

        let goalie = lineup.roster[0].id.clone();
        lineup.set(0, Position::Goalie, Some(goalie)).unwrap();

        let (encoded, anomalies) = lineup.encode();
        assert!(anomalies.is_empty());
        assert_eq!(encoded[0].get(Position::Goalie), 0);
        assert_eq!(encoded[2].slots, [9, 0, 0, 0, 0, 0, 7]);
    }

    #[test]
    fn test_clearing_unresolved_slot_writes_sentinel() {
        let mut records = [LineupSlotRecord::default(); LINEUP_COUNT];
        records[4].slots = [0, 0, 0, 12, 0, 0, 9];
        let mut lineup = Lineup::decode(&records, roster(&[Role::Goalie, Role::Forward]));

        lineup.set(4, Position::Center, None).unwrap();
        let forward = lineup.roster[1].id.clone();
        lineup.set(4, Position::Goalie, Some(forward)).unwrap();

        let (encoded, _) = lineup.encode();
        assert_eq!(lineup.unresolved(4, Position::Center), None);
        assert_eq!(encoded[4].slots, [0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_encode_lineup_leaves_marker_bytes() {
        let lineup = {
            let mut l = Lineup::empty(roster(&[Role::Goalie, Role::Forward]));
            l.forward_lines[0].c = Some(l.roster[1].id.clone());
            l.defense_pairings[0].g = Some(l.roster[0].id.clone());
            l
        };
        let mut image = vec![0xAAu8; 0x10 + LINEUP_TABLE_OFFSET + 64];

        let anomalies = encode_lineup(&mut image, 0x10, &lineup).unwrap();
        assert!(anomalies.is_empty());

        let table = &image[0x10 + LINEUP_TABLE_OFFSET..];
        assert_eq!(&table[0..8], &[0xAA, 0, 0, 0, 2, 0, 0, 0]);
        for line in 1..LINEUP_COUNT {
            let at = line * LINE_RECORD_SIZE;
            assert_eq!(&table[at..at + 8], &[0xAA, 0, 0, 0, 0, 0, 0, 255]);
        }
        assert!(image[..0x10 + LINEUP_TABLE_OFFSET].iter().all(|b| *b == 0xAA));
    }

    #[test]
    fn test_encode_lineup_out_of_bounds_writes_nothing() {
        let lineup = Lineup::empty(Vec::new());
        let mut image = vec![0xAAu8; 0x80];

        assert!(encode_lineup(&mut image, 0x10, &lineup).is_err());
        assert!(image.iter().all(|b| *b == 0xAA));
    }
}
