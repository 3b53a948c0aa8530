use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};
use tracing::{debug, warn};

use crate::error::Result;
use crate::rom::text::{clean_name, decode_latin1};
use crate::rom::{RomReader, decode_bcd, join_nibbles, split_byte};

/// Number of packed attribute bytes following the jersey number.
pub const ATTRIBUTE_BYTES: usize = 7;

/// Player role, fixed by the record's position in the team's player block.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, EnumIter,
)]
pub enum Role {
    Goalie,
    Forward,
    Defenseman,
}

impl Role {
    /// Player blocks list goalies first, then forwards, then defensemen.
    pub fn for_ordinal(ordinal: usize, goalie_count: u8, forward_count: u8) -> Self {
        let goalies = goalie_count as usize;
        let forwards = forward_count as usize;
        if ordinal < goalies {
            Self::Goalie
        } else if ordinal < goalies + forwards {
            Self::Forward
        } else {
            Self::Defenseman
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Goalie => "G",
            Self::Forward => "F",
            Self::Defenseman => "D",
        }
    }

    pub fn is_goalie(&self) -> bool {
        matches!(self, Self::Goalie)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum Handedness {
    #[strum(serialize = "L")]
    Left,
    #[strum(serialize = "R")]
    Right,
}

impl Handedness {
    /// Even nibble values shoot left, odd values shoot right.
    pub fn from_nibble(nibble: u8) -> Self {
        if nibble % 2 == 0 { Self::Left } else { Self::Right }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

/// The seven packed attribute bytes, one named accessor per nibble.
///
/// | byte | high nibble          | low nibble            |
/// |------|----------------------|-----------------------|
/// | 0    | weight               | agility               |
/// | 1    | speed                | offensive awareness   |
/// | 2    | defensive awareness  | shot power            |
/// | 3    | checking             | handedness / fighting |
/// | 4    | stickhandling        | shot accuracy         |
/// | 5    | endurance            | roughness             |
/// | 6    | pass accuracy        | aggressiveness        |
///
/// Handedness and fighting are two readings of the same nibble: handedness
/// is its parity, fighting is its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerAttributes {
    pub weight: u8,
    pub agility: u8,
    pub speed: u8,
    pub offensive_awareness: u8,
    pub defensive_awareness: u8,
    pub shot_power: u8,
    pub checking: u8,
    pub handedness: Handedness,
    pub fighting: u8,
    pub stickhandling: u8,
    pub shot_accuracy: u8,
    pub endurance: u8,
    pub roughness: u8,
    pub pass_accuracy: u8,
    pub aggressiveness: u8,
}

impl PlayerAttributes {
    pub fn from_bytes(bytes: [u8; ATTRIBUTE_BYTES]) -> Self {
        let (weight, agility) = split_byte(bytes[0]);
        let (speed, offensive_awareness) = split_byte(bytes[1]);
        let (defensive_awareness, shot_power) = split_byte(bytes[2]);
        let (checking, fighting) = split_byte(bytes[3]);
        let (stickhandling, shot_accuracy) = split_byte(bytes[4]);
        let (endurance, roughness) = split_byte(bytes[5]);
        let (pass_accuracy, aggressiveness) = split_byte(bytes[6]);

        Self {
            weight,
            agility,
            speed,
            offensive_awareness,
            defensive_awareness,
            shot_power,
            checking,
            handedness: Handedness::from_nibble(fighting),
            fighting,
            stickhandling,
            shot_accuracy,
            endurance,
            roughness,
            pass_accuracy,
            aggressiveness,
        }
    }

    /// Packs the attributes back into their seven bytes.
    ///
    /// Byte 3's low nibble is written from `fighting`; `handedness` is derived from it.
    pub fn to_bytes(&self) -> [u8; ATTRIBUTE_BYTES] {
        [
            join_nibbles(self.weight, self.agility),
            join_nibbles(self.speed, self.offensive_awareness),
            join_nibbles(self.defensive_awareness, self.shot_power),
            join_nibbles(self.checking, self.fighting),
            join_nibbles(self.stickhandling, self.shot_accuracy),
            join_nibbles(self.endurance, self.roughness),
            join_nibbles(self.pass_accuracy, self.aggressiveness),
        ]
    }
}

/// Synthetic player key: `{lowercased name, whitespace as '-'}-{jersey}-{ordinal}`.
///
/// The cartridge has no player ids. The key is computed once at decode time
/// and must not be recomputed while a lineup is being edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn synthesize(name: &str, jersey_number: u8, ordinal: usize) -> Self {
        let slug = name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        Self(format!("{}-{}-{}", slug, jersey_number, ordinal))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub jersey_number: u8,
    pub role: Role,
    /// Position in the team's player block (0-based). Also the roster index.
    pub ordinal: usize,
    pub attributes: PlayerAttributes,
}

impl PlayerRecord {
    /// Skater overall rating (1..=99). Goalies rate 0.
    pub fn overall(&self) -> u8 {
        if self.role.is_goalie() {
            return 0;
        }

        let a = &self.attributes;
        let total = a.agility as u32 * 2
            + a.speed as u32 * 3
            + a.offensive_awareness as u32 * 3
            + a.defensive_awareness as u32 * 2
            + a.shot_power as u32
            + a.checking as u32 * 2
            + a.stickhandling as u32 * 3
            + a.shot_accuracy as u32 * 2
            + a.endurance as u32
            + a.pass_accuracy as u32;

        if total < 50 {
            // round(total / 2) with halves rounded up
            (total.div_ceil(2) + 25) as u8
        } else if total > 99 {
            99
        } else {
            total as u8
        }
    }
}

/// Walks a team's player block and decodes every record in it.
///
/// The walk ends at the end of the block, at a zero name length, at a name
/// that would run past the block, or at the first read error. Records decoded
/// before the stop are kept.
pub fn parse_players(
    image: &[u8],
    team_pointer: u32,
    player_data_offset: u16,
    player_data_size: usize,
    goalie_count: u8,
    forward_count: u8,
) -> Vec<PlayerRecord> {
    let start = (team_pointer as usize).saturating_add(player_data_offset as usize);
    let end = start.saturating_add(player_data_size);
    let mut roster = Vec::new();

    let mut reader = match RomReader::at(image, start) {
        Ok(reader) => reader,
        Err(e) => {
            warn!(
                "Error parsing players for team at pointer {:#X}: {}",
                team_pointer, e
            );
            return roster;
        }
    };

    while reader.position() < end {
        let ordinal = roster.len();
        match read_player(&mut reader, end, ordinal, goalie_count, forward_count) {
            Ok(Some(player)) => roster.push(player),
            Ok(None) => break,
            Err(e) => {
                warn!(
                    "Error parsing player {} for team at pointer {:#X}: {}",
                    ordinal, team_pointer, e
                );
                break;
            }
        }
    }

    roster
}

/// Reads one record. `Ok(None)` marks the end of the block.
fn read_player(
    reader: &mut RomReader<'_>,
    end: usize,
    ordinal: usize,
    goalie_count: u8,
    forward_count: u8,
) -> Result<Option<PlayerRecord>> {
    let name_length = reader.read_u16_be()? as usize;
    if name_length == 0 {
        return Ok(None);
    }

    if name_length <= 2 || reader.position() + (name_length - 2) > end {
        debug!(
            "Malformed player record at {:#X} (name length {}), ending player block",
            reader.position() - 2,
            name_length
        );
        return Ok(None);
    }

    let name = clean_name(&decode_latin1(reader.read_bytes(name_length - 2)?));
    let jersey_number = decode_bcd(reader.read_u8()?);
    let attributes = PlayerAttributes::from_bytes(reader.read_array()?);

    Ok(Some(PlayerRecord {
        id: PlayerId::synthesize(&name, jersey_number, ordinal),
        name,
        jersey_number,
        role: Role::for_ordinal(ordinal, goalie_count, forward_count),
        ordinal,
        attributes,
    }))
}
