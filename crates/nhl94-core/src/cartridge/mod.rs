//! Whole-cartridge decoding.
//!
//! `parse_cartridge` reads the index and then every team it points to. A bad
//! team pointer is recorded as a `TeamSkip` and never aborts the other teams;
//! only a missing team count or pointer table fails the whole parse.

mod index;
mod save;

pub use index::*;
pub use save::*;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::checksum::recompute_checksum_with;
use crate::error::Result;
use crate::export::format_team_summary;
use crate::layout::RomLayout;
use crate::team::{Lineup, LineupAnomaly, PlayerRecord, TeamRecord, encode_lineup, parse_players};

/// A decoded team: header plus roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub record: TeamRecord,
    pub players: Vec<PlayerRecord>,
}

impl Team {
    /// Decodes the header and player block of the team at `team_pointer`.
    pub fn parse(image: &[u8], team_pointer: u32) -> Result<Self> {
        let record = TeamRecord::parse(image, team_pointer)?;
        let players = parse_players(
            image,
            team_pointer,
            record.player_data_offset,
            record.player_data_size,
            record.goalie_count,
            record.forward_count,
        );
        Ok(Self { record, players })
    }

    pub fn pointer(&self) -> u32 {
        self.record.team_pointer
    }

    pub fn display_name(&self) -> String {
        self.record.display_name()
    }

    /// The lineup table resolved against this team's roster.
    pub fn lineup(&self) -> Lineup {
        Lineup::decode(&self.record.lineups, self.players.clone())
    }

    /// Matches an abbreviation, nickname, "City Name" or hex team pointer (case-insensitive).
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.eq_ignore_ascii_case(&self.record.abbreviation)
            || query.eq_ignore_ascii_case(&self.record.name)
            || query.eq_ignore_ascii_case(&self.display_name())
        {
            return true;
        }

        let hex = query
            .strip_prefix("0x")
            .or_else(|| query.strip_prefix("0X"))
            .unwrap_or(query);
        u32::from_str_radix(hex, 16).is_ok_and(|pointer| pointer == self.pointer())
    }
}

/// A team pointer that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSkip {
    pub pointer: u32,
    pub reason: String,
}

/// Everything decoded from one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cartridge {
    pub index: CartridgeIndex,
    pub teams: Vec<Team>,
    pub skipped: Vec<TeamSkip>,
}

impl Cartridge {
    pub fn find_team(&self, query: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.matches(query))
    }

    pub fn team_by_pointer(&self, pointer: u32) -> Option<&Team> {
        self.teams.iter().find(|team| team.pointer() == pointer)
    }
}

/// Parses a cartridge with the NHL '94 layout.
pub fn parse_cartridge(image: &[u8]) -> Result<Cartridge> {
    parse_cartridge_with(image, &RomLayout::default())
}

/// Parses the index and every team it lists.
///
/// # Errors
///
/// Fails only when the index itself cannot be read. Teams that fail to
/// decode are collected in `Cartridge::skipped`.
pub fn parse_cartridge_with(image: &[u8], layout: &RomLayout) -> Result<Cartridge> {
    let index = CartridgeIndex::parse(image, layout)?;
    let mut teams = Vec::with_capacity(index.team_pointers.len());
    let mut skipped = Vec::new();

    for &pointer in &index.team_pointers {
        match Team::parse(image, pointer) {
            Ok(team) => {
                debug!("Decoded {}", format_team_summary(&team));
                teams.push(team);
            }
            Err(e) => {
                warn!("Error parsing team info at pointer {:#X}: {}", pointer, e);
                skipped.push(TeamSkip {
                    pointer,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        "Parsed '{}': {} teams, {} skipped",
        index.cartridge_name,
        teams.len(),
        skipped.len()
    );

    Ok(Cartridge {
        index,
        teams,
        skipped,
    })
}

/// Decodes one team, logging and returning `None` on failure.
pub fn parse_team(image: &[u8], team_pointer: u32) -> Option<Team> {
    match Team::parse(image, team_pointer) {
        Ok(team) => Some(team),
        Err(e) => {
            warn!(
                "Error parsing team info at pointer {:#X}: {}",
                team_pointer, e
            );
            None
        }
    }
}

/// Returns a copy of `image` with `lineup` written into the team's lineup table.
///
/// The checksum is not updated; see `with_recomputed_checksum`.
pub fn with_encoded_lineup(
    image: &[u8],
    team_pointer: u32,
    lineup: &Lineup,
) -> Result<(Vec<u8>, Vec<LineupAnomaly>)> {
    let mut out = image.to_vec();
    let anomalies = encode_lineup(&mut out, team_pointer, lineup)?;
    Ok((out, anomalies))
}

/// Returns a copy of `image` with a freshly computed checksum.
pub fn with_recomputed_checksum(image: &[u8]) -> Result<Vec<u8>> {
    let mut out = image.to_vec();
    recompute_checksum_with(&mut out, &RomLayout::default())?;
    Ok(out)
}
