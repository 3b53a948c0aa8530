//! Export formats for decoded rosters and lineups.

mod console;

pub use console::*;

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::cartridge::{Cartridge, Team};
use crate::error::Result;
use crate::team::{
    DefensePairing, ForwardLine, LINEUP_COUNT, Lineup, PlayerAttributes, PlayerId, PlayerRecord,
    Position,
};

pub fn format_roster_tsv_header() -> String {
    [
        "Team",
        "Ordinal",
        "Id",
        "Name",
        "Jersey",
        "Role",
        "Hand",
        "Overall",
        "Weight",
        "Agility",
        "Speed",
        "OffAware",
        "DefAware",
        "ShotPower",
        "Checking",
        "Fighting",
        "Stickhandling",
        "ShotAccuracy",
        "Endurance",
        "Roughness",
        "PassAccuracy",
        "Aggressiveness",
    ]
    .join("\t")
}

pub fn format_roster_tsv_row(team: &Team, player: &PlayerRecord) -> String {
    let a = &player.attributes;
    let values: Vec<String> = vec![
        team.record.abbreviation.clone(),
        player.ordinal.to_string(),
        player.id.to_string(),
        player.name.clone(),
        player.jersey_number.to_string(),
        player.role.short_name().to_string(),
        a.handedness.short_name().to_string(),
        player.overall().to_string(),
        a.weight.to_string(),
        a.agility.to_string(),
        a.speed.to_string(),
        a.offensive_awareness.to_string(),
        a.defensive_awareness.to_string(),
        a.shot_power.to_string(),
        a.checking.to_string(),
        a.fighting.to_string(),
        a.stickhandling.to_string(),
        a.shot_accuracy.to_string(),
        a.endurance.to_string(),
        a.roughness.to_string(),
        a.pass_accuracy.to_string(),
        a.aggressiveness.to_string(),
    ];

    values.join("\t")
}

/// Header plus one row per player of every given team.
pub fn generate_roster_tsv<'a>(teams: impl IntoIterator<Item = &'a Team>) -> String {
    let mut lines = vec![format_roster_tsv_header()];
    for team in teams {
        lines.extend(team.players.iter().map(|p| format_roster_tsv_row(team, p)));
    }
    lines.join("\n")
}

pub fn export_roster_tsv<P: AsRef<Path>>(path: P, cartridge: &Cartridge) -> Result<()> {
    fs::write(path, generate_roster_tsv(&cartridge.teams))?;
    Ok(())
}

/// Plain-text lineup sheet: one row per line, one column per position.
pub fn format_lineup_text(team: &Team) -> String {
    let lineup = team.lineup();
    let mut output = String::new();

    let _ = writeln!(output, "{}", team.display_name());
    for line in 0..LINEUP_COUNT {
        let slots: Vec<String> = Position::ALL
            .iter()
            .map(|&position| {
                format!(
                    "{} {}",
                    position,
                    slot_label(&lineup, lineup.get(line, position))
                )
            })
            .collect();
        let _ = writeln!(output, "  Line {}: {}", line + 1, slots.join(" | "));
    }

    output
}

/// "Name #jersey" for an occupied slot, "-" for an empty one.
pub(crate) fn slot_label(lineup: &Lineup, id: Option<&PlayerId>) -> String {
    match id.and_then(|id| lineup.player(id)) {
        Some(player) => format!("{} #{}", player.name, player.jersey_number),
        None => "-".to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartridgeJson {
    pub cartridge_name: String,
    pub team_count: u8,
    pub teams: Vec<TeamJson>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamJson {
    pub pointer: String,
    pub city: String,
    pub abbreviation: String,
    pub name: String,
    pub forwards: u8,
    pub defensemen: u8,
    pub goalies: u8,
    pub players: Vec<PlayerJson>,
    pub forward_lines: Vec<ForwardLine>,
    pub defense_pairings: Vec<DefensePairing>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerJson {
    pub id: PlayerId,
    pub name: String,
    pub jersey: u8,
    pub role: &'static str,
    pub handedness: &'static str,
    pub overall: u8,
    pub attributes: PlayerAttributes,
}

impl From<&PlayerRecord> for PlayerJson {
    fn from(player: &PlayerRecord) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            jersey: player.jersey_number,
            role: player.role.short_name(),
            handedness: player.attributes.handedness.short_name(),
            overall: player.overall(),
            attributes: player.attributes,
        }
    }
}

impl From<&Team> for TeamJson {
    fn from(team: &Team) -> Self {
        let lineup = team.lineup();
        let record = &team.record;
        Self {
            pointer: format!("{:#X}", record.team_pointer),
            city: record.city.clone(),
            abbreviation: record.abbreviation.clone(),
            name: record.name.clone(),
            forwards: record.forward_count,
            defensemen: record.defenseman_count,
            goalies: record.goalie_count,
            players: team.players.iter().map(PlayerJson::from).collect(),
            forward_lines: lineup.forward_lines.to_vec(),
            defense_pairings: lineup.defense_pairings.to_vec(),
        }
    }
}

impl From<&Cartridge> for CartridgeJson {
    fn from(cartridge: &Cartridge) -> Self {
        Self {
            cartridge_name: cartridge.index.cartridge_name.clone(),
            team_count: cartridge.index.team_count,
            teams: cartridge.teams.iter().map(TeamJson::from).collect(),
            skipped: cartridge
                .skipped
                .iter()
                .map(|s| format!("{:#X}: {}", s.pointer, s.reason))
                .collect(),
        }
    }
}

pub fn generate_cartridge_json(cartridge: &Cartridge) -> Result<String> {
    Ok(serde_json::to_string_pretty(&CartridgeJson::from(cartridge))?)
}

pub fn export_cartridge_json<P: AsRef<Path>>(path: P, cartridge: &Cartridge) -> Result<()> {
    fs::write(path, generate_cartridge_json(cartridge)?)?;
    Ok(())
}
