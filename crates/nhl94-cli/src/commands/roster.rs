//! Roster listing.

use std::path::Path;

use anyhow::Result;
use nhl94_core::export::{TeamJson, format_team_console, generate_roster_tsv};
use nhl94_core::{RomLayout, Team};

use crate::cli::RosterFormat;
use crate::cli_utils;

pub fn run(rom: &Path, layout: &RomLayout, team: Option<&str>, format: RosterFormat) -> Result<()> {
    let (_, cartridge) = cli_utils::open_cartridge(rom, layout)?;

    let teams: Vec<&Team> = match team {
        Some(query) => vec![cli_utils::find_team(&cartridge, query)?],
        None => cartridge.teams.iter().collect(),
    };

    match format {
        RosterFormat::Console => {
            for team in teams {
                println!("{}", format_team_console(team));
            }
        }
        RosterFormat::Tsv => println!("{}", generate_roster_tsv(teams)),
        RosterFormat::Json => {
            let json: Vec<TeamJson> = teams.into_iter().map(TeamJson::from).collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
