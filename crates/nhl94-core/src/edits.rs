//! JSON lineup edit documents.
//!
//! ```json
//! {
//!   "teams": [
//!     {
//!       "team": "BOS",
//!       "lines": [
//!         { "line": 0, "position": "G", "player": "andy-moog-35-0" },
//!         { "line": 1, "position": "C", "player": null }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `team` accepts anything `Cartridge::find_team` does. `line` is 0-based.
//! A null `player` clears the slot.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cartridge::{Cartridge, LineupChange};
use crate::error::{Error, Result};
use crate::team::{PlayerId, Position};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDocument {
    pub teams: Vec<TeamEdit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEdit {
    pub team: String,
    #[serde(default)]
    pub lines: Vec<SlotEdit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEdit {
    pub line: usize,
    pub position: Position,
    #[serde(default)]
    pub player: Option<PlayerId>,
}

impl EditDocument {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Resolves every team edit against `cartridge` and applies its slot
    /// edits on top of the team's current lineup.
    ///
    /// Several edits naming the same team are merged into one change.
    ///
    /// # Errors
    ///
    /// `TeamNotFound` for an unknown team; `InvalidLineup` or
    /// `PlayerNotFound` for a slot edit the team's lineup rejects.
    pub fn apply(&self, cartridge: &Cartridge) -> Result<Vec<LineupChange>> {
        let mut changes: Vec<LineupChange> = Vec::new();

        for edit in &self.teams {
            let team = cartridge
                .find_team(&edit.team)
                .ok_or_else(|| Error::TeamNotFound(edit.team.clone()))?;

            let index = match changes
                .iter()
                .position(|c| c.team_pointer == team.pointer())
            {
                Some(index) => index,
                None => {
                    changes.push(LineupChange {
                        team_pointer: team.pointer(),
                        lineup: team.lineup(),
                    });
                    changes.len() - 1
                }
            };

            let lineup = &mut changes[index].lineup;
            for slot in &edit.lines {
                lineup.set(slot.line, slot.position, slot.player.clone())?;
            }

            debug!(
                "Applied {} slot edit(s) to {}",
                edit.lines.len(),
                team.display_name()
            );
        }

        Ok(changes)
    }
}
