pub mod cartridge;
pub mod checksum;
pub mod edits;
pub mod error;
pub mod export;
pub mod layout;
pub mod rom;
pub mod team;

pub use cartridge::{
    Cartridge, CartridgeIndex, LineupChange, SaveAnomaly, SaveOutcome, Team, TeamSkip,
    apply_save_patch, parse_cartridge, parse_cartridge_with, parse_team, save_lineups,
    with_encoded_lineup, with_recomputed_checksum,
};
pub use checksum::{compute_checksum, recompute_checksum, verify_checksum};
pub use edits::EditDocument;
pub use error::{Error, Result};
pub use layout::{RomLayout, load_layout, save_layout};
pub use team::{
    AnomalyKind, Handedness, Lineup, LineupAnomaly, PlayerAttributes, PlayerId, PlayerRecord,
    Position, Role, TeamRecord,
};
