//! Per-team structures: header metadata, player records and lineup slots.

mod lineup;
mod metadata;
mod player;

pub use lineup::*;
pub use metadata::*;
pub use player::*;

/// Offset of the lineup table relative to the team pointer.
pub const LINEUP_TABLE_OFFSET: usize = 0x52;

/// Number of lines in a team's lineup table.
pub const LINEUP_COUNT: usize = 8;

/// Size of one line record: marker byte plus seven slot bytes.
pub const LINE_RECORD_SIZE: usize = 8;

/// Slots per line (LD, RD, LW, C, RW, EX, G).
pub const SLOTS_PER_LINE: usize = 7;

/// Constant first byte of each line record. Never rewritten.
pub const LINE_MARKER: u8 = 0x01;

/// Absolute offset of the slot bytes for `line` of the team at `team_pointer`.
pub fn line_slots_offset(team_pointer: u32, line: usize) -> usize {
    (team_pointer as usize)
        .saturating_add(LINEUP_TABLE_OFFSET + line * LINE_RECORD_SIZE + 1)
}
