use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Out of bounds access at offset {offset:#x}: {size} bytes exceeds image length {len:#x}")]
    OutOfBounds { offset: usize, size: usize, len: usize },

    #[error("ROM too small: {0}")]
    RomTooSmall(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Player not found in roster: {0}")]
    PlayerNotFound(String),

    #[error("Invalid lineup: {0}")]
    InvalidLineup(String),

    #[error("Layout parse error: {0}")]
    LayoutParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for failures that leave nothing to decode (missing team count or pointer table).
    pub fn is_hard_failure(&self) -> bool {
        matches!(self, Error::RomTooSmall(_))
    }
}
