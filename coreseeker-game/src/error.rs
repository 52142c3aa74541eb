//! Error type shared by the engine.
//!
//! Bad menu input and illegal moves are never errors; they are handled where
//! they happen by re-prompting. What remains is the plumbing around the game.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("input stream closed")]
    InputClosed,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed data table: {0}")]
    Data(#[from] serde_json::Error),
    #[error("invalid game data: {reason}")]
    InvalidData { reason: String },
}

impl GameError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            reason: reason.into(),
        }
    }
}
