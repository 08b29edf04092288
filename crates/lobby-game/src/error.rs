//! Error types for the game session.

use thiserror::Error;

/// Result type for game session operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while building or driving a game session.
#[derive(Debug, Error)]
pub enum GameError {
    /// No object with that id in the scene.
    #[error("unknown object: {0}")]
    UnknownObject(String),

    /// Scene or motion configuration problem.
    #[error("{0}")]
    Core(#[from] lobby_core::CoreError),

    /// Dialog content or typewriter problem.
    #[error("{0}")]
    Dialog(#[from] lobby_dialog::DialogError),

    /// Terminal content problem.
    #[error("{0}")]
    Terminal(#[from] lobby_terminal::TerminalError),

    /// Config file I/O.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config JSON could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
