//! Retro terminal for Lobby.
//!
//! A line-oriented command shell that reaches the same content as the scene:
//! section panels, the conversation, and the resume. Each submitted line
//! yields a list of [`TerminalEffect`]s for the host to apply.

/// The command table and canned outputs.
pub mod commands;
/// Error types for the terminal crate.
pub mod error;
/// Input line parsing and command suggestions.
pub mod parser;
/// Static data about the portfolio owner.
pub mod profile;
/// Paginated section screens.
pub mod screen;
/// The interactive shell state.
pub mod session;

pub use commands::{COMMANDS, CommandAction, CommandSpec, help_text, lookup};
pub use error::{TerminalError, TerminalResult};
pub use parser::{ParsedLine, parse_line, suggest_command};
pub use profile::{Profile, Project, SkillSet, WorkEntry};
pub use screen::{
    MAX_LINES_PER_PAGE, ScreenViewer, TerminalScreen, paginate, screen_for, screen_named, separator,
};
pub use session::{TerminalConfig, TerminalEffect, TerminalSession};
