//! Error types for the terminal crate.

use thiserror::Error;

/// Result type for terminal operations.
pub type TerminalResult<T> = Result<T, TerminalError>;

/// Errors raised when looking up terminal content.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// No screen exists for that name.
    #[error("no such section: {0}")]
    UnknownSection(String),

    /// A page number past the end of a screen.
    #[error("page {page} out of range for {section} (1-{pages})")]
    PageOutOfRange {
        /// Section name.
        section: String,
        /// Requested page, 1-based.
        page: usize,
        /// Number of pages available.
        pages: usize,
    },
}
