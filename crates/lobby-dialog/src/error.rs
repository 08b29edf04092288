//! Error types for the dialog crate.

use thiserror::Error;

/// Result type for dialog operations.
pub type DialogResult<T> = Result<T, DialogError>;

/// Errors raised by dialog content or the engine walking it.
///
/// All of these point at broken authored content rather than at something a
/// visitor did.
#[derive(Debug, Error)]
pub enum DialogError {
    /// A node id that is not in the graph.
    #[error("dialog node not found: {0}")]
    UnknownNode(String),

    /// An option jumps to a node that does not exist.
    #[error("option \"{option}\" in node \"{node}\" points to missing node \"{target}\"")]
    DanglingTarget {
        /// Node holding the option.
        node: String,
        /// The option id.
        option: String,
        /// The missing target.
        target: String,
    },

    /// Two options in one node share an id.
    #[error("node \"{node}\" has more than one option with id \"{option}\"")]
    DuplicateOption {
        /// Node holding the options.
        node: String,
        /// The repeated id.
        option: String,
    },

    /// The graph has no nodes at all.
    #[error("dialog graph is empty")]
    EmptyGraph,

    /// The typewriter rate is not a positive finite number.
    #[error("invalid typewriter rate: {0}")]
    InvalidRate(f64),

    /// Graph JSON could not be parsed.
    #[error("dialog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
