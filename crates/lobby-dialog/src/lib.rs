//! Conversation engine for Lobby.
//!
//! A [`DialogGraph`] is a static, possibly cyclic set of [`DialogNode`]s whose
//! options either jump to another node or close the conversation. The
//! [`DialogEngine`] walks it one choice at a time, and the [`Typewriter`]
//! reveals each node's text character by character on scheduler ticks.

/// The built-in portfolio conversation.
pub mod content;
/// The dialog state machine.
pub mod engine;
/// Error types for the dialog crate.
pub mod error;
/// Dialog nodes, options, and the node graph.
pub mod graph;
/// Visited-node and chosen-option tracking.
pub mod memory;
/// Character-by-character text reveal.
pub mod typewriter;

pub use content::{EASTER_EGG_NODE, ENTRY_NODES, INTRO_NODE, WELCOME_NODE, portfolio_tree};
pub use engine::{ChoiceOutcome, DialogEngine, DialogSession};
pub use error::{DialogError, DialogResult};
pub use graph::{CLOSE_SENTINEL, DialogGraph, DialogNode, DialogOption, GraphIssue, OptionTarget};
pub use memory::ChoiceMemory;
pub use typewriter::{Typewriter, TypewriterConfig, TypewriterEvent, TypewriterSnapshot};
