//! Visited-node and chosen-option tracking.

use std::collections::{HashMap, HashSet};

/// Remembers where a visitor has been in the conversation.
///
/// Survives closing and reopening the dialog; only [`ChoiceMemory::reset`]
/// forgets.
#[derive(Debug, Clone, Default)]
pub struct ChoiceMemory {
    /// Nodes that have been displayed.
    visited: HashSet<String>,
    /// Options picked, keyed by the node they were picked in.
    chosen: HashMap<String, HashSet<String>>,
    /// Number of conversations started.
    conversations: u32,
}

impl ChoiceMemory {
    /// Empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a node as displayed.
    pub fn mark_visited(&mut self, node: impl Into<String>) {
        self.visited.insert(node.into());
    }

    /// Whether a node has been displayed.
    pub fn has_visited(&self, node: &str) -> bool {
        self.visited.contains(node)
    }

    /// Number of distinct nodes displayed.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Record an option choice.
    pub fn mark_chosen(&mut self, node: impl Into<String>, option: impl Into<String>) {
        self.chosen
            .entry(node.into())
            .or_default()
            .insert(option.into());
    }

    /// Whether an option has been chosen in a node.
    pub fn has_chosen(&self, node: &str, option: &str) -> bool {
        self.chosen
            .get(node)
            .is_some_and(|options| options.contains(option))
    }

    /// Every option chosen in a node.
    pub fn chosen_in(&self, node: &str) -> Option<&HashSet<String>> {
        self.chosen.get(node)
    }

    pub(crate) fn mark_conversation(&mut self) {
        self.conversations = self.conversations.saturating_add(1);
    }

    /// How many times a conversation has been started.
    pub fn conversations(&self) -> u32 {
        self.conversations
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.chosen.clear();
        self.conversations = 0;
    }
}
