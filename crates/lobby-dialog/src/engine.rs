//! The dialog state machine.
//!
//! Two states: closed, or open at a node. Transitions happen only through
//! [`DialogEngine::start`], [`DialogEngine::choose`] and [`DialogEngine::close`];
//! there are no timeouts.

use lobby_core::{Observable, SubscriptionId};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{DialogError, DialogResult};
use crate::graph::{DialogGraph, DialogNode, OptionTarget};
use crate::memory::ChoiceMemory;

/// Observable conversation state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DialogSession {
    /// The node being shown, if any.
    pub current_node: Option<String>,
    /// Whether the dialog panel is open.
    pub is_open: bool,
}

/// What a call to [`DialogEngine::choose`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// The dialog was closed or the option id was unknown; nothing changed.
    Ignored,
    /// The conversation moved to a new node.
    Moved(String),
    /// The option closed the conversation.
    Closed,
}

/// Walks a [`DialogGraph`] one choice at a time.
#[derive(Debug)]
pub struct DialogEngine {
    graph: DialogGraph,
    session: Observable<DialogSession>,
    memory: ChoiceMemory,
}

impl DialogEngine {
    /// Create a closed engine over a graph.
    pub fn new(graph: DialogGraph) -> Self {
        Self {
            graph,
            session: Observable::default(),
            memory: ChoiceMemory::new(),
        }
    }

    /// Open the dialog at `entry`.
    ///
    /// Restarting while already open simply jumps to `entry`.
    pub fn start(&mut self, entry: &str) -> DialogResult<()> {
        if !self.graph.contains(entry) {
            return Err(DialogError::UnknownNode(entry.to_string()));
        }
        debug!(node = entry, "dialog started");
        self.memory.mark_conversation();
        self.enter(entry.to_string());
        Ok(())
    }

    /// Pick an option of the current node.
    ///
    /// Unknown option ids, and any choice while closed, are ignored. An option
    /// pointing at a missing node is reported and leaves the state untouched.
    pub fn choose(&mut self, option_id: &str) -> DialogResult<ChoiceOutcome> {
        let Some(node_id) = self.current_node_id().map(str::to_string) else {
            return Ok(ChoiceOutcome::Ignored);
        };
        let Some(option) = self
            .graph
            .get(&node_id)
            .and_then(|node| node.option(option_id))
        else {
            trace!(node = %node_id, option = option_id, "unknown option ignored");
            return Ok(ChoiceOutcome::Ignored);
        };

        match option.next_node.clone() {
            OptionTarget::Close => {
                self.memory.mark_chosen(&node_id, option_id);
                self.close();
                Ok(ChoiceOutcome::Closed)
            }
            OptionTarget::Goto(next) => {
                if !self.graph.contains(&next) {
                    return Err(DialogError::DanglingTarget {
                        node: node_id,
                        option: option_id.to_string(),
                        target: next,
                    });
                }
                self.memory.mark_chosen(&node_id, option_id);
                debug!(from = %node_id, to = %next, "dialog choice");
                self.enter(next.clone());
                Ok(ChoiceOutcome::Moved(next))
            }
        }
    }

    /// Close the dialog. Always allowed.
    pub fn close(&mut self) {
        if self.session.get().is_open {
            debug!("dialog closed");
        }
        self.session.set_if_changed(DialogSession::default());
    }

    /// Whether the dialog is open.
    pub fn is_open(&self) -> bool {
        self.session.get().is_open
    }

    /// Id of the node being shown, if open.
    pub fn current_node_id(&self) -> Option<&str> {
        let session = self.session.get();
        if session.is_open {
            session.current_node.as_deref()
        } else {
            None
        }
    }

    /// The node being shown, resolved against the graph.
    pub fn current_node(&self) -> Option<&DialogNode> {
        self.current_node_id().and_then(|id| self.graph.get(id))
    }

    /// The observable session value.
    pub fn session(&self) -> &DialogSession {
        self.session.get()
    }

    /// Listen for session changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&DialogSession) + 'static) -> SubscriptionId {
        self.session.subscribe(listener)
    }

    /// Stop listening.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.session.unsubscribe(id)
    }

    /// Visited nodes and chosen options so far.
    pub fn memory(&self) -> &ChoiceMemory {
        &self.memory
    }

    /// Forget visited nodes and choices.
    pub fn reset_memory(&mut self) {
        self.memory.reset();
    }

    /// The graph being walked.
    pub fn graph(&self) -> &DialogGraph {
        &self.graph
    }

    fn enter(&mut self, node: String) {
        self.memory.mark_visited(&node);
        self.session.set(DialogSession {
            current_node: Some(node),
            is_open: true,
        });
    }
}
