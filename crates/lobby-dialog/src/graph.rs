//! Dialog nodes, options, and the node graph.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DialogError, DialogResult};

/// How an option that closes the conversation is spelled in JSON content.
pub const CLOSE_SENTINEL: &str = "__close__";

/// Where choosing an option leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OptionTarget {
    /// Continue at another node.
    Goto(String),
    /// End the conversation.
    Close,
}

impl OptionTarget {
    /// Target another node.
    pub fn goto(node: impl Into<String>) -> Self {
        Self::Goto(node.into())
    }

    /// The target node id, unless this option closes.
    pub fn node(&self) -> Option<&str> {
        match self {
            Self::Goto(node) => Some(node),
            Self::Close => None,
        }
    }
}

impl From<String> for OptionTarget {
    fn from(raw: String) -> Self {
        if raw == CLOSE_SENTINEL {
            Self::Close
        } else {
            Self::Goto(raw)
        }
    }
}

impl From<OptionTarget> for String {
    fn from(target: OptionTarget) -> Self {
        match target {
            OptionTarget::Goto(node) => node,
            OptionTarget::Close => CLOSE_SENTINEL.to_string(),
        }
    }
}

/// A labeled choice offered under a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogOption {
    /// Identifier, unique within its node.
    pub id: String,
    /// Text shown to the visitor.
    pub label: String,
    /// Where choosing it leads.
    pub next_node: OptionTarget,
}

impl DialogOption {
    /// An option that continues at `node`.
    pub fn goto(id: impl Into<String>, label: impl Into<String>, node: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            next_node: OptionTarget::goto(node),
        }
    }

    /// An option that ends the conversation.
    pub fn close(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            next_node: OptionTarget::Close,
        }
    }
}

/// One line of conversation and the replies it offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogNode {
    /// Who is talking.
    pub speaker: String,
    /// What they say.
    pub text: String,
    /// Replies, in display order.
    #[serde(default)]
    pub options: Vec<DialogOption>,
}

impl DialogNode {
    /// Create a node with no options.
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            options: Vec::new(),
        }
    }

    /// Add an option.
    pub fn with_option(mut self, option: DialogOption) -> Self {
        self.options.push(option);
        self
    }

    /// Find an option by id.
    pub fn option(&self, id: &str) -> Option<&DialogOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// A finding from [`DialogGraph::issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphIssue {
    /// The node the issue was found in (empty for graph-wide issues).
    pub node: String,
    /// A human-readable description.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        if self.node.is_empty() {
            write!(f, "{level}: {}", self.message)
        } else {
            write!(f, "{level}: {}: {}", self.node, self.message)
        }
    }
}

/// The full set of nodes, keyed by id.
///
/// Cycles are allowed: leaf nodes routinely jump back to a hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogGraph {
    nodes: BTreeMap<String, DialogNode>,
}

impl DialogGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node (builder form).
    pub fn with_node(mut self, id: impl Into<String>, node: DialogNode) -> Self {
        self.insert(id, node);
        self
    }

    /// Add or replace a node, returning the one it replaced.
    pub fn insert(&mut self, id: impl Into<String>, node: DialogNode) -> Option<DialogNode> {
        self.nodes.insert(id.into(), node)
    }

    /// Look up a node.
    pub fn get(&self, id: &str) -> Option<&DialogNode> {
        self.nodes.get(id)
    }

    /// Whether a node exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of options across all nodes.
    pub fn option_count(&self) -> usize {
        self.nodes.values().map(|n| n.options.len()).sum()
    }

    /// Nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DialogNode)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }

    /// Every structural error: empty graph, dangling targets, duplicate option ids.
    pub fn errors(&self) -> Vec<DialogError> {
        let mut errors = Vec::new();
        if self.nodes.is_empty() {
            errors.push(DialogError::EmptyGraph);
        }
        for (id, node) in &self.nodes {
            let mut seen = HashSet::new();
            for option in &node.options {
                if !seen.insert(option.id.as_str()) {
                    errors.push(DialogError::DuplicateOption {
                        node: id.clone(),
                        option: option.id.clone(),
                    });
                }
                let Some(target) = option.next_node.node() else {
                    continue;
                };
                if !self.nodes.contains_key(target) {
                    errors.push(DialogError::DanglingTarget {
                        node: id.clone(),
                        option: option.id.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
        errors
    }

    /// Fail on the first structural error.
    pub fn validate(&self) -> DialogResult<()> {
        match self.errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Errors plus warnings about nodes unreachable from `entries` and dead ends.
    pub fn issues(&self, entries: &[&str]) -> Vec<GraphIssue> {
        let mut issues: Vec<GraphIssue> = self
            .errors()
            .into_iter()
            .map(|err| {
                let node = match &err {
                    DialogError::DanglingTarget { node, .. }
                    | DialogError::DuplicateOption { node, .. } => node.clone(),
                    _ => String::new(),
                };
                GraphIssue {
                    node,
                    message: err.to_string(),
                    is_error: true,
                }
            })
            .collect();

        for entry in entries {
            if !self.contains(entry) {
                issues.push(GraphIssue {
                    node: String::new(),
                    message: format!("entry node \"{entry}\" does not exist"),
                    is_error: true,
                });
            }
        }

        for (id, node) in &self.nodes {
            if node.options.is_empty() {
                issues.push(GraphIssue {
                    node: id.clone(),
                    message: "no options: the conversation can only be closed from here".into(),
                    is_error: false,
                });
            }
        }

        if !entries.is_empty() {
            let reachable = self.reachable_from(entries);
            for id in self.nodes.keys().filter(|id| !reachable.contains(*id)) {
                issues.push(GraphIssue {
                    node: id.clone(),
                    message: "unreachable from the entry nodes".into(),
                    is_error: false,
                });
            }
        }

        issues
    }

    /// Every node reachable from the given entries (entries included if they exist).
    pub fn reachable_from(&self, entries: &[&str]) -> BTreeSet<String> {
        let mut visited = BTreeSet::new();
        let mut queue: VecDeque<&str> = entries
            .iter()
            .copied()
            .filter(|e| self.contains(e))
            .collect();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.to_string()) {
                continue;
            }
            if let Some(node) = self.nodes.get(current) {
                for option in &node.options {
                    let next = option.next_node.node();
                    if let Some(next) = next.filter(|n| self.contains(n) && !visited.contains(*n)) {
                        queue.push_back(next);
                    }
                }
            }
        }

        visited
    }

    /// Parse a graph from JSON and validate it.
    pub fn from_json(json: &str) -> DialogResult<Self> {
        let graph: Self = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Serialize the graph as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> DialogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_graph() -> DialogGraph {
        DialogGraph::new()
            .with_node(
                "hub",
                DialogNode::new("host", "Hi")
                    .with_option(DialogOption::goto("leaf", "Go on", "leaf"))
                    .with_option(DialogOption::close("bye", "Bye")),
            )
            .with_node(
                "leaf",
                DialogNode::new("host", "More")
                    .with_option(DialogOption::goto("back", "Back", "hub")),
            )
    }

    #[test]
    fn node_builder() {
        let node = DialogNode::new("host", "Hello")
            .with_option(DialogOption::goto("next", "Next", "b"))
            .with_option(DialogOption::close("close", "Close"));

        assert_eq!(node.speaker, "host");
        assert_eq!(node.options.len(), 2);
        assert_eq!(node.option("next").unwrap().next_node, OptionTarget::goto("b"));
        assert_eq!(node.option("close").unwrap().next_node, OptionTarget::Close);
        assert!(node.option("missing").is_none());
    }

    #[test]
    fn cyclic_graph_is_valid() {
        let graph = small_graph();
        graph.validate().unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.option_count(), 3);
    }

    #[test]
    fn dangling_target_detected() {
        let graph = small_graph().with_node(
            "broken",
            DialogNode::new("host", "?").with_option(DialogOption::goto("x", "X", "nowhere")),
        );
        let err = graph.validate().unwrap_err();
        assert!(matches!(
            err,
            DialogError::DanglingTarget { ref node, ref target, .. }
                if node == "broken" && target == "nowhere"
        ));
    }

    #[test]
    fn duplicate_option_detected() {
        let graph = DialogGraph::new().with_node(
            "a",
            DialogNode::new("host", "A")
                .with_option(DialogOption::close("x", "One"))
                .with_option(DialogOption::close("x", "Two")),
        );
        assert!(matches!(
            graph.validate(),
            Err(DialogError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn empty_graph_is_an_error() {
        assert!(matches!(
            DialogGraph::new().validate(),
            Err(DialogError::EmptyGraph)
        ));
    }

    #[test]
    fn reachability_follows_cycles() {
        let graph = small_graph().with_node("orphan", DialogNode::new("host", "Alone"));
        let reachable = graph.reachable_from(&["hub"]);
        assert!(reachable.contains("hub"));
        assert!(reachable.contains("leaf"));
        assert!(!reachable.contains("orphan"));

        let issues = graph.issues(&["hub"]);
        assert!(issues.iter().all(|i| !i.is_error));
        assert!(
            issues
                .iter()
                .any(|i| i.node == "orphan" && i.message.contains("unreachable"))
        );
        assert!(
            issues
                .iter()
                .any(|i| i.node == "orphan" && i.message.contains("no options"))
        );
    }

    #[test]
    fn missing_entry_reported() {
        let issues = small_graph().issues(&["start"]);
        assert!(issues.iter().any(|i| i.is_error && i.message.contains("start")));
    }

    #[test]
    fn json_uses_close_sentinel() {
        let json = r#"{
            "bye": {
                "speaker": "host",
                "text": "See you",
                "options": [{ "id": "close", "label": "[Close]", "next_node": "__close__" }]
            }
        }"#;
        let graph = DialogGraph::from_json(json).unwrap();
        assert_eq!(
            graph.get("bye").unwrap().options[0].next_node,
            OptionTarget::Close
        );

        let out = graph.to_json_pretty().unwrap();
        assert!(out.contains("\"__close__\""));
    }

    #[test]
    fn json_with_dangling_target_rejected() {
        let json = r#"{ "a": { "speaker": "s", "text": "t",
            "options": [{ "id": "o", "label": "l", "next_node": "b" }] } }"#;
        assert!(matches!(
            DialogGraph::from_json(json),
            Err(DialogError::DanglingTarget { .. })
        ));
        assert!(matches!(
            DialogGraph::from_json("not json"),
            Err(DialogError::Parse(_))
        ));
    }

    #[test]
    fn issue_display() {
        let issue = GraphIssue {
            node: "hub".into(),
            message: "something".into(),
            is_error: false,
        };
        assert_eq!(issue.to_string(), "warning: hub: something");
    }
}
