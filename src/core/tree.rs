//! # Menu Tree
//!
//! The immutable node hierarchy. Every raw entry is resolved exactly once,
//! at load time, into a closed [`NodeKind`]. Selection code matches on the
//! variant and never re-inspects which fields a node happened to carry.
//!
//! Resolution precedence when an entry carries conflicting fields:
//!
//! ```text
//! action is "exit" / "close_menu" / "back"  →  Directive
//! questions + action                        →  QuestionedAction
//! action                                    →  Action
//! submenu                                   →  Submenu
//! none of the above                         →  ConfigError::UnresolvedNode
//! ```

use log::warn;
use std::collections::HashSet;
use std::sync::Arc;

use crate::core::action::ActionRegistry;
use crate::core::config::{ConfigError, Question, RawNode};

/// Action ids with built-in engine semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Exit,
    CloseMenu,
    Back,
}

impl Directive {
    pub fn from_action_id(id: &str) -> Option<Self> {
        match id {
            "exit" => Some(Directive::Exit),
            "close_menu" => Some(Directive::CloseMenu),
            "back" => Some(Directive::Back),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Submenu(Arc<MenuTree>),
    Action(String),
    QuestionedAction {
        action: String,
        questions: Vec<Question>,
    },
    Directive(Directive),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    pub key: String,
    pub description: Option<String>,
    pub kind: NodeKind,
}

impl MenuNode {
    pub fn is_submenu(&self) -> bool {
        matches!(self.kind, NodeKind::Submenu(_))
    }

    /// The registry id this node would invoke, if any.
    pub fn action_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Action(id) | NodeKind::QuestionedAction { action: id, .. } => Some(id),
            _ => None,
        }
    }
}

/// An ordered list of sibling nodes. Display order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
}

impl MenuTree {
    /// Build a tree from already-resolved nodes, rejecting duplicate keys.
    pub fn new(nodes: Vec<MenuNode>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for node in &nodes {
            if !seen.insert(node.key.as_str()) {
                return Err(ConfigError::DuplicateKey(node.key.clone()));
            }
        }
        Ok(Self { nodes })
    }

    /// Resolve raw config entries, recursing into submenus.
    pub fn from_raw(raw: &[RawNode]) -> Result<Self, ConfigError> {
        let nodes = raw.iter().map(resolve_node).collect::<Result<Vec<_>, _>>()?;
        Self::new(nodes)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MenuNode> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuNode> {
        self.nodes.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.key.as_str())
    }

    /// Every node in the tree, depth first.
    pub fn walk(&self) -> Vec<&MenuNode> {
        let mut out = Vec::new();
        for node in &self.nodes {
            out.push(node);
            if let NodeKind::Submenu(sub) = &node.kind {
                out.extend(sub.walk());
            }
        }
        out
    }

    /// Fail if any node references an action missing from `registry`.
    pub fn validate_actions(&self, registry: &ActionRegistry) -> Result<(), ConfigError> {
        for node in self.walk() {
            if let Some(id) = node.action_id()
                && !registry.contains(id)
            {
                return Err(ConfigError::UnknownAction {
                    action: id.to_string(),
                    node: node.key.clone(),
                });
            }
        }
        Ok(())
    }
}

fn resolve_node(raw: &RawNode) -> Result<MenuNode, ConfigError> {
    let directive = raw.action.as_deref().and_then(Directive::from_action_id);

    let kind = match (directive, &raw.action, &raw.questions, &raw.submenu) {
        (Some(d), _, _, _) => NodeKind::Directive(d),
        (None, Some(action), Some(questions), _) => NodeKind::QuestionedAction {
            action: action.clone(),
            questions: questions.clone(),
        },
        (None, Some(action), None, _) => NodeKind::Action(action.clone()),
        (None, None, _, Some(submenu)) => {
            NodeKind::Submenu(Arc::new(MenuTree::from_raw(submenu)?))
        }
        (None, None, _, None) => return Err(ConfigError::UnresolvedNode(raw.key.clone())),
    };

    if raw.submenu.is_some() && !matches!(kind, NodeKind::Submenu(_)) {
        warn!("Menu entry '{}' has an action; its submenu is ignored", raw.key);
    }

    Ok(MenuNode {
        key: raw.key.clone(),
        description: raw.description.clone(),
        kind,
    })
}
