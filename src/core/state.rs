//! # Navigation State
//!
//! The live session: a stack of open menus, the selection cursor, and the
//! current [`Mode`].
//!
//! ```text
//! NavigationState
//! ├── stack: Vec<Frame>       // root first, never empty
//! │   └── Frame { menu: Arc<MenuTree>, name }
//! ├── selected_index: usize   // < top menu length when it is non-empty
//! └── mode: Mode
//! ```
//!
//! Breadcrumbs and the information line are derived from the stack on
//! demand and never stored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::core::tree::{MenuNode, MenuTree};

/// One open menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub menu: Arc<MenuTree>,
    pub name: String,
}

/// The engine's single live activity. Governs which keys are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browsing,
    ShowingDescription,
    AskingQuestions,
    RunningAction,
    Exited,
}

#[derive(Debug, Clone)]
pub struct NavigationState {
    stack: Vec<Frame>,
    selected_index: usize,
    pub mode: Mode,
}

impl NavigationState {
    pub fn new(root: Arc<MenuTree>, name: impl Into<String>) -> Self {
        Self {
            stack: vec![Frame {
                menu: root,
                name: name.into(),
            }],
            selected_index: 0,
            mode: Mode::Browsing,
        }
    }

    /// Back to a single root frame with the cursor on the first entry.
    pub fn reset(&mut self, root: Arc<MenuTree>, name: impl Into<String>) {
        *self = Self::new(root, name);
    }

    pub fn push(&mut self, menu: Arc<MenuTree>, name: impl Into<String>) {
        self.stack.push(Frame {
            menu,
            name: name.into(),
        });
        self.selected_index = 0;
    }

    /// Pop the top frame. The root frame stays; returns whether anything popped.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        self.selected_index = 0;
        true
    }

    /// Move the cursor by `delta`, wrapping at both ends.
    pub fn move_selection(&mut self, delta: isize) {
        let count = self.current_menu().len();
        if count == 0 {
            return;
        }
        let next = (self.selected_index as isize + delta).rem_euclid(count as isize);
        self.selected_index = next as usize;
    }

    pub fn current_menu(&self) -> &MenuTree {
        &self.top().menu
    }

    pub fn selected_node(&self) -> Option<&MenuNode> {
        self.current_menu().get(self.selected_index)
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.stack
    }

    fn top(&self) -> &Frame {
        // The constructor seeds a root frame and pop() never removes it.
        &self.stack[self.stack.len() - 1]
    }
}

/// Custom text derived from the stack and selected index.
pub type StackFn = Arc<dyn Fn(&[Frame], usize) -> String + Send + Sync>;

/// How the stack is shown above the menu.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breadcrumbs {
    /// `Main Menu > Settings > Network`
    #[default]
    Line,
    /// One frame per line, indented with `└─`.
    Tree,
    #[serde(skip)]
    Custom(StackFn),
}

impl Breadcrumbs {
    pub fn render(&self, frames: &[Frame], selected_index: usize) -> String {
        match self {
            Breadcrumbs::Line => frames
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(" > "),
            Breadcrumbs::Tree => frames
                .iter()
                .enumerate()
                .map(|(i, f)| {
                    if i == 0 {
                        f.name.clone()
                    } else {
                        format!("{}└─ {}", "  ".repeat(i), f.name)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Breadcrumbs::Custom(render) => render(frames, selected_index),
        }
    }
}

impl fmt::Debug for Breadcrumbs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breadcrumbs::Line => f.write_str("Line"),
            Breadcrumbs::Tree => f.write_str("Tree"),
            Breadcrumbs::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for Breadcrumbs {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Breadcrumbs::Line, Breadcrumbs::Line) | (Breadcrumbs::Tree, Breadcrumbs::Tree) => true,
            (Breadcrumbs::Custom(a), Breadcrumbs::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Optional line shown under the breadcrumbs.
#[derive(Clone)]
pub enum Information {
    Static(String),
    Custom(StackFn),
}

impl Information {
    pub fn text(&self, frames: &[Frame], selected_index: usize) -> String {
        match self {
            Information::Static(text) => text.clone(),
            Information::Custom(render) => render(frames, selected_index),
        }
    }
}

impl fmt::Debug for Information {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Information::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Information::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
