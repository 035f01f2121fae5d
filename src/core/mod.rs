//! # Core Menu Logic
//!
//! Pure data and state transitions. Nothing in here touches the terminal.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • MenuConfig / tree    │
//!                    │  • NavigationState      │
//!                    │  • Actions + registry   │
//!                    │                         │
//!                    │  No terminal I/O.       │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │(crossterm) │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: config document, string dictionary, loading, `ConfigError`
//! - [`tree`]: the resolved node hierarchy
//! - [`state`]: `NavigationState`, `Mode`, breadcrumbs
//! - [`action`]: the `MenuAction` trait, registry and `ActionResult`
//! - [`command`]: shell-command actions for config-file menus

pub mod action;
pub mod command;
pub mod config;
pub mod state;
pub mod tree;

pub use action::{ActionError, ActionRegistry, ActionResult, Answers, MenuAction};
pub use config::{ConfigError, ConfigSource, MenuConfig};
pub use state::{Mode, NavigationState};
pub use tree::{Directive, MenuNode, MenuTree, NodeKind};
