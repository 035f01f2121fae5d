//! Keyboard-driven hierarchical terminal menus.
//!
//! Build a [`MenuConfig`] (or load one from TOML), register async actions,
//! and hand it to [`MenuCli::start`].

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    ActionError, ActionRegistry, ActionResult, Answers, ConfigError, ConfigSource, MenuAction,
    MenuConfig,
};
pub use crate::tui::{MenuCli, MenuError, SessionEnd};
