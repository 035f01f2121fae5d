//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use ratatui::text::{Line, Text};
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use crate::core::action::{ActionRegistry, ActionResult, Answers};
use crate::core::config::{Logo, MenuConfig, parse_config};
use crate::core::tree::MenuTree;
use crate::tui::event::KeyInput;
use crate::tui::render::plain_lines;
use crate::tui::terminal::Terminal;

/// A terminal fed from a fixed key script that records what was drawn.
pub struct ScriptedTerminal {
    keys: VecDeque<KeyInput>,
    /// Plain text of every `draw` call, in order.
    pub frames: Vec<Vec<String>>,
    /// Current screen contents; the last entry is the line being written.
    lines: Vec<String>,
    pub cursor_visible: bool,
    pub torn_down: bool,
}

impl ScriptedTerminal {
    pub fn new(keys: Vec<KeyInput>) -> Self {
        Self {
            keys: keys.into(),
            frames: Vec::new(),
            lines: vec![String::new()],
            cursor_visible: false,
            torn_down: false,
        }
    }

    pub fn keys_left(&self) -> usize {
        self.keys.len()
    }

    pub fn screen(&self) -> Vec<String> {
        self.lines.clone()
    }

    fn current(&mut self) -> &mut String {
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }
}

#[async_trait]
impl Terminal for ScriptedTerminal {
    async fn next_key(&mut self) -> io::Result<KeyInput> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }

    fn draw(&mut self, text: &Text<'_>) -> io::Result<()> {
        let lines = plain_lines(text);
        self.frames.push(lines.clone());
        self.lines = lines;
        self.lines.push(String::new());
        Ok(())
    }

    fn append(&mut self, text: &Text<'_>) -> io::Result<()> {
        for line in plain_lines(text) {
            self.current().push_str(&line);
            self.lines.push(String::new());
        }
        Ok(())
    }

    fn write_inline(&mut self, line: &Line<'_>) -> io::Result<()> {
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        self.current().push_str(&text);
        Ok(())
    }

    fn erase(&mut self, width: usize) -> io::Result<()> {
        for _ in 0..width {
            self.current().pop();
        }
        Ok(())
    }

    fn end_line(&mut self) -> io::Result<()> {
        self.lines.push(String::new());
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn teardown(&mut self) -> io::Result<()> {
        self.lines = vec![String::new()];
        self.cursor_visible = true;
        self.torn_down = true;
        Ok(())
    }
}

/// Keys that type `text` and press Enter.
pub fn typed(text: &str) -> Vec<KeyInput> {
    text.chars()
        .map(|c| if c == ' ' { KeyInput::Space } else { KeyInput::Char(c) })
        .chain(std::iter::once(KeyInput::Enter))
        .collect()
}

/// Register `id` as an action that records its answers and returns `result`.
pub fn record_calls(
    registry: &mut ActionRegistry,
    id: &str,
    result: ActionResult,
) -> Arc<Mutex<Vec<Answers>>> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    registry.register_fn(id, move |answers: Answers| {
        let sink = sink.clone();
        async move {
            sink.lock().unwrap().push(answers);
            Ok(result)
        }
    });
    calls
}

const SAMPLE_MENU: &str = r#"
[[menu]]
key = "Option 1"
description = "This is an explanation for Option 1."

[[menu.submenu]]
key = "Suboption 1.1"
description = "Details about Suboption 1.1"

[[menu.submenu.submenu]]
key = "Sub-suboption 1.1.1"
description = "Details about Sub-suboption 1.1.1"
action = "progress_bar_test"
questions = [
    { id = "q1", text = "Enter value for Q1:" },
    { id = "q2", text = "Enter value for Q2:" },
]

[[menu.submenu.submenu]]
key = "Back"
action = "back"

[[menu.submenu]]
key = "Back"
action = "back"

[[menu]]
key = "Option 2"
description = "This is an explanation for Option 2."
action = "progress_bar_test"

[[menu]]
key = "Close Menu"
action = "close_menu"

[[menu]]
key = "Exit"
description = "Exit the program."
action = "exit"
"#;

/// Option 1 ▶ (Suboption 1.1 ▶ (questions, Back), Back), Option 2, Close Menu, Exit.
pub fn sample_tree() -> MenuTree {
    let file = parse_config(SAMPLE_MENU).unwrap();
    MenuTree::from_raw(&file.menu).unwrap()
}

/// The sample tree with a logo and no registered actions.
pub fn sample_config() -> MenuConfig {
    MenuConfig {
        menu: sample_tree(),
        logo: Some(Logo::Static("YOUR LOGO HERE".into())),
        ..Default::default()
    }
}
