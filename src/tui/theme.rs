//! Text roles and their styles.
//!
//! Every piece of the frame is tagged with a [`Role`]. The [`Palette`] maps
//! roles to `ratatui` styles; the `colors` config table overrides the
//! foreground colour per role.

use log::warn;
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Logo,
    Instructions,
    Breadcrumbs,
    Information,
    MenuElement,
    MenuElementActive,
    Description,
    Question,
    Executing,
    FunctionNotFound,
    PressAnyKey,
}

impl Role {
    /// Parse a `colors` table key.
    pub fn from_name(name: &str) -> Option<Self> {
        let role = match name {
            "logo" => Role::Logo,
            "instructions" => Role::Instructions,
            "breadcrumbs" => Role::Breadcrumbs,
            "information" => Role::Information,
            "menuElement" | "menu_element" => Role::MenuElement,
            "menuElementActive" | "menuElementActiv" | "menu_element_active" => {
                Role::MenuElementActive
            }
            "description" => Role::Description,
            "question" => Role::Question,
            "executing" => Role::Executing,
            "functionNotFound" | "function_not_found" => Role::FunctionNotFound,
            "pressAnyKey" | "press_any_key" => Role::PressAnyKey,
            _ => return None,
        };
        Some(role)
    }

    fn default_style(self) -> Style {
        match self {
            Role::Logo | Role::MenuElement | Role::Executing => Style::new(),
            Role::Instructions => Style::new().fg(Color::DarkGray),
            Role::Breadcrumbs => Style::new().fg(Color::Cyan),
            Role::Information => Style::new().fg(Color::Magenta),
            Role::MenuElementActive => Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
            Role::Description => Style::new().fg(Color::Green),
            Role::Question | Role::PressAnyKey => Style::new().fg(Color::Yellow),
            Role::FunctionNotFound => Style::new().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    overrides: HashMap<Role, Style>,
}

impl Palette {
    /// Build from the `colors` config table. Unknown roles or colours are
    /// logged and skipped.
    pub fn from_overrides(colors: &HashMap<String, String>) -> Self {
        let mut overrides = HashMap::new();
        for (name, value) in colors {
            let Some(role) = Role::from_name(name) else {
                warn!("Unknown color role '{}', ignoring", name);
                continue;
            };
            match Color::from_str(value) {
                Ok(color) => {
                    overrides.insert(role, role.default_style().fg(color));
                }
                Err(_) => warn!("Unknown color '{}' for role '{}', ignoring", value, name),
            }
        }
        Self { overrides }
    }

    pub fn style(&self, role: Role) -> Style {
        self.overrides
            .get(&role)
            .copied()
            .unwrap_or_else(|| role.default_style())
    }
}
