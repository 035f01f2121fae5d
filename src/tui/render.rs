//! # Renderer
//!
//! Pure projection of `NavigationState` + config into a `ratatui` [`Text`].
//! Nothing here writes to the terminal, and the same state always produces
//! the same frame.
//!
//! ```text
//! logo
//! instructions            (mode-specific)
//!
//! breadcrumbs
//!
//! information             (optional)
//! body                    (menu entries | description | running action)
//! ```
//!
//! With `show_interface = false` only the body is produced.

use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

use crate::core::config::MenuConfig;
use crate::core::state::{Frame, Mode, NavigationState};
use crate::tui::theme::{Palette, Role};

pub struct Renderer<'a> {
    config: &'a MenuConfig,
    palette: &'a Palette,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a MenuConfig, palette: &'a Palette) -> Self {
        Self { config, palette }
    }

    /// The standard frame for the state's current mode.
    pub fn frame(&self, state: &NavigationState) -> Text<'static> {
        match state.mode {
            Mode::ShowingDescription => self.description(state),
            _ => self.browsing(state),
        }
    }

    pub fn browsing(&self, state: &NavigationState) -> Text<'static> {
        let mut lines = self.chrome(
            &self.config.lang.instructions,
            state.frames(),
            state.selected_index(),
        );
        let lang = &self.config.lang;
        let active = &lang.menu_active_indicator;
        let indent = " ".repeat(active.width() + 1);

        for (i, node) in state.current_menu().iter().enumerate() {
            let label = if node.is_submenu() {
                format!("{} {}", node.key, lang.submenu_indicator)
            } else {
                node.key.clone()
            };
            let line = if i == state.selected_index() {
                self.styled(format!("{active} {label}"), Role::MenuElementActive)
            } else {
                self.styled(format!("{indent}{label}"), Role::MenuElement)
            };
            lines.push(line);
        }
        Text::from(lines)
    }

    pub fn description(&self, state: &NavigationState) -> Text<'static> {
        let mut lines = self.chrome(
            &self.config.lang.return_message,
            state.frames(),
            state.selected_index(),
        );
        if let Some(node) = state.selected_node() {
            lines.push(Line::from(node.key.clone()));
            let text = node
                .description
                .clone()
                .unwrap_or_else(|| self.config.lang.no_description.clone());
            lines.extend(self.styled_lines(&text, Role::Description));
        } else {
            lines.push(self.styled(self.config.lang.no_description.clone(), Role::Description));
        }
        Text::from(lines)
    }

    /// Header shown while an action runs.
    pub fn running(&self, state: &NavigationState, action_id: &str) -> Text<'static> {
        let mut lines = self.chrome(
            &self.config.lang.wait_run,
            state.frames(),
            state.selected_index(),
        );
        lines.push(self.styled(
            format!("{} {}:", self.config.lang.executing_action, action_id),
            Role::Executing,
        ));
        Text::from(lines)
    }

    /// Header shown above a question sequence. `frames` gives breadcrumb context.
    pub fn questions(&self, instructions: &str, frames: &[Frame]) -> Text<'static> {
        Text::from(self.chrome(instructions, frames, 0))
    }

    pub fn action_not_found(&self) -> Text<'static> {
        Text::from(self.styled(self.config.lang.function_not_found.clone(), Role::FunctionNotFound))
    }

    pub fn press_any_key(&self) -> Text<'static> {
        Text::from(vec![
            Line::default(),
            self.styled(self.config.lang.press_any_key.clone(), Role::PressAnyKey),
        ])
    }

    /// Prompt written before the user's answer, on the same line.
    pub fn question_prompt(&self, text: &str) -> Line<'static> {
        self.styled(format!("{text} "), Role::Question)
    }

    fn chrome(
        &self,
        instructions: &str,
        frames: &[Frame],
        selected_index: usize,
    ) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if !self.config.show_interface {
            return lines;
        }

        if let Some(logo) = &self.config.logo {
            lines.extend(self.styled_lines(&logo.text(), Role::Logo));
        }

        lines.extend(self.styled_lines(instructions, Role::Instructions));
        lines.push(Line::default());

        let crumbs = self.config.breadcrumbs.render(frames, selected_index);
        lines.extend(self.styled_lines(&crumbs, Role::Breadcrumbs));
        lines.push(Line::default());

        let information = match &self.config.information {
            Some(info) => info.text(frames, selected_index),
            None => self.config.lang.information.clone(),
        };
        if !information.is_empty() {
            lines.extend(self.styled_lines(&information, Role::Information));
            lines.push(Line::default());
        }
        lines
    }

    fn styled(&self, text: String, role: Role) -> Line<'static> {
        Line::from(Span::styled(text, self.palette.style(role)))
    }

    fn styled_lines(&self, text: &str, role: Role) -> Vec<Line<'static>> {
        text.lines()
            .map(|l| self.styled(l.to_string(), role))
            .collect()
    }
}

/// Flatten a frame to plain strings, one per line.
pub fn plain_lines(text: &Text<'_>) -> Vec<String> {
    text.lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Logo;
    use crate::core::state::{Breadcrumbs, Information};
    use crate::core::tree::NodeKind;
    use crate::test_support::sample_config;
    use std::sync::Arc;

    fn state_for(config: &MenuConfig) -> NavigationState {
        NavigationState::new(Arc::new(config.menu.clone()), config.lang.main_menu.clone())
    }

    #[test]
    fn test_browsing_frame_layout() {
        let config = sample_config();
        let palette = Palette::default();
        let state = state_for(&config);
        let lines = plain_lines(&Renderer::new(&config, &palette).browsing(&state));

        assert_eq!(
            lines,
            vec![
                "YOUR LOGO HERE",
                config.lang.instructions.as_str(),
                "",
                "Main Menu",
                "",
                "> Option 1 ▶",
                "  Option 2",
                "  Close Menu",
                "  Exit",
            ]
        );
    }

    #[test]
    fn test_active_entry_uses_active_style() {
        let config = sample_config();
        let palette = Palette::default();
        let mut state = state_for(&config);
        state.move_selection(1);
        let text = Renderer::new(&config, &palette).browsing(&state);
        let option2 = text
            .lines
            .iter()
            .find(|l| l.spans.iter().any(|s| s.content.contains("Option 2")))
            .unwrap();
        assert_eq!(option2.spans[0].style, palette.style(Role::MenuElementActive));
        assert_eq!(text.lines[5].spans[0].style, palette.style(Role::MenuElement));
    }

    #[test]
    fn test_wide_active_indicator_keeps_entries_aligned() {
        let mut config = sample_config();
        config.lang.menu_active_indicator = "=>".into();
        let palette = Palette::default();
        let state = state_for(&config);
        let lines = plain_lines(&Renderer::new(&config, &palette).browsing(&state));
        assert!(lines.contains(&"=> Option 1 ▶".to_string()));
        assert!(lines.contains(&"   Option 2".to_string()));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let config = sample_config();
        let palette = Palette::default();
        let state = state_for(&config);
        let renderer = Renderer::new(&config, &palette);
        assert_eq!(renderer.frame(&state), renderer.frame(&state));
    }

    #[test]
    fn test_description_and_fallback() {
        let config = sample_config();
        let palette = Palette::default();
        let renderer = Renderer::new(&config, &palette);
        let mut state = state_for(&config);
        state.mode = Mode::ShowingDescription;

        let lines = plain_lines(&renderer.frame(&state));
        assert_eq!(lines[1], config.lang.return_message);
        assert_eq!(&lines[lines.len() - 2..], ["Option 1", "This is an explanation for Option 1."]);

        // "Close Menu" has no description
        state.move_selection(2);
        let lines = plain_lines(&renderer.frame(&state));
        assert_eq!(lines.last().unwrap(), &config.lang.no_description);
    }

    #[test]
    fn test_tree_breadcrumbs_and_information() {
        let mut config = sample_config();
        config.breadcrumbs = Breadcrumbs::Tree;
        config.information = Some(Information::Custom(Arc::new(|frames: &[Frame], i: usize| {
            format!("depth {} index {}", frames.len(), i)
        })));
        let palette = Palette::default();
        let mut state = state_for(&config);
        let sub = match &state.current_menu().get(0).unwrap().kind {
            NodeKind::Submenu(sub) => sub.clone(),
            _ => unreachable!(),
        };
        state.push(sub, "Option 1");
        state.move_selection(1);

        let lines = plain_lines(&Renderer::new(&config, &palette).browsing(&state));
        assert_eq!(&lines[3..8], ["Main Menu", "  └─ Option 1", "", "depth 2 index 1", ""]);
    }

    #[test]
    fn test_logo_producer_is_called() {
        let mut config = sample_config();
        config.logo = Some(Logo::Producer(Arc::new(|| "line one\nline two".to_string())));
        let palette = Palette::default();
        let state = state_for(&config);
        let lines = plain_lines(&Renderer::new(&config, &palette).browsing(&state));
        assert_eq!(&lines[..2], ["line one", "line two"]);
    }

    #[test]
    fn test_hidden_interface_renders_body_only() {
        let mut config = sample_config();
        config.show_interface = false;
        let palette = Palette::default();
        let state = state_for(&config);
        let renderer = Renderer::new(&config, &palette);
        let lines = plain_lines(&renderer.browsing(&state));
        assert_eq!(lines[0], "> Option 1 ▶");
        assert_eq!(lines.len(), 4);
        assert_eq!(plain_lines(&renderer.running(&state, "x")), ["Executing x:"]);
    }

    #[test]
    fn test_running_frame() {
        let config = sample_config();
        let palette = Palette::default();
        let state = state_for(&config);
        let lines = plain_lines(&Renderer::new(&config, &palette).running(&state, "progress_bar_test"));
        assert_eq!(lines[1], config.lang.wait_run);
        assert_eq!(lines.last().unwrap(), "Executing progress_bar_test:");
    }

    #[test]
    fn test_empty_menu_renders_chrome_only() {
        let config = MenuConfig::default();
        let palette = Palette::default();
        let state = state_for(&config);
        let lines = plain_lines(&Renderer::new(&config, &palette).browsing(&state));
        assert_eq!(lines, vec![config.lang.instructions.clone(), String::new(), "Main Menu".into(), String::new()]);
    }
}
