use async_trait::async_trait;
use menu_cli::core::config::parse_config;
use menu_cli::tui::event::KeyInput;
use menu_cli::tui::render::plain_lines;
use menu_cli::tui::terminal::Terminal;
use menu_cli::{ActionRegistry, ActionResult, Answers, MenuCli, MenuConfig, SessionEnd};
use ratatui::text::{Line, Text};
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

// ============================================================================
// Helper Types
// ============================================================================

/// Replays a fixed key script and keeps the last drawn frame.
struct Replay {
    keys: VecDeque<KeyInput>,
    last_frame: Vec<String>,
    draws: usize,
}

impl Replay {
    fn new(keys: impl IntoIterator<Item = KeyInput>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            last_frame: Vec::new(),
            draws: 0,
        }
    }
}

#[async_trait]
impl Terminal for Replay {
    async fn next_key(&mut self) -> io::Result<KeyInput> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn draw(&mut self, text: &Text<'_>) -> io::Result<()> {
        self.last_frame = plain_lines(text);
        self.draws += 1;
        Ok(())
    }

    fn append(&mut self, _text: &Text<'_>) -> io::Result<()> {
        Ok(())
    }

    fn write_inline(&mut self, _line: &Line<'_>) -> io::Result<()> {
        Ok(())
    }

    fn erase(&mut self, _width: usize) -> io::Result<()> {
        Ok(())
    }

    fn end_line(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn set_cursor_visible(&mut self, _visible: bool) -> io::Result<()> {
        Ok(())
    }

    fn teardown(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const MENU: &str = r#"
logo = "ACME"
breadcrumbs = "tree"

[lang]
mainMenu = "Home"
submenuIndicator = ">>"
menuActiveIndicator = "*"

[[menu]]
key = "Deploy"
description = "Ship it."
action = "deploy"
questions = [
    { id = "env", text = "Environment?" },
    { id = "region", text = "Region?", value = "eu-west-1" },
]

[[menu]]
key = "Tools"

[[menu.submenu]]
key = "Status"
action = "status"

[[menu.submenu]]
key = "Back"
action = "back"

[[menu]]
key = "Quit"
action = "exit"
"#;

fn config(deploys: Arc<Mutex<Vec<Answers>>>, status_result: ActionResult) -> MenuConfig {
    let mut actions = ActionRegistry::new();
    actions
        .register_fn("deploy", move |answers: Answers| {
            let deploys = deploys.clone();
            async move {
                deploys.lock().unwrap().push(answers);
                Ok(ActionResult::Continue)
            }
        })
        .register_fn("status", move |_| async move { Ok(status_result) });
    MenuConfig::from_file(parse_config(MENU).unwrap(), actions).unwrap()
}

fn typed(text: &str) -> Vec<KeyInput> {
    text.chars()
        .map(KeyInput::Char)
        .chain(std::iter::once(KeyInput::Enter))
        .collect()
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_questioned_action_then_quit() {
    let deploys = Arc::new(Mutex::new(Vec::new()));
    let mut keys = vec![KeyInput::Enter];
    keys.extend(typed("prod"));
    keys.extend([KeyInput::Other, KeyInput::Up, KeyInput::Enter]);

    let mut cli = MenuCli::with_terminal(
        config(deploys.clone(), ActionResult::Continue),
        Replay::new(keys),
    )
    .unwrap();

    assert_eq!(cli.run().await.unwrap(), SessionEnd::ExitProgram);

    let deploys = deploys.lock().unwrap();
    assert_eq!(deploys.len(), 1);
    assert_eq!(deploys[0]["env"], "prod");
    assert_eq!(deploys[0]["region"], "eu-west-1");
}

#[tokio::test]
async fn test_submenu_rendering_uses_lang_and_tree_crumbs() {
    let deploys = Arc::new(Mutex::new(Vec::new()));
    let keys = [KeyInput::Down, KeyInput::Enter, KeyInput::Interrupt];
    let mut cli =
        MenuCli::with_terminal(config(deploys, ActionResult::Continue), Replay::new(keys))
            .unwrap();

    assert_eq!(cli.run().await.unwrap(), SessionEnd::Interrupted);
    assert_eq!(cli.state().depth(), 2);

    let frame = &cli.terminal().last_frame;
    assert_eq!(frame[0], "ACME");
    assert!(frame.contains(&"Home".to_string()));
    assert!(frame.contains(&"  └─ Tools".to_string()));
    assert!(frame.contains(&"* Status".to_string()));
    assert!(frame.contains(&"  Back".to_string()));
}

#[tokio::test]
async fn test_action_can_close_the_menu() {
    let deploys = Arc::new(Mutex::new(Vec::new()));
    let keys = [
        KeyInput::Down,
        KeyInput::Enter,
        KeyInput::Enter,
        KeyInput::Other,
    ];
    let mut cli =
        MenuCli::with_terminal(config(deploys, ActionResult::ExitMenu), Replay::new(keys))
            .unwrap();

    assert_eq!(cli.run().await.unwrap(), SessionEnd::MenuClosed);
}

#[tokio::test]
async fn test_root_menu_marks_submenus() {
    let deploys = Arc::new(Mutex::new(Vec::new()));
    let mut cli = MenuCli::with_terminal(
        config(deploys, ActionResult::Continue),
        Replay::new([KeyInput::Interrupt]),
    )
    .unwrap();

    cli.run().await.unwrap();
    let frame = &cli.terminal().last_frame;
    assert!(frame.contains(&"* Deploy".to_string()));
    assert!(frame.contains(&"  Tools >>".to_string()));
    assert_eq!(cli.terminal().draws, 1);
}
