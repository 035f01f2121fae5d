//! # TUI Adapter
//!
//! The terminal-facing layer and the [`MenuCli`] orchestrator that ties the
//! pieces together.
//!
//! ## Event Flow
//!
//! Everything runs on one task, one event at a time:
//!
//! ```text
//! Terminal::next_key ──► dispatch(mode, key) ──► Command
//!                                                  │
//!          ┌───────────────┬───────────────────────┼─────────────────┐
//!          ▼               ▼                       ▼                 ▼
//!   move / back /    resolve selection ──► QuestionSequencer ──► ActionInvoker
//!   description            │                                         │
//!          │               ▼                                         ▼
//!          └──────► Renderer ──► Terminal::draw        ActionResult (reload / exit / continue)
//! ```
//!
//! While questions are being asked or an action runs, those components read
//! keys themselves; the dispatcher's mode gating keeps menu keys inert.
//! Ctrl+C is honored everywhere and ends the session as `Interrupted`.

mod dispatch;
pub mod event;
mod invoker;
mod questions;
pub mod render;
pub mod terminal;
pub mod theme;

use log::{debug, info};
use std::fmt;
use std::io;
use std::sync::Arc;

use crate::core::action::{ActionError, ActionResult, Answers};
use crate::core::config::{ConfigError, ConfigSource, MenuConfig, Question};
use crate::core::state::{Frame, Mode, NavigationState};
use crate::core::tree::{Directive, NodeKind};
use crate::tui::dispatch::{Command, dispatch};
use crate::tui::event::KeyInput;
use crate::tui::invoker::ActionInvoker;
use crate::tui::questions::QuestionSequencer;
use crate::tui::render::Renderer;
use crate::tui::terminal::{CrosstermTerminal, Terminal};
use crate::tui::theme::Palette;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// A `close_menu` entry or an `exitMenu` result. The process carries on.
    MenuClosed,
    /// An `exit` entry or an `exitProgram` result.
    ExitProgram,
    /// Ctrl+C.
    Interrupted,
}

#[derive(Debug)]
pub enum MenuError {
    Config(ConfigError),
    /// An action callback failed. Not recovered.
    Action { id: String, source: ActionError },
    Io(io::Error),
    /// Ctrl+C; turned into `SessionEnd::Interrupted` by [`MenuCli::run`].
    Interrupted,
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuError::Config(e) => write!(f, "{e}"),
            MenuError::Action { id, source } => write!(f, "action '{id}' failed: {source}"),
            MenuError::Io(e) => write!(f, "terminal error: {e}"),
            MenuError::Interrupted => write!(f, "interrupted"),
        }
    }
}

impl std::error::Error for MenuError {}

impl From<ConfigError> for MenuError {
    fn from(e: ConfigError) -> Self {
        MenuError::Config(e)
    }
}

impl From<io::Error> for MenuError {
    fn from(e: io::Error) -> Self {
        MenuError::Io(e)
    }
}

pub struct MenuCli<T: Terminal> {
    source: ConfigSource,
    config: MenuConfig,
    palette: Palette,
    state: NavigationState,
    terminal: T,
}

impl MenuCli<CrosstermTerminal> {
    /// Run a session on the real terminal.
    ///
    /// Returns when the menu is closed. On `exit` or Ctrl+C the terminal is
    /// restored and the process exits with status 0.
    pub async fn start(source: impl Into<ConfigSource>) -> Result<(), MenuError> {
        let mut cli = MenuCli::with_terminal(source, CrosstermTerminal::new()?)?;
        let end = cli.run().await;
        // Restores cooked mode before anything else is printed.
        drop(cli);
        match end? {
            SessionEnd::MenuClosed => Ok(()),
            SessionEnd::ExitProgram | SessionEnd::Interrupted => std::process::exit(0),
        }
    }
}

impl<T: Terminal> MenuCli<T> {
    pub fn with_terminal(source: impl Into<ConfigSource>, terminal: T) -> Result<Self, MenuError> {
        let source = source.into();
        let config = source.load()?;
        let palette = Palette::from_overrides(&config.colors);
        let state = NavigationState::new(Arc::new(config.menu.clone()), config.lang.main_menu.clone());
        Ok(Self {
            source,
            config,
            palette,
            state,
            terminal,
        })
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Drive the session until it ends. Action failures and terminal errors
    /// are returned; the terminal is torn down either way.
    pub async fn run(&mut self) -> Result<SessionEnd, MenuError> {
        info!("Menu session starting");
        let outcome = self.session().await;
        self.state.mode = Mode::Exited;
        self.terminal.teardown()?;
        info!("Menu session ended: {:?}", outcome);
        match outcome {
            Err(MenuError::Interrupted) => Ok(SessionEnd::Interrupted),
            other => other,
        }
    }

    async fn session(&mut self) -> Result<SessionEnd, MenuError> {
        let mut pending = self.begin(true).await?;
        loop {
            if let Some(result) = pending.take() {
                match result {
                    ActionResult::Continue => {
                        if self.config.show_interface {
                            self.redraw()?;
                        }
                    }
                    ActionResult::ReloadMenu => {
                        self.reload()?;
                        if self.config.show_interface {
                            self.redraw()?;
                        }
                    }
                    ActionResult::ReloadSetup => {
                        self.reload()?;
                        pending = self.begin(self.config.show_interface).await?;
                        continue;
                    }
                    ActionResult::ExitMenu => return Ok(SessionEnd::MenuClosed),
                    ActionResult::ExitProgram => return Ok(SessionEnd::ExitProgram),
                }
            }
            let key = self.terminal.next_key().await?;
            pending = self.handle_key(key).await?;
        }
    }

    /// Run setup if configured, then show the menu when `draw` is set.
    ///
    /// The setup action runs without the executing frame and the gate.
    async fn begin(&mut self, draw: bool) -> Result<Option<ActionResult>, MenuError> {
        if let Some(setup) = self.config.setup.clone() {
            let frames = [Frame {
                menu: Arc::new(self.config.menu.clone()),
                name: setup.name.clone(),
            }];
            let instructions = self.config.lang.setup_instructions.clone();
            let result = self
                .ask_and_invoke(&setup.questions, &setup.action, &frames, &instructions, false)
                .await?;
            if result != ActionResult::Continue {
                return Ok(Some(result));
            }
        }
        if draw {
            self.redraw()?;
        }
        Ok(None)
    }

    fn reload(&mut self) -> Result<(), MenuError> {
        self.config = self.source.load()?;
        self.palette = Palette::from_overrides(&self.config.colors);
        self.state
            .reset(Arc::new(self.config.menu.clone()), self.config.lang.main_menu.clone());
        info!("Menu reloaded ({} root entries)", self.config.menu.len());
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), MenuError> {
        let frame = Renderer::new(&self.config, &self.palette).frame(&self.state);
        self.terminal.draw(&frame)?;
        Ok(())
    }

    async fn handle_key(&mut self, key: KeyInput) -> Result<Option<ActionResult>, MenuError> {
        let command = dispatch(self.state.mode, key);
        debug!("{:?} in {:?} → {:?}", key, self.state.mode, command);
        match command {
            Command::Interrupt => return Err(MenuError::Interrupted),
            Command::Ignore => {}
            Command::MoveSelection(delta) => {
                self.state.move_selection(delta);
                self.redraw()?;
            }
            Command::Select => return self.resolve_selection().await,
            Command::ShowDescription => {
                if self.state.selected_node().is_some() {
                    self.state.mode = Mode::ShowingDescription;
                    self.redraw()?;
                }
            }
            Command::HideDescription => {
                self.state.mode = Mode::Browsing;
                self.redraw()?;
            }
            Command::Back => {
                if self.state.pop() {
                    self.redraw()?;
                }
            }
        }
        Ok(None)
    }

    async fn resolve_selection(&mut self) -> Result<Option<ActionResult>, MenuError> {
        let Some(node) = self.state.selected_node().cloned() else {
            return Ok(None);
        };
        debug!("Selected '{}'", node.key);

        match node.kind {
            NodeKind::Directive(Directive::Exit) => Ok(Some(ActionResult::ExitProgram)),
            NodeKind::Directive(Directive::CloseMenu) => Ok(Some(ActionResult::ExitMenu)),
            NodeKind::Directive(Directive::Back) => {
                if self.state.pop() {
                    self.redraw()?;
                }
                Ok(None)
            }
            NodeKind::QuestionedAction { action, questions } => {
                let mut frames = self.state.frames().to_vec();
                frames.push(Frame {
                    menu: Arc::new(self.state.current_menu().clone()),
                    name: node.key.clone(),
                });
                let instructions = self.config.lang.questions_instructions.clone();
                let show = self.config.show_interface;
                let result = self
                    .ask_and_invoke(&questions, &action, &frames, &instructions, show)
                    .await?;
                Ok(Some(result))
            }
            NodeKind::Action(action) => {
                let show = self.config.show_interface;
                let result = self.invoke(&action, Answers::new(), show).await?;
                Ok(Some(result))
            }
            NodeKind::Submenu(menu) => {
                self.state.push(menu, node.key);
                self.redraw()?;
                Ok(None)
            }
        }
    }

    async fn ask_and_invoke(
        &mut self,
        questions: &[Question],
        action: &str,
        frames: &[Frame],
        instructions: &str,
        show_running: bool,
    ) -> Result<ActionResult, MenuError> {
        self.state.mode = Mode::AskingQuestions;
        let renderer = Renderer::new(&self.config, &self.palette);
        if self.config.show_interface {
            self.terminal.draw(&renderer.questions(instructions, frames))?;
        }
        let answers = QuestionSequencer::new(&mut self.terminal, &renderer)
            .ask(questions)
            .await?;
        self.invoke(action, answers, show_running).await
    }

    /// `show_running` draws the executing frame and waits on the gate afterwards.
    async fn invoke(
        &mut self,
        action: &str,
        answers: Answers,
        show_running: bool,
    ) -> Result<ActionResult, MenuError> {
        let renderer = Renderer::new(&self.config, &self.palette);
        ActionInvoker::new(&mut self.terminal, &renderer, &self.config.actions, show_running)
            .invoke(&mut self.state, action, answers)
            .await
    }
}
