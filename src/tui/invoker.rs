//! # Action Invoker
//!
//! Runs one action to completion:
//!
//! ```text
//! mode = RunningAction
//!   → draw "executing <id>" frame
//!   → registry lookup ── missing ──► print "not found", result = Continue
//!   → call(answers).await            (no timeout, no retry; Err is fatal)
//!     raced against the key stream     (Ctrl+C drops the call)
//!   → "press any key" gate           (one key)
//! mode = Browsing
//! ```
//!
//! With `show_interface = false` the frame and the gate are skipped.

use log::{info, warn};
use std::io;

use crate::core::action::{ActionRegistry, ActionResult, Answers};
use crate::core::state::{Mode, NavigationState};
use crate::tui::MenuError;
use crate::tui::event::KeyInput;
use crate::tui::render::Renderer;
use crate::tui::terminal::Terminal;

pub struct ActionInvoker<'a, T: Terminal> {
    terminal: &'a mut T,
    renderer: &'a Renderer<'a>,
    registry: &'a ActionRegistry,
    show_interface: bool,
}

impl<'a, T: Terminal> ActionInvoker<'a, T> {
    pub fn new(
        terminal: &'a mut T,
        renderer: &'a Renderer<'a>,
        registry: &'a ActionRegistry,
        show_interface: bool,
    ) -> Self {
        Self {
            terminal,
            renderer,
            registry,
            show_interface,
        }
    }

    pub async fn invoke(
        &mut self,
        state: &mut NavigationState,
        action_id: &str,
        answers: Answers,
    ) -> Result<ActionResult, MenuError> {
        state.mode = Mode::RunningAction;
        if self.show_interface {
            self.terminal.draw(&self.renderer.running(state, action_id))?;
        }

        let result = match self.registry.get(action_id) {
            Some(action) => {
                info!("Invoking action '{}' with {} answer(s)", action_id, answers.len());
                let terminal = &mut *self.terminal;
                let interrupted = async move {
                    // Other keys pressed while the action runs are discarded.
                    while terminal.next_key().await? != KeyInput::Interrupt {}
                    Ok::<(), io::Error>(())
                };
                tokio::select! {
                    biased;
                    result = action.call(answers) => result.map_err(|source| MenuError::Action {
                        id: action_id.to_string(),
                        source,
                    })?,
                    watched = interrupted => {
                        watched?;
                        warn!("Action '{}' interrupted", action_id);
                        return Err(MenuError::Interrupted);
                    }
                }
            }
            None => {
                warn!("Action '{}' not found", action_id);
                self.terminal.append(&self.renderer.action_not_found())?;
                ActionResult::Continue
            }
        };
        info!("Action '{}' finished: {:?}", action_id, result);

        if self.show_interface {
            self.terminal.append(&self.renderer.press_any_key())?;
            if self.terminal.next_key().await? == KeyInput::Interrupt {
                return Err(MenuError::Interrupted);
            }
        }

        state.mode = Mode::Browsing;
        Ok(result)
    }
}
