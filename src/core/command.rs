//! # Command Actions
//!
//! Actions declared in the config file run as shell commands:
//!
//! ```toml
//! [actions.greet]
//! command = "echo Hello, $MENU_ANSWER_NAME"
//! ```
//!
//! Each answer is exported as `MENU_ANSWER_<ID>` and the whole set as JSON
//! in `MENU_ANSWERS`. Output is echoed to the terminal. If the last
//! non-empty stdout line is a reserved token (`reloadMenu`, `reloadSetup`,
//! `exitMenu`, `exitProgram`) it becomes the action's result and is not echoed.

use async_trait::async_trait;
use log::{debug, info};
use std::collections::BTreeMap;
use std::io::Write;
use std::process::Stdio;
use tokio::process::Command;

use crate::core::action::{ActionError, ActionRegistry, ActionResult, Answers, MenuAction};
use crate::core::config::CommandSpec;

pub struct CommandAction {
    command: String,
}

impl CommandAction {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl MenuAction for CommandAction {
    async fn call(&self, answers: Answers) -> Result<ActionResult, ActionError> {
        info!("Running command action: {}", self.command);
        let answers_json = serde_json::to_string(&answers)
            .map_err(|e| ActionError(format!("failed to encode answers: {e}")))?;

        let output = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .envs(
                answers
                    .iter()
                    .map(|(k, v)| (format!("MENU_ANSWER_{}", env_key(k)), v.clone())),
            )
            .env("MENU_ANSWERS", answers_json)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ActionError(format!("failed to run `{}`: {e}", self.command)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let (body, result) = split_result_token(&stdout);
        debug!("Command finished with {:?}, result {:?}", output.status, result);

        echo(body);
        echo(&stderr);

        if !output.status.success() {
            return Err(ActionError(format!(
                "`{}` exited with {}",
                self.command, output.status
            )));
        }
        Ok(result)
    }
}

/// Build a registry from the `[actions]` table of a config file.
pub fn command_registry(specs: &BTreeMap<String, CommandSpec>) -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    for (id, spec) in specs {
        registry.register(id.clone(), CommandAction::new(spec.command.clone()));
    }
    registry
}

/// `answer-id` → `ANSWER_ID`
fn env_key(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Split a trailing result token off the output, if there is one.
fn split_result_token(stdout: &str) -> (&str, ActionResult) {
    let trimmed = stdout.trim_end();
    let (body, last) = match trimmed.rfind('\n') {
        Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
        None => ("", trimmed),
    };
    match ActionResult::from_token(Some(last.trim())) {
        ActionResult::Continue => (stdout, ActionResult::Continue),
        result => (body, result),
    }
}

/// Print captured output. The terminal is in raw mode, so lines need `\r\n`.
fn echo(text: &str) {
    if text.is_empty() {
        return;
    }
    let mut out = std::io::stdout();
    for line in text.lines() {
        let _ = write!(out, "{line}\r\n");
    }
    let _ = out.flush();
}
