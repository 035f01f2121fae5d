//! # Question Sequencer
//!
//! Asks a list of questions in order and collects the answers.
//!
//! Questions with a pre-supplied `value` are recorded without prompting.
//! The rest are read with a small line editor that works on raw key events:
//! characters are echoed as typed, backspace deletes, Enter submits and
//! Ctrl+C aborts the whole session. The cursor is visible while editing and
//! hidden again afterwards, whether the sequence finished or not.

use log::debug;
use ratatui::text::Line;
use unicode_width::UnicodeWidthChar;

use crate::core::action::Answers;
use crate::core::config::Question;
use crate::tui::MenuError;
use crate::tui::event::KeyInput;
use crate::tui::render::Renderer;
use crate::tui::terminal::Terminal;

pub struct QuestionSequencer<'a, T: Terminal> {
    terminal: &'a mut T,
    renderer: &'a Renderer<'a>,
}

impl<'a, T: Terminal> QuestionSequencer<'a, T> {
    pub fn new(terminal: &'a mut T, renderer: &'a Renderer<'a>) -> Self {
        Self { terminal, renderer }
    }

    pub async fn ask(&mut self, questions: &[Question]) -> Result<Answers, MenuError> {
        self.terminal.set_cursor_visible(true)?;
        let result = self.collect(questions).await;
        self.terminal.set_cursor_visible(false)?;
        result
    }

    async fn collect(&mut self, questions: &[Question]) -> Result<Answers, MenuError> {
        let mut answers = Answers::new();
        for question in questions {
            let answer = match &question.value {
                Some(value) => {
                    debug!("Question '{}' pre-supplied", question.id);
                    value.clone()
                }
                None => {
                    self.terminal
                        .write_inline(&self.renderer.question_prompt(&question.text))?;
                    self.read_line().await?
                }
            };
            answers.insert(question.id.clone(), answer);
        }
        Ok(answers)
    }

    async fn read_line(&mut self) -> Result<String, MenuError> {
        let mut buffer = String::new();
        loop {
            match self.terminal.next_key().await? {
                KeyInput::Interrupt => return Err(MenuError::Interrupted),
                KeyInput::Enter => {
                    self.terminal.end_line()?;
                    return Ok(buffer);
                }
                KeyInput::Backspace => {
                    if let Some(c) = buffer.pop() {
                        self.terminal.erase(c.width().unwrap_or(0))?;
                    }
                }
                KeyInput::Space => self.push(&mut buffer, ' ')?,
                KeyInput::Char(c) => self.push(&mut buffer, c)?,
                _ => {}
            }
        }
    }

    fn push(&mut self, buffer: &mut String, c: char) -> Result<(), MenuError> {
        buffer.push(c);
        self.terminal.write_inline(&Line::raw(c.to_string()))?;
        Ok(())
    }
}
