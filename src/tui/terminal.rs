//! # Terminal Capability
//!
//! Everything the engine does to the real terminal goes through the
//! [`Terminal`] trait: reading keys, drawing frames, echoing typed text and
//! toggling cursor visibility. The orchestrator owns one instance; tests
//! swap in a scripted implementation.
//!
//! [`CrosstermTerminal`] enables raw mode and hides the cursor when
//! created. Dropping it restores the terminal, so an early return or a
//! panic never leaves the shell in raw mode.

use async_trait::async_trait;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{Event, EventStream};
use crossterm::style::{Attribute, Color as CColor, ContentStyle, Print, PrintStyledContent};
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use crossterm::{execute, queue};
use futures::StreamExt;
use log::info;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use std::io::{self, Stdout, Write, stdout};

use crate::tui::event::KeyInput;

#[async_trait]
pub trait Terminal: Send {
    /// Wait for the next key press.
    async fn next_key(&mut self) -> io::Result<KeyInput>;

    /// Clear the screen and draw `text` from the top.
    fn draw(&mut self, text: &Text<'_>) -> io::Result<()>;

    /// Write `text` below whatever is on screen.
    fn append(&mut self, text: &Text<'_>) -> io::Result<()>;

    /// Write a fragment on the current line (prompt text, echoed input).
    fn write_inline(&mut self, line: &Line<'_>) -> io::Result<()>;

    /// Erase the last `width` columns of the current line.
    fn erase(&mut self, width: usize) -> io::Result<()>;

    /// Finish the current line.
    fn end_line(&mut self) -> io::Result<()>;

    /// Visible cursor for line editing, hidden for menu navigation.
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Clear the screen and restore the cursor. Called once at session end.
    fn teardown(&mut self) -> io::Result<()>;
}

struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), Hide)?;
        info!("Terminal raw mode enabled, cursor hidden");
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
        let _ = disable_raw_mode();
    }
}

pub struct CrosstermTerminal {
    events: EventStream,
    out: Stdout,
    _guard: RawModeGuard,
}

impl CrosstermTerminal {
    pub fn new() -> io::Result<Self> {
        let guard = RawModeGuard::new()?;
        Ok(Self {
            events: EventStream::new(),
            out: stdout(),
            _guard: guard,
        })
    }

    fn queue_line(&mut self, line: &Line<'_>) -> io::Result<()> {
        for span in &line.spans {
            let style = line.style.patch(span.style);
            queue!(
                self.out,
                PrintStyledContent(content_style(style).apply(span.content.as_ref()))
            )?;
        }
        Ok(())
    }

    fn queue_text(&mut self, text: &Text<'_>) -> io::Result<()> {
        for line in &text.lines {
            self.queue_line(line)?;
            // Raw mode: a bare \n moves down without returning the carriage.
            queue!(self.out, Print("\r\n"))?;
        }
        Ok(())
    }
}

#[async_trait]
impl Terminal for CrosstermTerminal {
    async fn next_key(&mut self) -> io::Result<KeyInput> {
        loop {
            match self.events.next().await {
                Some(Ok(Event::Key(key_event))) => {
                    if let Some(key) = KeyInput::from_key_event(key_event) {
                        return Ok(key);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "terminal input closed",
                    ));
                }
            }
        }
    }

    fn draw(&mut self, text: &Text<'_>) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.queue_text(text)?;
        self.out.flush()
    }

    fn append(&mut self, text: &Text<'_>) -> io::Result<()> {
        self.queue_text(text)?;
        self.out.flush()
    }

    fn write_inline(&mut self, line: &Line<'_>) -> io::Result<()> {
        self.queue_line(line)?;
        self.out.flush()
    }

    fn erase(&mut self, width: usize) -> io::Result<()> {
        for _ in 0..width {
            queue!(self.out, Print("\u{8} \u{8}"))?;
        }
        self.out.flush()
    }

    fn end_line(&mut self) -> io::Result<()> {
        execute!(self.out, Print("\r\n"))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            execute!(self.out, Show)
        } else {
            execute!(self.out, Hide)
        }
    }

    fn teardown(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0), Show)
    }
}

fn content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = style.fg.map(to_crossterm_color);
    content.background_color = style.bg.map(to_crossterm_color);
    for (modifier, attribute) in [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::UNDERLINED, Attribute::Underlined),
        (Modifier::REVERSED, Attribute::Reverse),
    ] {
        if style.add_modifier.contains(modifier) {
            content.attributes.set(attribute);
        }
    }
    content
}

/// ratatui names the 16 ANSI colours differently from crossterm:
/// ratatui `Red` is ANSI 1 (crossterm `DarkRed`), `LightRed` is ANSI 9.
fn to_crossterm_color(color: Color) -> CColor {
    match color {
        Color::Reset => CColor::Reset,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::Gray => CColor::Grey,
        Color::DarkGray => CColor::DarkGrey,
        Color::LightRed => CColor::Red,
        Color::LightGreen => CColor::Green,
        Color::LightYellow => CColor::Yellow,
        Color::LightBlue => CColor::Blue,
        Color::LightMagenta => CColor::Magenta,
        Color::LightCyan => CColor::Cyan,
        Color::White => CColor::White,
        Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
        Color::Indexed(i) => CColor::AnsiValue(i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_colour_mapping() {
        assert_eq!(to_crossterm_color(Color::Red), CColor::DarkRed);
        assert_eq!(to_crossterm_color(Color::LightRed), CColor::Red);
        assert_eq!(to_crossterm_color(Color::DarkGray), CColor::DarkGrey);
        assert_eq!(
            to_crossterm_color(Color::Rgb(1, 2, 3)),
            CColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn test_content_style_carries_modifiers() {
        let style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
        let content = content_style(style);
        assert_eq!(content.foreground_color, Some(CColor::DarkBlue));
        assert!(content.attributes.has(Attribute::Bold));
        assert!(!content.attributes.has(Attribute::Italic));
    }
}
