use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::{Buffer, Color, Style};

/// Raw-mode terminal with the alternate screen and mouse capture enabled.
///
/// Restores the terminal on drop.
pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        // no Terminal exists yet to restore raw mode on drop
        undo_on_error(
            execute!(
                stdout,
                terminal::EnterAlternateScreen,
                cursor::Hide,
                event::EnableMouseCapture
            ),
            || {
                let _ = terminal::disable_raw_mode();
            },
        )?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for input, then drain whatever else is pending.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }
        Ok(events)
    }

    /// Write every line of `buffer` to the screen.
    pub fn draw(&mut self, buffer: &Buffer) -> io::Result<()> {
        for (y, line) in buffer.lines().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y as u16),
                terminal::Clear(terminal::ClearType::CurrentLine)
            )?;
            for span in line {
                apply_style(&mut self.stdout, span.style)?;
                queue!(self.stdout, Print(&span.text))?;
                queue!(self.stdout, SetAttribute(Attribute::Reset))?;
            }
        }
        self.stdout.flush()
    }
}

fn color(color: Color) -> CtColor {
    match color {
        Color::Accent => CtColor::Cyan,
        Color::Muted => CtColor::DarkGrey,
        Color::Danger => CtColor::Red,
        Color::Highlight => CtColor::DarkBlue,
    }
}

fn apply_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(color(fg)))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(color(bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Run `undo` if `result` failed, then pass it on.
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}
