//! Puts a [`ScreenBuffer`] on a real terminal.
//!
//! Every frame is a full redraw: cursor home, one queued line per row, one
//! flush.  No diffing against the previous frame.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::Print,
    terminal::{self, ClearType},
};

use super::ScreenBuffer;

/// Write the grid as plain text, one `\n`-terminated line per row.
pub fn write_frame<W: Write>(frame: &ScreenBuffer, out: &mut W) -> io::Result<()> {
    let mut line = String::with_capacity(frame.width());
    for y in 0..frame.height() {
        line.clear();
        line.extend(frame.row(y));
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }
    out.flush()
}

/// Full-screen presenter on the alternate screen.
pub struct TerminalDisplay<W: Write = io::Stdout> {
    out: W,
    line: String,
    active: bool,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line: String::new(),
            active: false,
        }
    }

    /// Switch to raw mode and the alternate screen, hide the cursor.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.out.flush()?;
        self.active = true;
        Ok(())
    }

    /// Undo [`enter`](Self::enter).  Safe to call twice.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.out.flush()?;
        terminal::disable_raw_mode()
    }

    /// Draw `frame` from the top-left corner followed by `status` on the
    /// row below it.  Flushes once.
    pub fn present(&mut self, frame: &ScreenBuffer, status: &str) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        for y in 0..frame.height() {
            self.line.clear();
            self.line.extend(frame.row(y));
            self.out.queue(cursor::MoveTo(0, row(y)))?;
            self.out.queue(Print(&self.line))?;
        }
        self.out.queue(cursor::MoveTo(0, row(frame.height())))?;
        self.out.queue(terminal::Clear(ClearType::CurrentLine))?;
        self.out.queue(Print(status))?;
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalDisplay<W> {
    fn drop(&mut self) {
        // Never leave the user's terminal in raw mode.
        let _ = self.leave();
    }
}

#[inline]
fn row(y: usize) -> u16 {
    u16::try_from(y).unwrap_or(u16::MAX)
}
