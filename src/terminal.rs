use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing::warn;

/// Owns the terminal while the game runs. Raw mode, the alternate screen and
/// the hidden cursor are undone on drop, including when setup fails halfway.
pub struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self { out };
        guard.out.execute(EnterAlternateScreen)?;
        guard.out.execute(Hide)?;
        Ok(guard)
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(err) = self
            .out
            .execute(Show)
            .and_then(|out| out.execute(LeaveAlternateScreen))
            .map(|_| ())
        {
            warn!(error = %err, "could not restore the screen");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            warn!(error = %err, "could not leave raw mode");
        }
    }
}
