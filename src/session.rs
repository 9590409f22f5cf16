use std::io::{self, BufWriter, Stdout, Write, stdout};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Raw-mode alternate screen for the length of the show. Restored on drop,
/// so an early return or panic still hands back a usable terminal.
pub struct TerminalSession<W: Write> {
    out: W,
    active: bool,
    raw: bool,
}

impl TerminalSession<BufWriter<Stdout>> {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut session = Self {
            out: BufWriter::with_capacity(1024 * 64, stdout()),
            active: true,
            raw: true,
        };
        // A failure here drops the session, which undoes raw mode.
        execute!(session.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(session)
    }
}

impl<W: Write> TerminalSession<W> {
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All))
    }

    /// Leaves the alternate screen. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        execute!(self.out, Show, LeaveAlternateScreen)?;
        if self.raw {
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::warn!("failed to restore terminal: {err}");
        }
    }
}
