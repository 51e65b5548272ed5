//! Terminal session lifecycle

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Raw mode, alternate screen and mouse capture for as long as it lives
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, EnableMouseCapture, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        log::debug!("Terminal in raw mode");
        Ok(Self { active: true })
    }

    /// Current size in character cells
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Restore the terminal; also runs on drop
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut out = io::stdout();
        execute!(out, DisableMouseCapture, cursor::Show, LeaveAlternateScreen)?;
        out.flush()?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}
