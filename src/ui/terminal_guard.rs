use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear as TermClear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::execute;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout, Write};
use std::sync::{Arc, Mutex};

/// Terminal modes currently switched on. Restoring only undoes what is set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Modes {
    raw: bool,
    alternate_screen: bool,
    mouse_capture: bool,
    cursor_hidden: bool,
}

impl Modes {
    fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    fn set_mouse_capture<W: Write>(&mut self, out: &mut W, enabled: bool) -> io::Result<()> {
        if self.mouse_capture == enabled {
            return Ok(());
        }
        if enabled {
            execute!(out, EnableMouseCapture)?;
        } else {
            execute!(out, DisableMouseCapture)?;
        }
        self.mouse_capture = enabled;
        tracing::debug!(enabled, "mouse capture switched");
        Ok(())
    }

    /// Best effort: a failing step does not stop the remaining ones.
    fn restore<W: Write>(&mut self, out: &mut W, reason: &'static str) {
        if self.is_clean() {
            return;
        }
        tracing::debug!(reason, modes = ?*self, "restoring terminal");
        if self.mouse_capture {
            let _ = execute!(out, DisableMouseCapture);
        }
        if self.alternate_screen {
            let _ = execute!(out, LeaveAlternateScreen);
        }
        if self.cursor_hidden {
            let _ = execute!(out, Show);
        }
        if self.raw {
            let _ = disable_raw_mode();
        }
        *self = Self::default();
    }
}

/// Owns the terminal modes for the life of the demo.
///
/// The landing screen leaves the mouse alone so the terminal's own text
/// selection keeps working; capture is only on while a card flow is on
/// screen (see [`TerminalGuard::follow_presentation`]).
pub struct TerminalGuard {
    modes: Arc<Mutex<Modes>>,
}

impl TerminalGuard {
    fn new() -> Self {
        Self {
            modes: Arc::new(Mutex::new(Modes::default())),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut Modes) -> R) -> Option<R> {
        self.modes.lock().ok().map(|mut modes| f(&mut modes))
    }

    /// Turn mouse capture on while a flow is presented and off otherwise.
    pub fn follow_presentation(&self, presenting: bool) -> io::Result<()> {
        self.update(|modes| modes.set_mouse_capture(&mut io::stdout(), presenting))
            .unwrap_or(Ok(()))
    }

    fn install_panic_hook(&self) {
        let modes = Arc::clone(&self.modes);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if let Ok(mut modes) = modes.lock() {
                modes.restore(&mut io::stdout(), "panic");
            }
            default_hook(info);
        }));
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.update(|modes| modes.restore(&mut io::stdout(), "exit"));
    }
}

/// Raw mode, alternate screen and a hidden cursor. Mouse capture starts off.
pub fn setup_terminal() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, TerminalGuard)> {
    let guard = TerminalGuard::new();
    guard.install_panic_hook();

    enable_raw_mode()?;
    guard.update(|modes| modes.raw = true);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, TermClear(ClearType::All))?;
    guard.update(|modes| modes.alternate_screen = true);
    execute!(stdout, Hide)?;
    guard.update(|modes| modes.cursor_hidden = true);

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    tracing::debug!("terminal set up");
    Ok((terminal, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_capture_is_written_only_on_change() {
        let mut modes = Modes::default();
        let mut out = Vec::new();
        modes.set_mouse_capture(&mut out, false).unwrap();
        assert!(out.is_empty());

        modes.set_mouse_capture(&mut out, true).unwrap();
        let enabled = out.len();
        assert!(enabled > 0);
        modes.set_mouse_capture(&mut out, true).unwrap();
        assert_eq!(out.len(), enabled);
        assert!(modes.mouse_capture);
    }

    #[test]
    fn restore_undoes_active_modes_once() {
        let mut modes = Modes {
            alternate_screen: true,
            mouse_capture: true,
            ..Modes::default()
        };
        let mut out = Vec::new();
        modes.restore(&mut out, "test");
        assert!(!out.is_empty());
        assert!(modes.is_clean());

        let written = out.len();
        modes.restore(&mut out, "test");
        assert_eq!(out.len(), written);
    }
}
