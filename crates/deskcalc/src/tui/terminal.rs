//! Raw-mode session setup and guaranteed teardown
//!
//! [`TerminalGuard`] owns the raw-mode/alternate-screen session. Dropping it
//! restores the terminal, so an early return or an unwinding panic never
//! leaves the shell in raw mode.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Puts the terminal into and out of keypad mode
pub trait TerminalOps: Send + Sync + 'static {
    /// Enables raw mode, the alternate screen and mouse capture
    fn setup(&self) -> io::Result<()>;
    /// Undoes [`TerminalOps::setup`]
    fn restore(&self) -> io::Result<()>;
}

/// [`TerminalOps`] on the real terminal via crossterm
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermTerminal;

impl TerminalOps for CrosstermTerminal {
    fn setup(&self) -> io::Result<()> {
        use crossterm::{
            event::EnableMouseCapture,
            execute,
            terminal::{enable_raw_mode, EnterAlternateScreen},
        };

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::{
            cursor::Show,
            event::DisableMouseCapture,
            execute,
            terminal::{disable_raw_mode, LeaveAlternateScreen},
        };

        // Every step runs even when an earlier one fails
        let raw = disable_raw_mode();
        let screen = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
        raw.and(screen)
    }
}

/// Restores the terminal at most once, from any thread
#[derive(Clone)]
pub struct TerminalRestorer {
    restored: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl std::fmt::Debug for TerminalRestorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalRestorer")
            .field("restored", &self.restored.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl TerminalRestorer {
    /// Restores the terminal unless that already happened
    pub fn restore(&self) -> io::Result<()> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.restore()
    }

    /// Returns true once the terminal has been restored
    #[must_use]
    pub fn is_restored(&self) -> bool {
        self.restored.load(Ordering::SeqCst)
    }
}

/// Keeps the terminal in keypad mode for as long as it lives
#[derive(Debug)]
pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    /// Sets up the real terminal
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermTerminal))
    }

    /// Sets up the terminal through `ops`
    ///
    /// A failed setup is rolled back before the error is returned.
    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        if let Err(e) = ops.setup() {
            let _ = ops.restore();
            return Err(e);
        }
        Ok(Self {
            restorer: TerminalRestorer {
                restored: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    /// Returns a handle that can restore the terminal from a panic hook
    #[must_use]
    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }

    /// Restores the terminal now and reports any failure
    pub fn restore(self) -> io::Result<()> {
        self.restorer.restore()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restorer.restore();
    }
}

/// Restores the terminal before the panic message is printed
///
/// Without this the message would be written to the alternate screen and
/// vanish when the guard later leaves it.
pub fn install_restore_hook(restorer: TerminalRestorer) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restorer.restore();
        previous(info);
    }));
}
