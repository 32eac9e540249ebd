//! Runtime configuration

use std::path::PathBuf;

use crate::core::display::DEFAULT_PENDING_WIDTH;
use crate::core::history::History;

/// Logging verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings and errors
    #[default]
    Normal,
    /// Adds informational events
    Verbose,
    /// Everything, including each key press
    Debug,
}

impl Verbosity {
    /// Maps `-v` occurrences to a level
    #[must_use]
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Default `tracing` level directive when `RUST_LOG` is unset
    #[must_use]
    pub const fn level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Characters of the pending operand shown on the display
    pub display_width: usize,
    /// Capacity of the session tape
    pub history_size: usize,
    /// Where log events are written in interactive mode
    pub log_file: Option<PathBuf>,
    /// Logging verbosity
    pub verbosity: Verbosity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_width: DEFAULT_PENDING_WIDTH,
            history_size: History::DEFAULT_MAX_ENTRIES,
            log_file: None,
            verbosity: Verbosity::Normal,
        }
    }
}

impl Config {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display width
    #[must_use]
    pub const fn with_display_width(mut self, width: usize) -> Self {
        self.display_width = width;
        self
    }

    /// Set tape capacity
    #[must_use]
    pub const fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// Set log file
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}
