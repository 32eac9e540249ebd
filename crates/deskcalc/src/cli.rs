//! Command-line arguments

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

use crate::config::{Config, Verbosity};
use crate::core::display::DEFAULT_PENDING_WIDTH;
use crate::core::history::History;

/// deskcalc: keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "deskcalc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Evaluate an expression, print the result and exit
    #[arg(short, long, value_name = "EXPR", allow_hyphen_values = true)]
    pub eval: Option<String>,

    /// Characters of the pending operand shown on the display
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PENDING_WIDTH)]
    pub display_width: usize,

    /// Number of evaluations kept on the session tape
    #[arg(
        long,
        value_name = "N",
        default_value_t = History::DEFAULT_MAX_ENTRIES,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=History::MAX_ENTRIES_LIMIT as u64)
    )]
    pub history_size: usize,

    /// Write log events to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Builds the runtime configuration from the parsed arguments
    #[must_use]
    pub fn config(&self) -> Config {
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::from_count(self.verbose)
        };

        let config = Config::new()
            .with_display_width(self.display_width)
            .with_history_size(self.history_size)
            .with_verbosity(verbosity);

        match &self.log_file {
            Some(path) => config.with_log_file(path.clone()),
            None => config,
        }
    }
}
