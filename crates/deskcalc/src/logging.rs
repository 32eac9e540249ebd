//! Tracing subscriber setup
//!
//! The keypad owns the terminal, so interactive sessions only log when a
//! file is given. One-shot evaluation logs to stderr.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Where log events go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file
    File(PathBuf),
    /// Standard error
    Stderr,
    /// Dropped
    Off,
}

impl LogTarget {
    /// Picks a target for the run mode
    #[must_use]
    pub fn select(config: &Config, interactive: bool) -> Self {
        match (&config.log_file, interactive) {
            (Some(path), _) => Self::File(path.clone()),
            (None, false) => Self::Stderr,
            (None, true) => Self::Off,
        }
    }
}

/// Builds the filter: `RUST_LOG` if set, else the configured level for this crate
#[must_use]
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={}",
            env!("CARGO_CRATE_NAME"),
            config.verbosity.level()
        ))
    })
}

/// Installs the global subscriber
pub fn init(config: &Config, interactive: bool) -> AppResult<()> {
    let filter = env_filter(config);

    match LogTarget::select(config, interactive) {
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .try_init()
                .map_err(|e| AppError::logging(e.to_string()))?;
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact()
                .try_init()
                .map_err(|e| AppError::logging(e.to_string()))?;
        }
        LogTarget::Off => return Ok(()),
    }

    install_panic_hook();
    Ok(())
}

fn open_log_file(path: &Path) -> AppResult<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Logs panics before handing them to the previous hook
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string panic payload>");

        let location = info
            .location()
            .map_or_else(|| "<unknown>".to_string(), |l| format!("{}:{}", l.file(), l.line()));

        tracing::error!(%location, %payload, "panic");
        previous(info);
    }));
}
