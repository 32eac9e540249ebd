//! deskcalc: keypad calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! deskcalc                      # Interactive keypad
//! deskcalc --eval "7/2"         # Print 3.5 and exit
//! deskcalc --log-file calc.log  # Keep a debug log of the session
//! ```

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, MouseButton, MouseEvent, MouseEventKind};
use deskcalc::{
    cli::Cli,
    config::Config,
    core::{accumulator::ERROR_SENTINEL, evaluator::Evaluator},
    error::AppResult,
    logging,
    tui::{install_restore_hook, render, CalculatorApp, InputHandler, TerminalGuard},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{info, warn};

/// How long a pressed button stays lit without further input
const HIGHLIGHT_DURATION: Duration = Duration::from_millis(150);

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<ExitCode> {
    let cli = Cli::parse();
    let config = cli.config();

    if let Some(expression) = cli.eval.as_deref() {
        logging::init(&config, false)?;
        return Ok(evaluate_once(expression));
    }

    logging::init(&config, true)?;
    run_tui(&config)?;
    Ok(ExitCode::SUCCESS)
}

fn evaluate_once(expression: &str) -> ExitCode {
    match Evaluator::new().evaluate_str(expression) {
        Ok(value) => {
            info!(expression, %value, "evaluated");
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            warn!(expression, error = %e, "evaluation failed");
            println!("{ERROR_SENTINEL}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_tui(config: &Config) -> AppResult<()> {
    let mut app = CalculatorApp::with_config(config);

    let guard = TerminalGuard::new()?;
    install_restore_hook(guard.restorer());
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    info!("session started");

    let result = run_app(&mut terminal, &mut app);
    let restored = guard.restore();
    info!("session ended");

    result?;
    Ok(restored?)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut CalculatorApp,
) -> AppResult<()> {
    let input_handler = InputHandler::new();
    let mut screen = Rect::default();

    while !app.should_quit() {
        terminal.draw(|f| {
            screen = f.area();
            render(app, f);
        })?;

        // Terminals rarely report key releases, so the highlight times out
        if !event::poll(HIGHLIGHT_DURATION)? {
            app.release_keys();
            continue;
        }

        match event::read()? {
            Event::Key(key) => app.handle(input_handler.handle_key(key)),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => app.click(screen, column, row),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Up(MouseButton::Left),
                ..
            }) => app.release_keys(),
            _ => {}
        }
    }

    Ok(())
}
