//! TUI Application State

use ratatui::layout::Rect;
use tracing::{debug, info};

use super::input::KeyAction;
use super::keypad::{ButtonAction, Keypad};
use super::ui;
use crate::config::Config;
use crate::core::display::{format_committed, format_pending, DEFAULT_PENDING_WIDTH};
use crate::core::history::History;
use crate::core::{CalcResult, ExpressionAccumulator, Number};

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    /// Expression buffers
    accumulator: ExpressionAccumulator,
    /// Successful evaluations this session
    history: History,
    /// Keypad with highlight state
    keypad: Keypad,
    /// Last failure message, cleared by the next successful press
    status: Option<String>,
    /// Characters of the pending operand shown
    display_width: usize,
    /// Whether the app should quit
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            accumulator: ExpressionAccumulator::new(),
            history: History::new(),
            keypad: Keypad::new(),
            status: None,
            display_width: DEFAULT_PENDING_WIDTH,
            should_quit: false,
        }
    }

    /// Creates a calculator app from runtime configuration
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self {
            history: History::with_capacity(config.history_size),
            display_width: config.display_width,
            ..Self::new()
        }
    }

    /// Returns the expression buffers
    #[must_use]
    pub fn accumulator(&self) -> &ExpressionAccumulator {
        &self.accumulator
    }

    /// Returns the session tape
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the last failure message
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Upper display line
    #[must_use]
    pub fn committed_display(&self) -> String {
        format_committed(self.accumulator.committed())
    }

    /// Main display line
    #[must_use]
    pub fn pending_display(&self) -> &str {
        format_pending(self.accumulator.pending(), self.display_width)
    }

    /// Handles a keyboard action
    pub fn handle(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press(button) => self.press(button),
            KeyAction::ClearTape => {
                self.history.clear();
                info!("tape cleared");
            }
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a left click at a screen position
    pub fn click(&mut self, screen: Rect, x: u16, y: u16) {
        let area = ui::layout(screen).keypad;
        let action = self
            .keypad
            .hit_test(area, x, y)
            .and_then(|i| self.keypad.get_button(i))
            .map(|btn| btn.action);

        if let Some(action) = action {
            self.press(action);
        }
    }

    /// Clears the pressed highlight from the keypad
    pub fn release_keys(&mut self) {
        self.keypad.release_all();
    }

    /// Performs a keypad button's action
    pub fn press(&mut self, action: ButtonAction) {
        debug!(?action, "button pressed");
        self.keypad.highlight(action);

        match action {
            ButtonAction::Digit(_) | ButtonAction::Point => {
                if let Some(c) = action.entry_char() {
                    self.accumulator.append_digit_or_point(c);
                }
                self.status = None;
            }
            ButtonAction::Operator(op) => {
                self.accumulator.append_operator(op);
                self.status = None;
            }
            ButtonAction::Clear => {
                self.accumulator.clear();
                self.status = None;
            }
            ButtonAction::Square => {
                let outcome = self.accumulator.square_current();
                self.report(outcome);
            }
            ButtonAction::SquareRoot => {
                let outcome = self.accumulator.square_root_current();
                self.report(outcome);
            }
            ButtonAction::Equals => self.evaluate(),
        }
    }

    fn evaluate(&mut self) {
        let expression = self.accumulator.full_expression();
        match self.accumulator.evaluate() {
            Ok(value) => {
                self.history.record(&expression, value);
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn report(&mut self, outcome: CalcResult<Number>) {
        self.status = outcome.err().map(|e| e.to_string());
    }
}
