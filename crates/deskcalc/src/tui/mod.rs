//! Terminal front end
//!
//! Keyboard and mouse events drive the expression accumulator; the display,
//! keypad and session tape are redrawn after every event.

mod app;
mod input;
mod keypad;
mod terminal;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{ButtonAction, Keypad, KeypadButton, KeypadWidget};
pub use terminal::{
    install_restore_hook, CrosstermTerminal, TerminalGuard, TerminalOps, TerminalRestorer,
};
pub use ui::{layout, render, CalculatorUI, ScreenLayout};
