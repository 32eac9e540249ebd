//! deskcalc - keypad calculator for the terminal
//!
//! Button presses build an arithmetic expression as text in two buffers: the
//! committed part (locked in by operator presses) and the pending operand.
//! Pressing `=` evaluates the concatenation with Python-style number
//! semantics: integers stay exact, `/` always yields a float, `**` binds
//! tighter than unary minus.
//!
//! # Example
//!
//! ```rust
//! use deskcalc::prelude::*;
//!
//! let mut acc = ExpressionAccumulator::new();
//! acc.append_digit_or_point('7');
//! acc.append_operator(Operation::Divide);
//! acc.append_digit_or_point('2');
//! assert_eq!(acc.evaluate(), Ok(Number::Float(3.5)));
//! assert_eq!(acc.pending(), "3.5");
//!
//! acc.append_operator(Operation::Divide);
//! acc.append_digit_or_point('0');
//! assert_eq!(acc.evaluate(), Err(CalcError::DivisionByZero));
//! assert_eq!(acc.pending(), "Error");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{Config, Verbosity};
    pub use crate::core::accumulator::ERROR_SENTINEL;
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{
        CalcError, CalcResult, Calculator, ExpressionAccumulator, Number, Operation,
    };
    pub use crate::error::{AppError, AppResult};

    #[cfg(feature = "tui")]
    pub use crate::tui::{ButtonAction, CalculatorApp, InputHandler, KeyAction};
}
