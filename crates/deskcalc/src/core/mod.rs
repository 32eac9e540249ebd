//! Calculator core: expression accumulator and arithmetic evaluator
//!
//! Nothing in here knows about terminals. The front end drives an
//! [`ExpressionAccumulator`] and renders its buffers through [`display`].

pub mod accumulator;
pub mod display;
pub mod evaluator;
pub mod history;
pub mod number;
mod operations;
pub mod parser;

pub use accumulator::ExpressionAccumulator;
pub use number::Number;
pub use operations::{Calculator, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Everything that can go wrong while evaluating an expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Nothing to evaluate
    #[error("Empty expression")]
    EmptyExpression,

    /// Square or square root pressed with nothing pending
    #[error("No operand to apply the function to")]
    EmptyOperand,

    /// Unknown character or unparsable number literal
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Tokens are valid but do not form an expression
    #[error("Invalid expression: {0}")]
    Syntax(String),

    /// Division (or a negative power) of zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Integer overflow or infinite float result
    #[error("Overflow: result exceeds maximum value")]
    Overflow,

    /// Negative base raised to a fractional power
    #[error("Result is not a real number")]
    ComplexResult,
}

impl CalcError {
    /// Create a malformed token error
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedToken(message.into())
    }

    /// Create a syntax error
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }
}
