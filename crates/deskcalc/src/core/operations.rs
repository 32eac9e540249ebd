//! Arithmetic on [`Number`] values
//!
//! Integer arithmetic is checked; anything that would leave `i64` is an
//! overflow rather than a silent wrap or a promotion to float.

use crate::core::{CalcError, CalcResult, Number};

/// Binary operators understood by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Exponentiation (**)
    Power,
}

impl Operation {
    /// The four operators offered on the keypad, in keypad order
    pub const KEYPAD: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the operator as it appears in expression text
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "**",
        }
    }

    /// Returns the glyph shown on the keypad and in the committed display
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "\u{00D7}",
            Self::Divide => "\u{00F7}",
            Self::Power => "^",
        }
    }

    /// Maps a typed key to one of the keypad operators
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }
}

/// Arithmetic over integers and floats
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Creates a new calculator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Performs an operation on two operands
    pub fn calculate(&self, a: Number, b: Number, op: Operation) -> CalcResult<Number> {
        match op {
            Operation::Add => Self::add(a, b),
            Operation::Subtract => Self::subtract(a, b),
            Operation::Multiply => Self::multiply(a, b),
            Operation::Divide => Self::divide(a, b),
            Operation::Power => Self::power(a, b),
        }
    }

    /// Unary minus
    pub fn negate(&self, value: Number) -> CalcResult<Number> {
        match value {
            Number::Int(i) => i.checked_neg().map(Number::Int).ok_or(CalcError::Overflow),
            Number::Float(f) => Ok(Number::Float(-f)),
        }
    }

    /// Addition: a + b
    pub fn add(a: Number, b: Number) -> CalcResult<Number> {
        match (a, b) {
            (Number::Int(x), Number::Int(y)) => Self::checked_int(x.checked_add(y)),
            _ => Self::check_finite(a.as_f64() + b.as_f64()),
        }
    }

    /// Subtraction: a - b
    pub fn subtract(a: Number, b: Number) -> CalcResult<Number> {
        match (a, b) {
            (Number::Int(x), Number::Int(y)) => Self::checked_int(x.checked_sub(y)),
            _ => Self::check_finite(a.as_f64() - b.as_f64()),
        }
    }

    /// Multiplication: a * b
    pub fn multiply(a: Number, b: Number) -> CalcResult<Number> {
        match (a, b) {
            (Number::Int(x), Number::Int(y)) => Self::checked_int(x.checked_mul(y)),
            _ => Self::check_finite(a.as_f64() * b.as_f64()),
        }
    }

    /// True division: always produces a float
    pub fn divide(a: Number, b: Number) -> CalcResult<Number> {
        if b.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        Self::check_finite(a.as_f64() / b.as_f64())
    }

    /// Exponentiation: a ** b
    ///
    /// Integer base and non-negative integer exponent stay integral.
    pub fn power(a: Number, b: Number) -> CalcResult<Number> {
        match (a, b) {
            (Number::Int(base), Number::Int(exp)) if exp >= 0 => Self::int_power(base, exp),
            _ => Self::float_power(a.as_f64(), b.as_f64()),
        }
    }

    fn int_power(base: i64, exp: i64) -> CalcResult<Number> {
        let value = match base {
            0 => Some(i64::from(exp == 0)),
            1 => Some(1),
            -1 => Some(if exp % 2 == 0 { 1 } else { -1 }),
            _ => u32::try_from(exp).ok().and_then(|e| base.checked_pow(e)),
        };
        Self::checked_int(value)
    }

    fn float_power(base: f64, exp: f64) -> CalcResult<Number> {
        if base == 0.0 && exp < 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        if base < 0.0 && exp.fract() != 0.0 {
            return Err(CalcError::ComplexResult);
        }
        Self::check_finite(base.powf(exp))
    }

    fn checked_int(value: Option<i64>) -> CalcResult<Number> {
        value.map(Number::Int).ok_or(CalcError::Overflow)
    }

    fn check_finite(result: f64) -> CalcResult<Number> {
        if result.is_finite() {
            Ok(Number::Float(result))
        } else {
            Err(CalcError::Overflow)
        }
    }
}
