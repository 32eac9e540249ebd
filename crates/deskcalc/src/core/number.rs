//! Numeric values produced by the evaluator
//!
//! Integers stay integers until something forces a float (division, a
//! fractional operand, a negative exponent). The text form is what lands
//! in the pending buffer, so it has to be stable: integers print plainly,
//! floats always carry a `.` or an exponent.

use std::fmt;
use std::num::IntErrorKind;

use crate::core::{CalcError, CalcResult};

/// An evaluated value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Whole number
    Int(i64),
    /// Floating-point number
    Float(f64),
}

impl Number {
    /// Parses a numeric literal: digits, at most one `.`, optional exponent
    ///
    /// Integer literals may not carry leading zeros (`07`), though `0`,
    /// `00` and float literals such as `07.5` are fine.
    pub fn parse_literal(text: &str) -> CalcResult<Self> {
        if text.contains(['.', 'e', 'E']) {
            return text
                .parse::<f64>()
                .map(Self::Float)
                .map_err(|_| CalcError::malformed(format!("invalid number '{text}'")));
        }

        if text.len() > 1 && text.starts_with('0') && text.bytes().any(|b| b != b'0') {
            return Err(CalcError::malformed(format!(
                "leading zeros are not allowed in '{text}'"
            )));
        }

        text.parse::<i64>().map(Self::Int).map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CalcError::Overflow,
            _ => CalcError::malformed(format!("invalid number '{text}'")),
        })
    }

    /// Returns the value as a float
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Returns true if the value is zero
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(i) => i == 0,
            Self::Float(f) => f == 0.0,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

/// Shortest round-trip text for a float
///
/// Fixed notation while the decimal exponent is in `-4..16`, otherwise
/// `<mantissa>e<sign><two or more digits>`.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sci = format!("{value:e}");
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let fixed = format!("{value}");
        if fixed.contains('.') {
            fixed
        } else {
            fixed + ".0"
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}
