//! Expression accumulator
//!
//! Two text buffers: the committed expression (everything locked in by an
//! operator press) and the pending operand being typed. The full expression
//! is always `committed + pending`, concatenated verbatim; nothing is
//! validated until it is evaluated.

use tracing::{debug, warn};

use crate::core::evaluator::Evaluator;
use crate::core::{CalcError, CalcResult, Number, Operation};

/// Text placed in the pending buffer when evaluation fails
pub const ERROR_SENTINEL: &str = "Error";

/// The calculator's two expression buffers and the operations on them
#[derive(Debug, Default, Clone)]
pub struct ExpressionAccumulator {
    committed: String,
    pending: String,
    evaluator: Evaluator,
}

impl ExpressionAccumulator {
    /// Creates an accumulator with both buffers empty
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed expression
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// The pending operand
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Committed followed by pending, as it would be evaluated
    #[must_use]
    pub fn full_expression(&self) -> String {
        format!("{}{}", self.committed, self.pending)
    }

    /// Returns true if the last evaluation failed and nothing was typed since
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.pending == ERROR_SENTINEL
    }

    /// Appends a digit or decimal point to the pending operand
    ///
    /// No validation: `1.2.3` is accepted here and rejected at evaluation.
    /// Typing after a failed evaluation appends to the sentinel text.
    pub fn append_digit_or_point(&mut self, token: char) {
        self.pending.push(token);
        debug!(pending = %self.pending, "digit appended");
    }

    /// Appends an operator and commits the pending operand with it
    pub fn append_operator(&mut self, op: Operation) {
        self.pending.push_str(op.symbol());
        self.committed.push_str(&self.pending);
        self.pending.clear();
        debug!(committed = %self.committed, "operator committed");
    }

    /// Empties both buffers
    pub fn clear(&mut self) {
        self.committed.clear();
        self.pending.clear();
        debug!("cleared");
    }

    /// Replaces the pending operand with its square
    ///
    /// On failure the buffers are left as they were.
    pub fn square_current(&mut self) -> CalcResult<Number> {
        self.apply_power("2")
    }

    /// Replaces the pending operand with its square root
    ///
    /// On failure the buffers are left as they were.
    pub fn square_root_current(&mut self) -> CalcResult<Number> {
        self.apply_power("0.5")
    }

    // The operand is spliced in as text, so a pending "-3" squares to -9.
    fn apply_power(&mut self, exponent: &str) -> CalcResult<Number> {
        if self.pending.is_empty() {
            warn!(exponent, "no operand for power");
            return Err(CalcError::EmptyOperand);
        }

        let expression = format!("{}**{exponent}", self.pending);
        match self.evaluator.evaluate_str(&expression) {
            Ok(value) => {
                self.pending = value.to_string();
                debug!(%expression, pending = %self.pending, "power applied");
                Ok(value)
            }
            Err(e) => {
                warn!(%expression, error = %e, "power failed");
                Err(e)
            }
        }
    }

    /// Evaluates committed + pending
    ///
    /// On success the result text becomes the pending operand. On failure
    /// the pending operand becomes [`ERROR_SENTINEL`]. The committed
    /// expression is emptied either way. The outcome is also returned so
    /// callers can tell error kinds apart.
    pub fn evaluate(&mut self) -> CalcResult<Number> {
        let expression = std::mem::take(&mut self.committed) + &self.pending;

        let outcome = self.evaluator.evaluate_str(&expression);
        match &outcome {
            Ok(value) => {
                self.pending = value.to_string();
                debug!(%expression, result = %self.pending, "evaluated");
            }
            Err(e) => {
                self.pending = ERROR_SENTINEL.to_string();
                warn!(%expression, error = %e, "evaluation failed");
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(acc: &mut ExpressionAccumulator, digits: &str) {
        for c in digits.chars() {
            acc.append_digit_or_point(c);
        }
    }

    // ===== Construction =====

    #[test]
    fn test_new_is_empty() {
        let acc = ExpressionAccumulator::new();
        assert_eq!(acc.committed(), "");
        assert_eq!(acc.pending(), "");
        assert_eq!(acc.full_expression(), "");
        assert!(!acc.is_error());
    }

    // ===== Entry =====

    #[test]
    fn test_digits_concatenate() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "12.5");
        assert_eq!(acc.pending(), "12.5");
        assert_eq!(acc.committed(), "");
    }

    #[test]
    fn test_multiple_points_accepted() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "1.2.3");
        assert_eq!(acc.pending(), "1.2.3");
    }

    #[test]
    fn test_append_operator_commits_pending() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "12");
        acc.append_operator(Operation::Multiply);
        assert_eq!(acc.committed(), "12*");
        assert_eq!(acc.pending(), "");
    }

    #[test]
    fn test_append_operator_with_empty_pending() {
        let mut acc = ExpressionAccumulator::new();
        acc.append_operator(Operation::Subtract);
        acc.append_operator(Operation::Add);
        assert_eq!(acc.committed(), "-+");
        assert_eq!(acc.pending(), "");
    }

    #[test]
    fn test_full_expression_concatenates() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "7");
        acc.append_operator(Operation::Divide);
        type_digits(&mut acc, "2");
        assert_eq!(acc.full_expression(), "7/2");
    }

    // ===== Clear =====

    #[test]
    fn test_clear_empties_both() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "5");
        acc.append_operator(Operation::Add);
        type_digits(&mut acc, "6");
        acc.clear();
        assert_eq!(acc.committed(), "");
        assert_eq!(acc.pending(), "");
    }

    // ===== Evaluate =====

    #[test]
    fn test_evaluate_addition() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "2");
        acc.append_operator(Operation::Add);
        type_digits(&mut acc, "3");
        assert_eq!(acc.evaluate(), Ok(Number::Int(5)));
        assert_eq!(acc.pending(), "5");
        assert_eq!(acc.committed(), "");
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "5");
        acc.append_operator(Operation::Divide);
        type_digits(&mut acc, "0");
        assert_eq!(acc.evaluate(), Err(CalcError::DivisionByZero));
        assert_eq!(acc.pending(), ERROR_SENTINEL);
        assert_eq!(acc.committed(), "");
        assert!(acc.is_error());
    }

    #[test]
    fn test_evaluate_empty() {
        let mut acc = ExpressionAccumulator::new();
        assert_eq!(acc.evaluate(), Err(CalcError::EmptyExpression));
        assert_eq!(acc.pending(), ERROR_SENTINEL);
    }

    #[test]
    fn test_evaluate_trailing_operator() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "4");
        acc.append_operator(Operation::Multiply);
        assert!(matches!(acc.evaluate(), Err(CalcError::Syntax(_))));
        assert_eq!(acc.pending(), ERROR_SENTINEL);
        assert_eq!(acc.committed(), "");
    }

    #[test]
    fn test_evaluate_many_minus_presses_is_error() {
        let mut acc = ExpressionAccumulator::new();
        for _ in 0..100_000 {
            acc.append_operator(Operation::Subtract);
        }
        type_digits(&mut acc, "1");
        assert_eq!(
            acc.evaluate(),
            Err(CalcError::syntax("expression nested too deeply"))
        );
        assert_eq!(acc.pending(), ERROR_SENTINEL);
        assert_eq!(acc.committed(), "");
    }

    #[test]
    fn test_result_can_be_chained() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "7");
        acc.append_operator(Operation::Divide);
        type_digits(&mut acc, "2");
        acc.evaluate().unwrap();
        acc.append_operator(Operation::Multiply);
        type_digits(&mut acc, "2");
        assert_eq!(acc.committed(), "3.5*");
        assert_eq!(acc.evaluate(), Ok(Number::Float(7.0)));
        assert_eq!(acc.pending(), "7.0");
    }

    #[test]
    fn test_typing_after_error_appends_to_sentinel() {
        let mut acc = ExpressionAccumulator::new();
        acc.evaluate().unwrap_err();
        type_digits(&mut acc, "4");
        assert_eq!(acc.pending(), "Error4");
        assert!(!acc.is_error());
        assert!(matches!(acc.evaluate(), Err(CalcError::MalformedToken(_))));
        assert_eq!(acc.pending(), ERROR_SENTINEL);
    }

    // ===== Square / square root =====

    #[test]
    fn test_square() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "9");
        assert_eq!(acc.square_current(), Ok(Number::Int(81)));
        assert_eq!(acc.pending(), "81");
    }

    #[test]
    fn test_square_root() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "16");
        assert_eq!(acc.square_root_current(), Ok(Number::Float(4.0)));
        assert_eq!(acc.pending(), "4.0");
    }

    #[test]
    fn test_square_leaves_committed_alone() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "1");
        acc.append_operator(Operation::Add);
        type_digits(&mut acc, "3");
        acc.square_current().unwrap();
        assert_eq!(acc.committed(), "1+");
        assert_eq!(acc.pending(), "9");
        assert_eq!(acc.evaluate(), Ok(Number::Int(10)));
    }

    #[test]
    fn test_square_empty_operand() {
        let mut acc = ExpressionAccumulator::new();
        acc.append_operator(Operation::Add);
        assert_eq!(acc.square_current(), Err(CalcError::EmptyOperand));
        assert_eq!(acc.square_root_current(), Err(CalcError::EmptyOperand));
        assert_eq!(acc.committed(), "+");
        assert_eq!(acc.pending(), "");
    }

    #[test]
    fn test_square_malformed_operand_unchanged() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "1..2");
        assert!(matches!(
            acc.square_current(),
            Err(CalcError::MalformedToken(_))
        ));
        assert_eq!(acc.pending(), "1..2");
    }

    #[test]
    fn test_square_of_sentinel_fails() {
        let mut acc = ExpressionAccumulator::new();
        acc.evaluate().unwrap_err();
        assert!(acc.square_root_current().is_err());
        assert_eq!(acc.pending(), ERROR_SENTINEL);
    }

    #[test]
    fn test_square_of_negative_result_is_textual() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "2");
        acc.append_operator(Operation::Subtract);
        type_digits(&mut acc, "5");
        acc.evaluate().unwrap();
        assert_eq!(acc.pending(), "-3");
        acc.square_current().unwrap();
        assert_eq!(acc.pending(), "-9");
    }

    #[test]
    fn test_square_root_of_negative_result_is_textual() {
        let mut acc = ExpressionAccumulator::new();
        type_digits(&mut acc, "0");
        acc.append_operator(Operation::Subtract);
        type_digits(&mut acc, "4");
        acc.evaluate().unwrap();
        acc.square_root_current().unwrap();
        assert_eq!(acc.pending(), "-2.0");
    }
}
