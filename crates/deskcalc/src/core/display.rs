//! Text shown on the two display lines
//!
//! Pure string transforms; the accumulator buffers are never modified.

use crate::core::Operation;

/// Characters of the pending expression shown on the main display line
pub const DEFAULT_PENDING_WIDTH: usize = 11;

/// Formats the committed expression for the upper display line
///
/// Each keypad operator is replaced by its glyph padded with spaces, so
/// `12*3-` reads `12 × 3 - `.
#[must_use]
pub fn format_committed(expression: &str) -> String {
    let mut out = expression.to_string();
    for op in Operation::KEYPAD {
        out = out.replace(op.symbol(), &format!(" {} ", op.glyph()));
    }
    out
}

/// Truncates the pending expression to at most `width` characters
#[must_use]
pub fn format_pending(expression: &str, width: usize) -> &str {
    match expression.char_indices().nth(width) {
        Some((byte_idx, _)) => &expression[..byte_idx],
        None => expression,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Committed display =====

    #[test]
    fn test_format_committed_spacing() {
        assert_eq!(format_committed("2+"), "2 + ");
        assert_eq!(format_committed("12*3-"), "12 × 3 - ");
        assert_eq!(format_committed("8/"), "8 ÷ ");
    }

    #[test]
    fn test_format_committed_empty() {
        assert_eq!(format_committed(""), "");
    }

    #[test]
    fn test_format_committed_negative_result_operand() {
        assert_eq!(format_committed("-3+"), " - 3 + ");
    }

    #[test]
    fn test_format_committed_leaves_digits_alone() {
        assert_eq!(format_committed("1234.5"), "1234.5");
    }

    // ===== Pending display =====

    #[test]
    fn test_format_pending_short() {
        assert_eq!(format_pending("123", DEFAULT_PENDING_WIDTH), "123");
    }

    #[test]
    fn test_format_pending_truncates() {
        assert_eq!(
            format_pending("0.30000000000000004", DEFAULT_PENDING_WIDTH),
            "0.300000000"
        );
    }

    #[test]
    fn test_format_pending_exact_width() {
        assert_eq!(format_pending("12345678901", 11), "12345678901");
    }

    #[test]
    fn test_format_pending_counts_chars() {
        assert_eq!(format_pending("×÷×÷", 2), "×÷");
    }

    #[test]
    fn test_format_pending_zero_width() {
        assert_eq!(format_pending("42", 0), "");
    }
}
