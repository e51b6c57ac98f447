//! Line-count policy: a page holds at most `max_lines` logical lines.

use super::{CapacityOracle, Constraints, Verdict};

/// Overflows when the logical line count exceeds the budget; splits at the
/// budget.
///
/// Soft-wrapping is ignored, so a `Wrapped` budget is read only for its
/// `max_lines`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCountOracle;

impl CapacityOracle for LineCountOracle {
    fn evaluate(&self, content: &str, constraints: &Constraints) -> Verdict {
        let max_lines = constraints.max_lines();
        let lines = content.bytes().filter(|byte| *byte == b'\n').count() + 1;
        if lines > max_lines {
            Verdict::Overflow {
                split_line: max_lines,
            }
        } else {
            Verdict::Fits
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LineCountOracle;
    use crate::capacity::{CapacityOracle, Constraints, Verdict};

    #[test]
    fn content_at_budget_fits() {
        let verdict = LineCountOracle.evaluate("a\nb\nc", &Constraints::lines(3));
        assert_eq!(verdict, Verdict::Fits);
    }

    #[test]
    fn trailing_break_counts_as_a_line() {
        let verdict = LineCountOracle.evaluate("a\nb\nc\n", &Constraints::lines(3));
        assert_eq!(verdict, Verdict::Overflow { split_line: 3 });
    }

    #[test]
    fn empty_content_fits_a_one_line_budget() {
        assert_eq!(
            LineCountOracle.evaluate("", &Constraints::lines(1)),
            Verdict::Fits
        );
    }

    #[test]
    fn long_lines_are_not_wrapped() {
        let long = "x".repeat(500);
        let verdict = LineCountOracle.evaluate(&long, &Constraints::wrapped(10, 2));
        assert_eq!(verdict, Verdict::Fits);
    }
}
