//! Wrapped-line policy.
//!
//! Each logical line costs `ceil(display_width / chars_per_line)` rendered
//! rows (an empty line still costs one). Lines are packed greedily onto the
//! page until the next one would exceed the row budget.

use super::{CapacityOracle, Constraints, LineCountOracle, Verdict};
use unicode_width::UnicodeWidthStr;

/// Soft-wrap estimator for proportional or monospace surfaces.
///
/// Width is measured in display columns, so wide glyphs (CJK, most emoji)
/// take two columns. With a plain `Lines` budget it behaves like
/// [`LineCountOracle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrappedLineOracle;

/// Rows one logical line occupies at `chars_per_line` columns.
pub fn wrapped_rows(line: &str, chars_per_line: usize) -> usize {
    let width = UnicodeWidthStr::width(line);
    if width == 0 {
        return 1;
    }
    width.div_ceil(chars_per_line.max(1))
}

impl CapacityOracle for WrappedLineOracle {
    fn evaluate(&self, content: &str, constraints: &Constraints) -> Verdict {
        let Constraints::Wrapped { chars_per_line, .. } = *constraints else {
            return LineCountOracle.evaluate(content, constraints);
        };
        let max_rows = constraints.max_lines();

        let mut used_rows = 0usize;
        for (index, line) in content.split('\n').enumerate() {
            let rows = wrapped_rows(line, chars_per_line);
            // The first line always stays, even when it alone exceeds the budget.
            if index > 0 && used_rows + rows > max_rows {
                return Verdict::Overflow { split_line: index };
            }
            used_rows += rows;
        }
        Verdict::Fits
    }
}
