//! Capacity oracle contract and built-in measurement policies.
//!
//! # Responsibility
//! - Decide whether one page's content overflows its budget.
//! - Report where the content must split, always on a line boundary.
//!
//! # Invariants
//! - `Verdict::Overflow { split_line }` satisfies
//!   `1 <= split_line < logical line count`: the first logical line always
//!   stays, so a single logical line never overflows.
//! - Oracles are pure: the same content and constraints give the same verdict.

use serde::{Deserialize, Serialize};

pub mod line_count;
pub mod wrapped;

pub use line_count::LineCountOracle;
pub use wrapped::{wrapped_rows, WrappedLineOracle};

/// Rendering budget of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Constraints {
    /// Budget in logical lines.
    Lines { max_lines: usize },
    /// Budget in rendered rows, with soft-wrapping estimated per line.
    Wrapped {
        chars_per_line: usize,
        max_lines: usize,
    },
}

impl Constraints {
    pub fn lines(max_lines: usize) -> Self {
        Self::Lines { max_lines }
    }

    pub fn wrapped(chars_per_line: usize, max_lines: usize) -> Self {
        Self::Wrapped {
            chars_per_line,
            max_lines,
        }
    }

    /// Line budget, never below one.
    pub fn max_lines(&self) -> usize {
        match *self {
            Self::Lines { max_lines } | Self::Wrapped { max_lines, .. } => max_lines.max(1),
        }
    }
}

/// Oracle answer for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Fits,
    /// The first `split_line` logical lines stay; the rest moves onward.
    Overflow { split_line: usize },
}

impl Verdict {
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow { .. })
    }
}

/// Pluggable measurement strategy.
///
/// UI hosts can back this with real element measurement; the built-in
/// policies are pure text heuristics.
pub trait CapacityOracle {
    fn evaluate(&self, content: &str, constraints: &Constraints) -> Verdict;
}

impl<T: CapacityOracle + ?Sized> CapacityOracle for &T {
    fn evaluate(&self, content: &str, constraints: &Constraints) -> Verdict {
        (**self).evaluate(content, constraints)
    }
}

impl<T: CapacityOracle + ?Sized> CapacityOracle for Box<T> {
    fn evaluate(&self, content: &str, constraints: &Constraints) -> Verdict {
        (**self).evaluate(content, constraints)
    }
}

/// Built-in policy picked from the shape of the constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityPolicy {
    LineCount,
    WrappedLine,
}

impl CapacityPolicy {
    pub fn from_constraints(constraints: &Constraints) -> Self {
        match constraints {
            Constraints::Lines { .. } => Self::LineCount,
            Constraints::Wrapped { .. } => Self::WrappedLine,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LineCount => "line_count",
            Self::WrappedLine => "wrapped_line",
        }
    }
}

impl CapacityOracle for CapacityPolicy {
    fn evaluate(&self, content: &str, constraints: &Constraints) -> Verdict {
        match self {
            Self::LineCount => LineCountOracle.evaluate(content, constraints),
            Self::WrappedLine => WrappedLineOracle.evaluate(content, constraints),
        }
    }
}

/// Splits `content` after its first `split_line` logical lines.
///
/// The line break at the boundary is consumed: it becomes the page break.
/// Returns `None` when `split_line` is zero or not below the line count.
pub fn split_at_line(content: &str, split_line: usize) -> Option<(&str, &str)> {
    if split_line == 0 {
        return None;
    }
    let (index, _) = content.match_indices('\n').nth(split_line - 1)?;
    Some((&content[..index], &content[index + 1..]))
}

#[cfg(test)]
mod tests {
    use super::{split_at_line, CapacityOracle, CapacityPolicy, Constraints, Verdict};

    #[test]
    fn split_at_line_consumes_boundary_break() {
        assert_eq!(split_at_line("a\nb\nc\nd", 3), Some(("a\nb\nc", "d")));
        assert_eq!(split_at_line("a\nb\n", 2), Some(("a\nb", "")));
        assert_eq!(split_at_line("\nb", 1), Some(("", "b")));
    }

    #[test]
    fn split_at_line_rejects_out_of_range() {
        assert_eq!(split_at_line("a\nb", 0), None);
        assert_eq!(split_at_line("a\nb", 2), None);
        assert_eq!(split_at_line("", 1), None);
    }

    #[test]
    fn policy_follows_constraint_shape() {
        let lines = Constraints::lines(2);
        let wrapped = Constraints::wrapped(4, 2);
        assert_eq!(
            CapacityPolicy::from_constraints(&lines),
            CapacityPolicy::LineCount
        );
        assert_eq!(
            CapacityPolicy::from_constraints(&wrapped),
            CapacityPolicy::WrappedLine
        );
        assert_eq!(
            CapacityPolicy::WrappedLine.evaluate("abcdefgh\nx", &wrapped),
            Verdict::Overflow { split_line: 1 }
        );
    }

    #[test]
    fn constraints_serialize_with_policy_tag() {
        let json = serde_json::to_string(&Constraints::wrapped(80, 40)).unwrap();
        assert_eq!(
            json,
            r#"{"policy":"wrapped","chars_per_line":80,"max_lines":40}"#
        );
        assert_eq!(Constraints::lines(0).max_lines(), 1);
    }
}
