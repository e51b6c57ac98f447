//! Pagination settings.
//!
//! # Responsibility
//! - Parse host-provided JSON settings into a validated `PagerConfig`.
//! - Build the reflow engine and storage slot the session runs with.
//!
//! # Invariants
//! - A normalized config always has `max_lines >= 1` and, when set,
//!   `chars_per_line >= 1`.
//! - Out-of-range budgets are clamped; zero budgets and blank slots are
//!   rejected.

use crate::capacity::Constraints;
use crate::reflow::{FocusConvention, ReflowEngine};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default page budget; one 800px page of 40px paragraphs.
pub const DEFAULT_MAX_LINES: usize = 20;
pub const MAX_LINES_CAP: usize = 10_000;
pub const CHARS_PER_LINE_CAP: usize = 1_000;
/// Storage slot used when the host does not name one.
pub const DEFAULT_STORAGE_SLOT: &str = "document-content";

/// Config parse/validation error.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid pager config: {err}"),
            Self::InvalidValue { field, message } => {
                write!(f, "invalid pager config value `{field}`: {message}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Pagination and storage settings for one editor session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagerConfig {
    /// Line (or wrapped-row) budget per page.
    pub max_lines: usize,
    /// Enables the wrapped-line policy when set.
    pub chars_per_line: Option<usize>,
    pub focus_convention: FocusConvention,
    pub storage_slot: String,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            chars_per_line: None,
            focus_convention: FocusConvention::default(),
            storage_slot: DEFAULT_STORAGE_SLOT.to_string(),
        }
    }
}

impl PagerConfig {
    /// Parses JSON settings; missing fields take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: PagerConfig = serde_json::from_str(raw)?;
        config.normalized()
    }

    /// Validates and clamps all fields.
    pub fn normalized(self) -> Result<Self, ConfigError> {
        if self.max_lines == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_lines",
                message: "must be at least 1".to_string(),
            });
        }
        if self.chars_per_line == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "chars_per_line",
                message: "must be at least 1".to_string(),
            });
        }
        let storage_slot = self.storage_slot.trim().to_string();
        if storage_slot.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage_slot",
                message: "must not be blank".to_string(),
            });
        }

        Ok(Self {
            max_lines: self.max_lines.min(MAX_LINES_CAP),
            chars_per_line: self
                .chars_per_line
                .map(|value| value.min(CHARS_PER_LINE_CAP)),
            focus_convention: self.focus_convention,
            storage_slot,
        })
    }

    /// Oracle constraints for this config.
    pub fn constraints(&self) -> Constraints {
        match self.chars_per_line {
            Some(chars_per_line) => Constraints::wrapped(chars_per_line, self.max_lines),
            None => Constraints::lines(self.max_lines),
        }
    }

    /// Engine with the built-in policy and configured focus convention.
    pub fn build_engine(&self) -> ReflowEngine {
        ReflowEngine::with_constraints(self.constraints())
            .with_focus_convention(self.focus_convention)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PagerConfig, DEFAULT_MAX_LINES, DEFAULT_STORAGE_SLOT};
    use crate::capacity::Constraints;
    use crate::reflow::FocusConvention;

    #[test]
    fn empty_object_yields_defaults() {
        let config = PagerConfig::from_json_str("{}").unwrap();
        assert_eq!(config.max_lines, DEFAULT_MAX_LINES);
        assert_eq!(config.storage_slot, DEFAULT_STORAGE_SLOT);
        assert_eq!(config.constraints(), Constraints::lines(DEFAULT_MAX_LINES));
    }

    #[test]
    fn wrapped_policy_and_convention_parse() {
        let config = PagerConfig::from_json_str(
            r#"{"max_lines": 40, "chars_per_line": 90, "focus_convention": "track_caret"}"#,
        )
        .unwrap();
        assert_eq!(config.constraints(), Constraints::wrapped(90, 40));
        assert_eq!(
            config.build_engine().focus_convention(),
            FocusConvention::TrackCaret
        );
    }

    #[test]
    fn oversized_budgets_are_clamped() {
        let config =
            PagerConfig::from_json_str(r#"{"max_lines": 999999, "chars_per_line": 5000}"#)
                .unwrap();
        assert_eq!(config.max_lines, 10_000);
        assert_eq!(config.chars_per_line, Some(1_000));
    }

    #[test]
    fn zero_budget_and_blank_slot_are_rejected() {
        let err = PagerConfig::from_json_str(r#"{"max_lines": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "max_lines",
                ..
            }
        ));

        let err = PagerConfig::from_json_str(r#"{"storage_slot": "  "}"#).unwrap_err();
        assert!(err.to_string().contains("storage_slot"));
    }

    #[test]
    fn unknown_fields_fail_to_parse() {
        let err = PagerConfig::from_json_str(r#"{"page_height": 800}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
