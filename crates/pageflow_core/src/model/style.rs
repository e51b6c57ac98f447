//! Uniform style descriptor broadcast to every page.
//!
//! Styling never feeds back into pagination; the core only stores the state
//! so that it survives save/load together with the content.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_SIZE: u16 = 16;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
const MIN_FONT_SIZE: u16 = 6;
const MAX_FONT_SIZE: u16 = 96;

/// Document-wide style state. No per-character or per-page styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleState {
    pub font_size: u16,
    pub font_family: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// Partial style update coming from toolbar actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePatch {
    pub font_size: Option<u16>,
    pub font_family: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

impl StyleState {
    /// Applies `patch` in place. Font size is clamped, blank families ignored.
    pub fn apply(&mut self, patch: StylePatch) {
        if let Some(size) = patch.font_size {
            self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        }
        if let Some(family) = patch.font_family {
            let trimmed = family.trim();
            if !trimmed.is_empty() {
                self.font_family = trimmed.to_string();
            }
        }
        if let Some(bold) = patch.bold {
            self.bold = bold;
        }
        if let Some(italic) = patch.italic {
            self.italic = italic;
        }
        if let Some(underline) = patch.underline {
            self.underline = underline;
        }
    }
}
