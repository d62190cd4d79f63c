use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which panel a body is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedMode {
    /// The main scrolling body.
    #[default]
    Unfixed,
    /// The left fixed panel.
    Left,
    /// The right fixed panel.
    Right,
}

impl FromStr for FixedMode {
    type Err = ConfigError;

    /// Accepts the host attribute strings: `left`/`true`, `right`, and an
    /// empty string or `false` for the main body.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" | "true" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "" | "false" => Ok(Self::Unfixed),
            other => Err(ConfigError::UnknownFixedMode(other.to_string())),
        }
    }
}

/// Whether a column is hidden in the given panel.
///
/// A fixed panel only shows its own columns; the main body hides the
/// columns the fixed panels already render.
pub fn is_column_hidden(
    index: usize,
    mode: FixedMode,
    left_fixed: usize,
    total: usize,
    right_fixed: usize,
) -> bool {
    let right_start = total.saturating_sub(right_fixed);
    match mode {
        FixedMode::Left => index >= left_fixed,
        FixedMode::Right => index < right_start,
        FixedMode::Unfixed => index < left_fixed || index >= right_start,
    }
}
