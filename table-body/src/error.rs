//! Configuration error types.

use thiserror::Error;

/// Errors raised at configuration boundaries.
///
/// The render pass never returns these: every recoverable condition inside
/// a pass falls back to a default. They surface only where host-supplied
/// configuration is validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A span policy produced something other than a `[rowspan, colspan]`
    /// pair or a `{ rowspan, colspan }` record.
    #[error("malformed span value: {found}")]
    MalformedSpan {
        /// The offending value, rendered for diagnostics.
        found: String,
    },

    /// Fixed-region counts exceed the column count.
    #[error("fixed counts (left {left}, right {right}) exceed {total} columns")]
    InvalidFixedCounts {
        left: usize,
        right: usize,
        total: usize,
    },

    /// The fixed-mode string is not one the table understands.
    #[error("unknown fixed mode '{0}'")]
    UnknownFixedMode(String),
}
