//! Error types for values that come from user input.
//!
//! Malformed backend rows are not errors: the normalizer drops them and
//! counts them instead. `CoreError` only covers filter and command input.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A status string did not match any known status.
    #[error("Invalid status '{0}' (expected pending, reviewed, ignored or fixed)")]
    InvalidStatus(String),

    /// A filter date could not be parsed as `YYYY-MM-DD`.
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// A minimum confidence outside `[0, 1]`.
    #[error("Invalid minimum confidence {0} (expected a value between 0 and 1)")]
    InvalidConfidence(f64),
}
