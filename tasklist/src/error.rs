//! Error types for the task list.

use serde::{Deserialize, Serialize};

/// A task description was rejected.
///
/// The `Display` text is the user-facing message shown next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ValidationError {
    /// The description was empty or only whitespace.
    #[error("Description is required")]
    DescriptionRequired,
}

/// An environment variable held a value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The value did not parse for this key.
    #[error("invalid value `{value}` for {key}: expected {expected}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value found
        value: String,
        /// What would have been accepted
        expected: &'static str,
    },
}
