//! Error types for document and bit-definition parsing.

use thiserror::Error;

/// Errors produced while parsing documents or bit definitions.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed YAML text.
    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The text parsed but is not a usable definition.
    #[error("{message}")]
    Definition {
        /// Human-readable description of what was wrong.
        message: String,
    },
}
