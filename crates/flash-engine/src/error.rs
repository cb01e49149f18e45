use std::result::Result as StdResult;

use thiserror::Error;

use crate::fetch::FetchError;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the FLASH engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or status failure while fetching a document or definition.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Failure mutating the host surface.
    #[error("surface error: {0}")]
    Surface(#[from] flash_surface::Error),

    /// A registered bit behavior reported a failure.
    #[error("behavior '{name}' failed: {message}")]
    Behavior {
        /// Bit name the behavior is registered under.
        name: String,
        /// Human-readable failure description.
        message: String,
    },
}

impl Error {
    /// Build a behavior failure for the given bit name.
    pub fn behavior(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Behavior {
            name: name.into(),
            message: message.into(),
        }
    }
}
