//! Engine error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Engine errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Every 64-bit event id has been handed out.
    #[error("event id space exhausted")]
    IdsExhausted,

    /// The engine configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error occurred in the event store.
    #[error(transparent)]
    Events(#[from] events::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
