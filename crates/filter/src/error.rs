//! Filter error types.

use thiserror::Error;

/// Filter errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Failed to parse filter rules.
    #[error("failed to parse filter rules: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
