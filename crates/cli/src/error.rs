//! CLI error types.

use thiserror::Error;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The ingestion task panicked or was cancelled.
    #[error("ingestion task failed: {0}")]
    Ingest(#[from] tokio::task::JoinError),

    /// The thread printing events panicked.
    #[error("printer thread panicked")]
    PrinterPanicked,

    /// The configuration file is invalid.
    #[error(transparent)]
    Config(#[from] engine::ConfigError),

    /// An error occurred in the engine.
    #[error(transparent)]
    Engine(#[from] engine::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
