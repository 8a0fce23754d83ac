use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("ring store capacity must be at least 1")]
    ZeroCapacity,

    #[error("unknown log level: {0}")]
    UnknownLevel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
