//! Common error types for songsplit

use thiserror::Error;

/// Common result type for songsplit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the songsplit crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
