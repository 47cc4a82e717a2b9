//! Error types for the cache seeding layer
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for seeding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the cache seeding layer
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    ///
    /// The only error class that is fatal to a seeding pass. Per-alias
    /// cache and resolution failures are recovered locally instead.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cache record store errors
    #[error("Cache store error: {0}")]
    CacheStore(String),

    /// Hostname resolution errors
    #[error("Resolver error: {0}")]
    Resolve(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a cache store error
    pub fn cache_store(msg: impl Into<String>) -> Self {
        Self::CacheStore(msg.into())
    }

    /// Create a resolver error
    pub fn resolve(msg: impl Into<String>) -> Self {
        Self::Resolve(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
