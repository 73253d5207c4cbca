//! Store error types.

use thiserror::Error;

/// Message store error type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Channel does not exist in the store.
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    /// SQLite query or connection failure.
    #[error("query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Create a ChannelNotFound error.
    pub fn channel_not_found(channel: impl Into<String>) -> Self {
        Self::ChannelNotFound(channel.into())
    }

    /// Create an Other error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Store result type.
pub type StoreResult<T> = Result<T, StoreError>;
