//! Filesystem error types.

use std::io;

use chanfs_store::StoreError;
use thiserror::Error;

/// Filesystem error type.
///
/// Mutation operations have no error surface at all; only the read
/// path produces these.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path matches none of root / hidden probe / channel file.
    #[error("unresolvable path: {0}")]
    UnknownPath(String),

    /// Path is shaped like a channel file but the name is ambiguous
    /// (empty, or contains `#` or a further `.txt`).
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// File or directory not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Expected a directory.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Expected a file.
    #[error("is a directory: {0}")]
    IsADirectory(String),

    /// A record carries neither a user nor a bot sender.
    #[error("data integrity: {0}")]
    DataIntegrity(String),

    /// Backing store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl FsError {
    /// Create an UnknownPath error.
    pub fn unknown_path(path: impl Into<String>) -> Self {
        Self::UnknownPath(path.into())
    }

    /// Create an InvalidPath error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    /// Create a NotADirectory error.
    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::NotADirectory(path.into())
    }

    /// Create an IsADirectory error.
    pub fn is_a_directory(path: impl Into<String>) -> Self {
        Self::IsADirectory(path.into())
    }
}

/// Convert FsError to std::io::Error for callers speaking errno.
impl From<FsError> for io::Error {
    fn from(e: FsError) -> Self {
        match e {
            // Unresolvable paths surface as "no such entry", not as a
            // protocol error.
            FsError::UnknownPath(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            FsError::InvalidPath(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            FsError::NotFound(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            FsError::NotADirectory(msg) => io::Error::new(io::ErrorKind::NotADirectory, msg),
            FsError::IsADirectory(msg) => io::Error::new(io::ErrorKind::IsADirectory, msg),
            FsError::DataIntegrity(msg) => io::Error::new(io::ErrorKind::InvalidData, msg),
            FsError::Store(StoreError::ChannelNotFound(c)) => {
                io::Error::new(io::ErrorKind::NotFound, format!("channel not found: {c}"))
            }
            FsError::Store(e) => io::Error::other(e.to_string()),
        }
    }
}

/// Filesystem result type.
pub type FsResult<T> = Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_path_maps_to_not_found() {
        let io_err: io::Error = FsError::unknown_path("/foo").into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn missing_channel_maps_to_not_found() {
        let io_err: io::Error = FsError::Store(StoreError::channel_not_found("ops")).into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn integrity_maps_to_invalid_data() {
        let io_err: io::Error = FsError::DataIntegrity("no sender".into()).into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }
}
