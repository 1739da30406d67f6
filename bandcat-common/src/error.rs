//! Common error types for bandcat

use thiserror::Error;

/// Common result type for bandcat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the catalog
#[derive(Error, Debug)]
pub enum Error {
    /// Genre text that does not belong to the vocabulary
    #[error("Invalid genre: {0}")]
    InvalidGenre(String),

    /// Album entry with a missing title or unparsable release date
    #[error("Invalid album data: {0}")]
    InvalidAlbumData(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested resource not found
    #[error("{0}")]
    NotFound(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored data that cannot be mapped back into the domain model
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than the service
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidGenre(_) | Error::InvalidAlbumData(_) | Error::InvalidInput(_)
        )
    }
}
