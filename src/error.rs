//! Error types for rcwav
//!
//! Core components never recover from a violation; they hand one of these back to the caller
//! and the binaries turn it into a message and a non-zero exit status.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or truncated container (bad magic, short header, short payload)
    #[error("Format error: {0}")]
    Format(String),

    /// Bad parameter to a pure component call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using rcwav Error
pub type Result<T> = std::result::Result<T, Error>;
