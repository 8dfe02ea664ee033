//! Global error handling for ctxmd
//!
//! Only two failures are fatal for a run: the traversal itself failing, and
//! the final output file not being writable. Everything that goes wrong with
//! an individual file is recovered locally and surfaces as an inline
//! placeholder in the generated document.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for ctxmd operations
#[derive(Error, Debug)]
pub enum CtxError {
    /// The directory walk could not run at all
    #[error("Traversal error: {0}")]
    Traversal(String),

    /// The final document could not be written
    #[error("Failed to write output file {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Specialized Result type for ctxmd operations
pub type Result<T> = std::result::Result<T, CtxError>;

// Allow converting CtxError to io::Error for test ergonomics
impl From<CtxError> for io::Error {
    fn from(err: CtxError) -> Self {
        io::Error::new(io::ErrorKind::Other, err.to_string())
    }
}

impl From<walkdir::Error> for CtxError {
    fn from(err: walkdir::Error) -> Self {
        CtxError::Traversal(err.to_string())
    }
}

impl From<ignore::Error> for CtxError {
    fn from(err: ignore::Error) -> Self {
        CtxError::Traversal(err.to_string())
    }
}
