//! Error types for locating and loading files
//!
//! Every failure is raised at the point of detection. Nothing here retries,
//! and a failed load never leaves a partial cache entry behind.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`ReaderError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidRoot,
    MissingRequiredKey,
    InvalidArgument,
    UnsupportedFormat,
    Decode,
    Io,
}

/// Errors raised by the loader, indexer, resolver and cache
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("'{name}' not found under root '{}'", .root.display())]
    NotFoundUnderRoot { name: String, root: PathBuf },

    #[error("'{name}' not found under scope '{scope}' (root '{}')", .root.display())]
    NotFoundUnderScope {
        name: String,
        scope: String,
        root: PathBuf,
    },

    #[error("Invalid root path provided for tree scan: '{}'", .0.display())]
    InvalidRoot(PathBuf),

    #[error("Missing required keys in {}: {}", .path.display(), .keys.join(", "))]
    MissingRequiredKeys { path: PathBuf, keys: Vec<String> },

    #[error("Missing required CSV columns in {}: {}", .path.display(), .columns.join(", "))]
    MissingRequiredColumns { path: PathBuf, columns: Vec<String> },

    #[error("Missing 'root' in configuration {}", .0.display())]
    MissingRoot(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported configuration type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReaderError {
    /// Map this error onto its [`ErrorKind`]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReaderError::FileNotFound(_)
            | ReaderError::NotFoundUnderRoot { .. }
            | ReaderError::NotFoundUnderScope { .. } => ErrorKind::NotFound,
            ReaderError::InvalidRoot(_) => ErrorKind::InvalidRoot,
            ReaderError::MissingRequiredKeys { .. }
            | ReaderError::MissingRequiredColumns { .. }
            | ReaderError::MissingRoot(_) => ErrorKind::MissingRequiredKey,
            ReaderError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ReaderError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ReaderError::Decode { .. } => ErrorKind::Decode,
            ReaderError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorKind::NotFound
            }
            ReaderError::Io { .. } => ErrorKind::Io,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReaderError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ReaderError::Decode {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
