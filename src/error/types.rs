//! Error types
//!
//! Every failure a file I/O operation can report, grouped by the stage at
//! which it is detected.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate.
pub type FileIoResult<T> = Result<T, FileIoError>;

/// Errors produced by path preparation, durable writes and resolution.
#[derive(Debug, Error)]
pub enum FileIoError {
    /// Empty path, missing stream, or a directory where a file is required.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Destination probe failed and the parent chain could not be created.
    #[error("destination not writable: {}", .0.display())]
    NotWritable(PathBuf),

    /// Source missing or unreadable.
    #[error("source not readable: {}", .0.display())]
    NotReadable(PathBuf),

    /// I/O error while opening or copying into the destination.
    #[error("transfer into {} failed: {source}", .path.display())]
    Transfer {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The durability barrier was rejected. Never fatal on its own.
    #[error("sync of {} rejected: {source}", .path.display())]
    Sync {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A resource reference yielded no usable filesystem path.
    #[error("unresolved resource reference: {0}")]
    Unresolved(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Payload-free classification of [`FileIoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotWritable,
    NotReadable,
    TransferFailure,
    SyncFailure,
    ResolutionFailure,
    Config,
}

impl FileIoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FileIoError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            FileIoError::NotWritable(_) => ErrorKind::NotWritable,
            FileIoError::NotReadable(_) => ErrorKind::NotReadable,
            FileIoError::Transfer { .. } => ErrorKind::TransferFailure,
            FileIoError::Sync { .. } => ErrorKind::SyncFailure,
            FileIoError::Unresolved(_) => ErrorKind::ResolutionFailure,
            FileIoError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn transfer(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FileIoError::Transfer {
            path: path.into(),
            source,
        }
    }
}
