//! Error handlers
//!
//! Logs errors at the severity their kind deserves.

use log::{error, warn};

use crate::error::types::{ErrorKind, FileIoError};

/// Log a file I/O error. Non-fatal kinds are logged as warnings.
pub fn handle_error(err: &FileIoError) {
    match err.kind() {
        ErrorKind::SyncFailure | ErrorKind::ResolutionFailure => warn!("File I/O: {}", err),
        _ => error!("File I/O error: {}", err),
    }
}

/// Whether the error invalidates the operation that produced it.
pub fn is_fatal(err: &FileIoError) -> bool {
    err.kind() != ErrorKind::SyncFailure
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn sync_failures_are_not_fatal() {
        let err = FileIoError::Sync {
            path: "/tmp/x".into(),
            source: io::Error::new(io::ErrorKind::Unsupported, "fsync refused"),
        };
        assert!(!is_fatal(&err));
        assert_eq!(err.kind(), ErrorKind::SyncFailure);
    }

    #[test]
    fn transfer_failures_are_fatal() {
        let err = FileIoError::transfer("/tmp/x", io::Error::other("disk full"));
        assert!(is_fatal(&err));
        assert!(err.to_string().contains("/tmp/x"));
    }
}
