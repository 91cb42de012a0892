//! Transfer result types
//!
//! Defines the outcome returned by durable writes.

use std::path::PathBuf;

use crate::error::{FileIoError, FileIoResult};

/// Result of a durable write that got as far as opening its destination
#[derive(Debug)]
pub struct WriteOutcome {
    pub destination: PathBuf,
    pub bytes_written: u64,
    /// Whether the durability barrier was accepted
    pub synced: bool,
    /// Error captured mid-transfer; the destination may be partially written
    pub failure: Option<FileIoError>,
}

impl WriteOutcome {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    /// Turn a captured transfer failure into an `Err`.
    pub fn into_result(mut self) -> FileIoResult<Self> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}
