//! Input validation utilities

use std::path::Path;

use crate::error::{FileIoError, FileIoResult};

/// A usable path string is non-empty and free of NUL bytes
pub fn is_valid_path_str(input: &str) -> bool {
    !input.trim().is_empty() && !input.contains('\0')
}

/// Reject empty paths before any I/O is attempted
pub fn require_path(path: &Path) -> FileIoResult<&Path> {
    if path.as_os_str().is_empty() {
        return Err(FileIoError::InvalidArgument("empty path".into()));
    }
    Ok(path)
}
