//! Write destinations
//!
//! A [`FileTarget`] is a filesystem path plus state derived from it on
//! demand. Nothing is cached: the filesystem is the only source of truth.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{FileIoError, FileIoResult};
use crate::storage::permissions;

/// A file (never a directory) that an operation reads from or writes to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileTarget {
    path: PathBuf,
}

impl FileTarget {
    /// Wrap a path, rejecting an empty one.
    pub fn new(path: impl Into<PathBuf>) -> FileIoResult<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(FileIoError::InvalidArgument("empty file path".into()));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Parent directory, or `None` for a bare file name or a root path.
    pub fn parent_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }

    /// See [`permissions::ensure_writable`].
    pub fn is_writable(&self, create_dirs: bool) -> bool {
        permissions::ensure_writable(self, create_dirs)
    }
}

impl AsRef<Path> for FileTarget {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for FileTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
