//! File system operations
//!
//! Directory-level helpers: existence checks, bulk deletion and
//! extension-filtered listings.

use log::{error, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Check if `path` exists and is not a directory
pub fn is_file_exists(path: &Path) -> bool {
    path.exists() && !path.is_dir()
}

/// Delete every file and subdirectory below `directory`, keeping `directory`.
///
/// Keeps going after a failed deletion; returns `false` if at least one
/// entry could not be removed.
pub fn delete_files_and_dirs_recursive(directory: &Path) -> bool {
    if !directory.is_dir() {
        error!(
            "delete_files_and_dirs_recursive(): {} is not a directory",
            directory.display()
        );
        return false;
    }
    delete_children(directory)
}

fn delete_children(directory: &Path) -> bool {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to list {}: {}", directory.display(), e);
            return false;
        }
    };

    let mut all_deleted = true;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry in {}: {}", directory.display(), e);
                all_deleted = false;
                continue;
            }
        };
        all_deleted &= delete_entry(&entry.path());
    }
    all_deleted
}

fn delete_entry(path: &Path) -> bool {
    // symlink_metadata: a link to a directory is removed, never followed
    let is_dir = fs::symlink_metadata(path)
        .map(|m| m.is_dir())
        .unwrap_or(false);

    let result = if is_dir {
        let children_deleted = delete_children(path);
        fs::remove_dir(path).map(|_| children_deleted)
    } else {
        fs::remove_file(path).map(|_| true)
    };

    match result {
        Ok(deleted) => deleted,
        Err(e) => {
            warn!("Failed to delete {}: {}", path.display(), e);
            false
        }
    }
}

/// Delete the regular files directly inside `directory`; subdirectories are left alone.
pub fn delete_files(directory: &Path) -> bool {
    if !directory.is_dir() {
        error!("delete_files(): {} is not a directory", directory.display());
        return false;
    }

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            error!("delete_files(): cannot list {}: {}", directory.display(), e);
            return false;
        }
    };

    let mut all_deleted = true;
    for path in entries.flatten().map(|entry| entry.path()) {
        if !path.is_file() {
            continue;
        }
        if let Err(e) = fs::remove_file(&path) {
            warn!("Failed to delete {}: {}", path.display(), e);
            all_deleted = false;
        }
    }
    all_deleted
}

/// Matches file names by their trailing extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffix: String,
}

impl ExtensionFilter {
    /// `ext` may be given with or without the leading dot ("png" or ".png").
    pub fn new(ext: &str) -> Self {
        let suffix = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        };
        Self { suffix }
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix)
    }
}

/// Names of the entries in `directory` ending with `extension`.
///
/// `None` if `directory` is not a directory or `extension` is empty.
pub fn filenames_by_extension(directory: &Path, extension: &str) -> Option<Vec<String>> {
    let filter = listing_filter(directory, extension)?;
    let entries = fs::read_dir(directory).ok()?;

    let names = entries
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| filter.accepts(name))
        .collect();
    Some(names)
}

/// Full paths of the entries in `directory` ending with `extension`.
pub fn files_by_extension(directory: &Path, extension: &str) -> Option<Vec<PathBuf>> {
    let filter = listing_filter(directory, extension)?;
    let entries = fs::read_dir(directory).ok()?;

    let files = entries
        .flatten()
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| filter.accepts(name))
        })
        .map(|entry| entry.path())
        .collect();
    Some(files)
}

fn listing_filter(directory: &Path, extension: &str) -> Option<ExtensionFilter> {
    if !directory.is_dir() || extension.is_empty() {
        error!(
            "Listing by extension: {} is not a directory or extension is empty",
            directory.display()
        );
        return None;
    }
    Some(ExtensionFilter::new(extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_normalizes_leading_dot() {
        assert_eq!(ExtensionFilter::new("png"), ExtensionFilter::new(".png"));
        assert!(ExtensionFilter::new("png").accepts("photo.png"));
        assert!(!ExtensionFilter::new("png").accepts("photo.jpeg"));
        assert!(!ExtensionFilter::new("png").accepts("png"));
    }
}
