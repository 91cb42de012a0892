//! Destination preparation
//!
//! Makes sure a target file's parent chain exists and probes whether the
//! file could be written, without ever opening it for writing.

use log::{debug, warn};
use std::fs::{self, File, OpenOptions};
use std::path::Path;

use crate::storage::target::FileTarget;
use crate::utils::validation::is_valid_path_str;

/// Create the parent directories of `path` if missing.
///
/// Unlike a bare `create_dir_all`, an already existing chain counts as
/// success; `false` means the chain could not be created.
pub fn make_dirs_for_file(path: &Path) -> bool {
    match FileTarget::new(path) {
        Ok(target) => make_parent_dirs(&target),
        Err(e) => {
            warn!("make_dirs_for_file(): {}", e);
            false
        }
    }
}

fn make_parent_dirs(target: &FileTarget) -> bool {
    let Some(parent) = target.parent_dir() else {
        return true;
    };

    if parent.exists() {
        debug!("Parent {} already exists", parent.display());
        return parent.is_dir();
    }

    if let Err(e) = fs::create_dir_all(parent) {
        warn!("Failed to create directories {}: {}", parent.display(), e);
    }

    let created = parent.is_dir();
    debug!("Created parent chain {}: {}", parent.display(), created);
    created
}

/// Whether `target` could be written, optionally creating its parent chain.
///
/// - no parent component: writable unless the probe below fails
/// - missing parent: `false`, or the result of creating it when `create_dirs`
/// - existing file: whether this process may write it (`access(2)` on unix)
/// - missing file: create it, then delete it; both must succeed
///
/// The create/delete probe races with concurrent callers on the same path.
/// A probe file that cannot be deleted again reports not-writable.
pub fn ensure_writable(target: &FileTarget, create_dirs: bool) -> bool {
    if let Some(parent) = target.parent_dir() {
        if !parent.exists() {
            return create_dirs && make_parent_dirs(target);
        }
    }

    let path = target.path();
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => {
            debug!("{} is a directory, not a file destination", path.display());
            false
        }
        Ok(metadata) => can_write(path, &metadata),
        Err(_) => probe_create_delete(path),
    }
}

/// Whether this process may open the existing file `path` for writing
#[cfg(unix)]
fn can_write(path: &Path, _metadata: &fs::Metadata) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    let rc = unsafe { libc::access(c_path.as_ptr(), libc::W_OK) };
    if rc != 0 {
        debug!(
            "{} is not writable: {}",
            path.display(),
            std::io::Error::last_os_error()
        );
    }
    rc == 0
}

#[cfg(not(unix))]
fn can_write(_path: &Path, metadata: &fs::Metadata) -> bool {
    !metadata.permissions().readonly()
}

fn probe_create_delete(path: &Path) -> bool {
    let created = OpenOptions::new().write(true).create_new(true).open(path);
    match created {
        Ok(file) => {
            drop(file);
            match fs::remove_file(path) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Writability probe left {} behind: {}", path.display(), e);
                    false
                }
            }
        }
        Err(e) => {
            debug!("Writability probe on {} failed: {}", path.display(), e);
            false
        }
    }
}

/// Path-string form of [`ensure_writable`]; an empty string is not writable.
pub fn is_writable(path: &Path, create_dirs: bool) -> bool {
    match FileTarget::new(path) {
        Ok(target) => ensure_writable(&target, create_dirs),
        Err(e) => {
            warn!("is_writable(): {}", e);
            false
        }
    }
}

pub fn is_writable_path(path: &str, create_dirs: bool) -> bool {
    if !is_valid_path_str(path) {
        warn!("is_writable(): empty or invalid path given");
        return false;
    }
    is_writable(Path::new(path), create_dirs)
}

/// Whether `path` is an existing regular file that can be opened for reading
pub fn is_readable(path: &Path) -> bool {
    if !path.is_file() {
        debug!("{} is not a readable file", path.display());
        return false;
    }
    File::open(path).is_ok()
}
