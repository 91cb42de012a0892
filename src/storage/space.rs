//! Free space queries
//!
//! Available space is read through the [`SpaceQuery`] capability so callers
//! and tests can substitute their own source.

use log::warn;
use std::path::Path;

/// Reports the bytes available to unprivileged writers on the volume holding a path
pub trait SpaceQuery {
    /// `None` when the volume is unavailable (unmounted, removed, unsupported).
    fn available_bytes(&self, path: &Path) -> Option<u64>;
}

/// [`SpaceQuery`] backed by `statvfs(3)`
#[derive(Debug, Clone, Copy, Default)]
pub struct StatvfsSpace;

#[cfg(unix)]
impl SpaceQuery for StatvfsSpace {
    fn available_bytes(&self, path: &Path) -> Option<u64> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(path.as_os_str().as_bytes()).ok()?;
        let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
        if rc != 0 {
            warn!(
                "statvfs({}) failed: {}",
                path.display(),
                std::io::Error::last_os_error()
            );
            return None;
        }

        #[allow(clippy::unnecessary_cast)]
        let available = (stat.f_bavail as u64).saturating_mul(stat.f_frsize as u64);
        Some(available)
    }
}

#[cfg(not(unix))]
impl SpaceQuery for StatvfsSpace {
    fn available_bytes(&self, path: &Path) -> Option<u64> {
        warn!("Free space query unsupported here ({})", path.display());
        None
    }
}

/// Free bytes at `path`; a path that does not exist yet is measured at its parent.
pub fn available_space(query: &impl SpaceQuery, path: &Path) -> Option<u64> {
    if path.exists() {
        return query.available_bytes(path);
    }
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty())?;
    query.available_bytes(parent)
}
