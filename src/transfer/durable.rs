//! Durable writes
//!
//! Writes a byte source into a destination file and forces the bytes to
//! stable storage before the handle is released. Some filesystems keep
//! written data in buffers that a plain close does not persist, so the
//! `fsync` has to happen while the write handle is still open.
//!
//! Failures while copying are captured in the returned [`WriteOutcome`]
//! rather than aborting the cleanup sequence. A failed write leaves the
//! destination as far as it got; nothing is rolled back.

use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::config::TransferConfig;
use crate::error::{FileIoError, FileIoResult, handle_error};
use crate::storage::permissions::{ensure_writable, is_readable};
use crate::storage::target::FileTarget;
use crate::transfer::results::WriteOutcome;

/// Where the bytes of a durable write come from
pub enum WriteSource<'a> {
    /// An in-memory payload
    Bytes(&'a [u8]),
    /// A reader owned by the caller; it is read to the end but never closed here
    Stream(&'a mut dyn Read),
    /// A single existing file
    File(&'a Path),
    /// The bytes of `first` immediately followed by the bytes of `second`
    Concat(&'a Path, &'a Path),
}

/// Copies sources into destination files with a durability barrier
#[derive(Debug, Clone)]
pub struct DurableWriter {
    buffer_size: usize,
}

impl Default for DurableWriter {
    fn default() -> Self {
        Self::new(&TransferConfig::default())
    }
}

impl DurableWriter {
    pub fn new(config: &TransferConfig) -> Self {
        Self::with_buffer_size(config.buffer_size)
    }

    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Write `source` into `destination`, truncating it unless `append` is set.
    ///
    /// Returns `Err` only for problems detected before any byte is copied
    /// (unreadable source, a source that is the destination itself,
    /// unwritable destination, open failure). Errors during the copy end up
    /// in [`WriteOutcome::failure`].
    pub fn write(
        &self,
        source: WriteSource<'_>,
        destination: &FileTarget,
        append: bool,
    ) -> FileIoResult<WriteOutcome> {
        match source {
            WriteSource::Bytes(data) => {
                let mut reader = data;
                self.write_from(&mut reader, destination, append)
            }
            WriteSource::Stream(reader) => self.write_from(reader, destination, append),
            WriteSource::File(path) => {
                reject_self_copy(path, destination)?;
                let mut file = open_source(path)?;
                self.write_from(&mut file, destination, append)
            }
            WriteSource::Concat(first, second) => {
                reject_self_copy(first, destination)?;
                reject_self_copy(second, destination)?;
                let first = open_source(first)?;
                let second = open_source(second)?;
                let mut chained = first.chain(second);
                self.write_from(&mut chained, destination, append)
            }
        }
    }

    fn write_from(
        &self,
        reader: &mut dyn Read,
        destination: &FileTarget,
        append: bool,
    ) -> FileIoResult<WriteOutcome> {
        if !ensure_writable(destination, true) {
            return Err(FileIoError::NotWritable(destination.path().to_path_buf()));
        }

        let path = destination.path();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|e| FileIoError::transfer(path, e))?;

        debug!(
            "Writing into {} (append: {}, chunk: {} bytes)",
            path.display(),
            append,
            self.buffer_size
        );

        let mut handle = SyncedHandle::new(file, path);
        let mut buffer = vec![0u8; self.buffer_size];
        let mut bytes_written = 0u64;
        let mut failure = None;

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    failure = Some(FileIoError::transfer(path, e));
                    break;
                }
            };

            if let Err(e) = handle.write_all(&buffer[..n]) {
                failure = Some(FileIoError::transfer(path, e));
                break;
            }
            bytes_written += n as u64;
        }

        let synced = handle.finish();

        match &failure {
            None => info!(
                "Wrote {} bytes to {} (synced: {})",
                bytes_written,
                path.display(),
                synced
            ),
            Some(e) => warn!(
                "Write to {} stopped after {} bytes: {}",
                path.display(),
                bytes_written,
                e
            ),
        }

        Ok(WriteOutcome {
            destination: path.to_path_buf(),
            bytes_written,
            synced,
            failure,
        })
    }
}

/// Opening the destination truncates or extends it, so it can never also
/// be read as a source.
fn reject_self_copy(source: &Path, destination: &FileTarget) -> FileIoResult<()> {
    if is_same_file(source, destination.path()) {
        return Err(FileIoError::InvalidArgument(format!(
            "{} is both source and destination",
            source.display()
        )));
    }
    Ok(())
}

/// Whether both paths name the same existing file
pub(crate) fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn open_source(path: &Path) -> FileIoResult<File> {
    if !is_readable(path) {
        return Err(FileIoError::NotReadable(path.to_path_buf()));
    }
    File::open(path).map_err(|e| {
        debug!("Opening {} failed: {}", path.display(), e);
        FileIoError::NotReadable(path.to_path_buf())
    })
}

/// Flush `file`, force it to stable storage and close it.
///
/// Returns whether the sync succeeded; a rejected sync is logged and the
/// handle is closed regardless.
pub fn sync_and_close(file: File, path: &Path) -> bool {
    SyncedHandle::new(file, path).finish()
}

/// Destination handle that is flushed, synced and closed exactly once,
/// on [`finish`](SyncedHandle::finish) or on drop, whichever comes first.
struct SyncedHandle<'a> {
    file: Option<File>,
    path: &'a Path,
}

impl<'a> SyncedHandle<'a> {
    fn new(file: File, path: &'a Path) -> Self {
        Self {
            file: Some(file),
            path,
        }
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.write_all(data),
            None => Err(io::Error::other("destination handle already released")),
        }
    }

    /// Release the handle; returns whether the durability barrier succeeded.
    fn finish(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        let Some(mut file) = self.file.take() else {
            return false;
        };

        if let Err(e) = file.flush() {
            warn!("Flush of {} failed: {}", self.path.display(), e);
        }

        let synced = match file.sync_all() {
            Ok(()) => true,
            Err(source) => {
                handle_error(&FileIoError::Sync {
                    path: self.path.to_path_buf(),
                    source,
                });
                false
            }
        };

        drop(file);
        synced
    }
}

impl Drop for SyncedHandle<'_> {
    fn drop(&mut self) {
        if self.file.is_some() {
            self.release();
        }
    }
}
