//! Convenience file operations
//!
//! Copy, merge, append and string/byte helpers composed from
//! [`DurableWriter`] and the storage checks. Apart from the copy
//! functions, these report a plain `bool`/`Option` and log the cause.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{error, info};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::error::{FileIoError, FileIoResult, handle_error};
use crate::resolve::{ContentStreams, ResourceReference};
use crate::storage::permissions::{is_readable, is_writable};
use crate::storage::target::FileTarget;
use crate::transfer::durable::{DurableWriter, WriteSource};
use crate::transfer::results::WriteOutcome;
use crate::utils::validation::require_path;

/// Serializes [`DurableWriter::copy_synchronized`] across the process
static COPY_LOCK: Mutex<()> = Mutex::new(());

const BASE64_LINE_LENGTH: usize = 76;

impl DurableWriter {
    /// Copy `src` over `dst`, creating missing parent directories.
    ///
    /// Unlike the other helpers this surfaces the failure cause, including
    /// errors hit mid-copy.
    pub fn copy(&self, src: &Path, dst: &Path) -> FileIoResult<WriteOutcome> {
        require_path(src)?;
        require_path(dst)?;
        if !is_readable(src) {
            return Err(FileIoError::NotReadable(src.to_path_buf()));
        }

        let target = FileTarget::new(dst)?;
        info!("Copying {} to {}", src.display(), dst.display());
        self.write(WriteSource::File(src), &target, false)?
            .into_result()
    }

    /// [`copy`](Self::copy) under a process-wide lock: concurrent callers
    /// run one after the other, never interleaved.
    pub fn copy_synchronized(&self, src: &Path, dst: &Path) -> FileIoResult<WriteOutcome> {
        let _guard = COPY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        self.copy(src, dst)
    }

    pub fn string_to_file(&self, data: &str, dst: &Path, append: bool) -> bool {
        self.byte_array_to_file(data.as_bytes(), dst, append)
    }

    /// Append `data` to `dst`. The parent directory must already exist.
    pub fn append_string_to_file(&self, data: &str, dst: &Path) -> bool {
        if !is_writable(dst, false) {
            handle_error(&FileIoError::NotWritable(dst.to_path_buf()));
            return false;
        }
        self.string_to_file(data, dst, true)
    }

    /// Read `reader` to the end into `dst`. The reader stays owned by the
    /// caller and is not closed here.
    pub fn stream_to_file(&self, reader: &mut dyn Read, dst: &Path, append: bool) -> bool {
        self.write_reported(WriteSource::Stream(reader), dst, append)
    }

    pub fn byte_array_to_file(&self, bytes: &[u8], dst: &Path, append: bool) -> bool {
        self.write_reported(WriteSource::Bytes(bytes), dst, append)
    }

    /// Write `first` followed by `second` into `output`, replacing its contents.
    pub fn merge_files(&self, first: &Path, second: &Path, output: &Path) -> bool {
        if !is_readable(first) || !is_readable(second) {
            error!(
                "merge_files(): {} or {} is not readable",
                first.display(),
                second.display()
            );
            return false;
        }
        self.write_reported(WriteSource::Concat(first, second), output, false)
    }

    /// Append the bytes of `extra` to the end of `target`. A file is never
    /// appended to itself.
    pub fn append_file_to_file(&self, target: &Path, extra: &Path) -> bool {
        if !is_readable(target) || !is_readable(extra) {
            error!(
                "append_file_to_file(): {} or {} is not readable",
                target.display(),
                extra.display()
            );
            return false;
        }
        self.write_reported(WriteSource::File(extra), target, true)
    }

    /// Stream the resource behind `reference` into `dst`.
    ///
    /// The stream is opened through `streams` and dropped once the write is done.
    pub fn resource_to_file(
        &self,
        streams: &impl ContentStreams,
        reference: &ResourceReference,
        dst: &Path,
    ) -> bool {
        if !is_writable(dst, true) {
            handle_error(&FileIoError::NotWritable(dst.to_path_buf()));
            return false;
        }

        let mut stream = match streams.open_stream(reference) {
            Ok(stream) => stream,
            Err(e) => {
                error!("Cannot open stream for {}: {}", reference, e);
                return false;
            }
        };
        self.stream_to_file(stream.as_mut(), dst, false)
    }

    fn write_reported(&self, source: WriteSource<'_>, dst: &Path, append: bool) -> bool {
        let result = FileTarget::new(dst)
            .and_then(|target| self.write(source, &target, append))
            .and_then(WriteOutcome::into_result);

        match result {
            Ok(_) => true,
            Err(e) => {
                handle_error(&e);
                false
            }
        }
    }
}

/// Base64 encoding of a whole file, wrapped into 76-character lines each
/// ending in `\n`. The file is read into memory in one piece.
pub fn base64_encoded_file(path: &Path) -> Option<String> {
    if !is_readable(path) {
        handle_error(&FileIoError::NotReadable(path.to_path_buf()));
        return None;
    }

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    Some(wrap_lines(&STANDARD.encode(data)))
}

fn wrap_lines(encoded: &str) -> String {
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE_LENGTH + 1);
    // base64 output is ASCII, so byte chunks are char boundaries
    for line in encoded.as_bytes().chunks(BASE64_LINE_LENGTH) {
        wrapped.push_str(std::str::from_utf8(line).unwrap_or_default());
        wrapped.push('\n');
    }
    wrapped
}
