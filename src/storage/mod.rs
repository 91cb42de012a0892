//! File system storage management
//!
//! Destination preparation, directory helpers and free space queries.

pub mod filesystem;
pub mod permissions;
pub mod space;
pub mod target;

pub use filesystem::{
    ExtensionFilter, delete_files, delete_files_and_dirs_recursive, filenames_by_extension,
    files_by_extension, is_file_exists,
};
pub use permissions::{
    ensure_writable, is_readable, is_writable, is_writable_path, make_dirs_for_file,
};
pub use space::{SpaceQuery, StatvfsSpace, available_space};
pub use target::FileTarget;
