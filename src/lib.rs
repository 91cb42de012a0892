//! RAX FileIO
//!
//! Durable file writes and resource-reference resolution for sandboxed
//! platforms where raw paths are often unavailable.

pub mod config;
pub mod error;
pub mod resolve;
pub mod storage;
pub mod transfer;
pub mod utils;

pub use config::FileIoConfig;
pub use error::{ErrorKind, FileIoError, FileIoResult};
pub use resolve::{ResourceReference, ResourceResolver};
pub use storage::FileTarget;
pub use transfer::{DurableWriter, WriteOutcome, WriteSource};
