//! Transfer module
//!
//! Durable writes into destination files and the convenience helpers
//! built on top of them.

pub mod durable;
pub mod file_ops;
pub mod results;

pub use durable::{DurableWriter, WriteSource, sync_and_close};
pub use file_ops::base64_encoded_file;
pub use results::WriteOutcome;
