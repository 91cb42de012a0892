//! Error handling
//!
//! Defines the error taxonomy and logging helpers for file I/O operations.

pub mod handlers;
pub mod types;

pub use handlers::{handle_error, is_fatal};
pub use types::*;
