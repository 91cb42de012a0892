//! Logging utilities
//!
//! The library only emits through the `log` facade; embedding applications
//! call [`setup_logging`] to get `env_logger` output driven by `RUST_LOG`.

/// Install `env_logger` as the global logger.
///
/// Returns `false` if a logger was already installed.
pub fn setup_logging() -> bool {
    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_refused() {
        let _ = setup_logging();
        assert!(!setup_logging());
    }
}
