//! Configuration management for rax-fileio
//!
//! Separates transfer tuning (chunk size) from the provider table used to
//! resolve resource references. Both sections are optional; anything not
//! set in `fileio.toml` or the environment falls back to the defaults.

use config::{Config, Environment, File};
use serde::Deserialize;

/// Default name of the optional config file (`fileio.toml`)
pub const DEFAULT_CONFIG_NAME: &str = "fileio";

/// Environment prefix for overrides, e.g. `RAX_FILEIO_BUFFER_SIZE`
pub const ENV_PREFIX: &str = "RAX_FILEIO";

const MAX_BUFFER_SIZE: usize = 1024 * 1024;

/// Complete file I/O configuration
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FileIoConfig {
    #[serde(flatten)]
    pub transfer: TransferConfig,

    #[serde(flatten)]
    pub providers: ProviderConfig,
}

/// Settings for the durable writer
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TransferConfig {
    /// Chunk size used when copying bytes into a destination
    pub buffer_size: usize,
}

/// Addresses of the well-known providers a resource reference may come from
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Root of the primary external storage volume
    pub external_storage_root: String,

    /// Base content address of public downloads; row ids are appended to it
    pub downloads_base_address: String,

    pub image_collection_address: String,
    pub video_collection_address: String,
    pub audio_collection_address: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self { buffer_size: 4096 }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            external_storage_root: "/storage/emulated/0".to_string(),
            downloads_base_address: "content://downloads/public_downloads".to_string(),
            image_collection_address: "content://media/external/images/media".to_string(),
            video_collection_address: "content://media/external/video/media".to_string(),
            audio_collection_address: "content://media/external/audio/media".to_string(),
        }
    }
}

impl FileIoConfig {
    /// Load `fileio.toml` from the working directory with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_NAME)
    }

    /// Load from the given file (extension optional) with environment overrides.
    /// A missing file is not an error.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: FileIoConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.transfer.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        if self.transfer.buffer_size > MAX_BUFFER_SIZE {
            return Err(config::ConfigError::Message(format!(
                "buffer_size must not exceed {MAX_BUFFER_SIZE} bytes"
            )));
        }

        let providers = &self.providers;
        let required = [
            ("external_storage_root", &providers.external_storage_root),
            ("downloads_base_address", &providers.downloads_base_address),
            ("image_collection_address", &providers.image_collection_address),
            ("video_collection_address", &providers.video_collection_address),
            ("audio_collection_address", &providers.audio_collection_address),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(config::ConfigError::Message(format!(
                    "{name} cannot be empty"
                )));
            }
        }

        Ok(())
    }
}
