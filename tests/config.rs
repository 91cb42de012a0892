use std::fs;

use rax_fileio::FileIoConfig;
use rax_fileio::config::{ProviderConfig, TransferConfig};
use tempfile::TempDir;

#[test]
fn defaults_are_valid() {
    let config = FileIoConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.transfer.buffer_size, 4096);
    assert_eq!(config.providers.external_storage_root, "/storage/emulated/0");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let config = FileIoConfig::load_from(missing.to_str().unwrap()).unwrap();
    assert_eq!(config, FileIoConfig::default());
}

#[test]
fn toml_file_overrides_selected_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fileio.toml");
    fs::write(
        &path,
        "buffer_size = 1024\nexternal_storage_root = \"/mnt/sdcard\"\n",
    )
    .unwrap();

    let config = FileIoConfig::load_from(path.to_str().unwrap()).unwrap();
    assert_eq!(config.transfer.buffer_size, 1024);
    assert_eq!(config.providers.external_storage_root, "/mnt/sdcard");
    assert_eq!(
        config.providers.downloads_base_address,
        ProviderConfig::default().downloads_base_address
    );
}

#[test]
fn zero_buffer_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fileio.toml");
    fs::write(&path, "buffer_size = 0\n").unwrap();

    assert!(FileIoConfig::load_from(path.to_str().unwrap()).is_err());
}

#[test]
fn empty_provider_address_is_rejected() {
    let config = FileIoConfig {
        transfer: TransferConfig::default(),
        providers: ProviderConfig {
            image_collection_address: " ".into(),
            ..ProviderConfig::default()
        },
    };
    assert!(config.validate().is_err());
}
