use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn temp_store_path() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let store_path = temp_dir.path().join("settings.json");
    (temp_dir, store_path)
}

/// The `taxwise` binary with a clean, offline, colourless environment
#[allow(dead_code)]
pub fn taxwise_cmd() -> Command {
    let mut cmd = Command::cargo_bin("taxwise").expect("binary should build");
    cmd.env("NO_COLOR", "1")
        .env_remove("GROQ_API_KEY")
        .env_remove("TAXWISE_PROVIDER")
        .env_remove("TAXWISE_GROQ_MODEL")
        .env_remove("TAXWISE_GROQ_API_BASE")
        .env_remove("TAXWISE_STORAGE_PATH")
        .env_remove("RUST_LOG");
    cmd
}
