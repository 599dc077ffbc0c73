/*!
 * Common test utilities for the multi-translate test suite
 */

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use multi_translate::app_config::{ProviderConfig, ProviderKind};

// Re-export the mock providers module
pub mod mock_providers;

/// Route library log output through the test harness; RUST_LOG picks the level
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Provider configuration pointing at a local mock server
pub fn provider_config_for(kind: ProviderKind, base_uri: &str, path: &str) -> ProviderConfig {
    ProviderConfig::new(kind)
        .with_api_key("test-key")
        .with_endpoint(format!("{}{}", base_uri, path))
}
