/*!
 * Persisted API keys.
 *
 * Keys live in `translation_api_keys.json` under the user configuration
 * directory, as a flat provider name to key map:
 *
 * ```json
 * { "deepl": "...", "openai": "...", "microsoft": "...", "googleCloud": "...", "googleVision": "..." }
 * ```
 *
 * The store is read on every CLI invocation and overlaid onto the providers of
 * `conf.json`, so a newly saved key takes effect on the next request.
 */

use anyhow::{Context, Result, anyhow};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, ProviderKind};

/// Directory created under the user configuration directory
pub const KEY_STORE_DIRNAME: &str = "multi-translate";

/// File name of the key store
pub const KEY_STORE_FILENAME: &str = "translation_api_keys.json";

/// Key store entry holding the Google Vision OCR key
pub const VISION_KEY_NAME: &str = "googleVision";

/// Provider name to API key map backed by a JSON file
#[derive(Debug, Clone)]
pub struct ApiKeyStore {
    path: PathBuf,
    keys: BTreeMap<String, String>,
}

impl ApiKeyStore {
    /// Get the default key store path
    pub fn default_path() -> Result<PathBuf> {
        let base_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .ok_or_else(|| anyhow!("Could not determine configuration directory"))?;

        Ok(base_dir.join(KEY_STORE_DIRNAME).join(KEY_STORE_FILENAME))
    }

    /// Open the store at the default location
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open a store; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let keys = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .context(format!("Failed to read key store: {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .context(format!("Failed to parse key store: {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Loaded {} API key(s) from {}", keys.len(), path.display());
        Ok(Self { path, keys })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.keys.get(name).map(String::as_str)
    }

    /// Store a key under its canonical name and return that name
    pub fn set(&mut self, name: &str, key: impl Into<String>) -> Result<String> {
        let name = canonical_key_name(name)?;
        let key = key.into();
        if key.trim().is_empty() {
            return Err(anyhow!("API key for '{}' is empty", name));
        }
        self.keys.insert(name.clone(), key.trim().to_string());
        Ok(name)
    }

    /// Remove a key, returning whether one was stored
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        let name = canonical_key_name(name)?;
        Ok(self.keys.remove(&name).is_some())
    }

    /// Stored names with masked keys, for display
    pub fn masked_entries(&self) -> Vec<(String, String)> {
        self.keys
            .iter()
            .map(|(name, key)| (name.clone(), mask_key(key)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Write the store, creating the parent directory if needed
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(&self.keys)
            .context("Failed to serialize key store")?;
        std::fs::write(&self.path, json)
            .context(format!("Failed to write key store: {}", self.path.display()))?;

        Ok(())
    }

    /// Overlay stored keys onto the configuration; stored keys win over conf.json
    pub fn apply_to(&self, config: &mut Config) {
        for kind in ProviderKind::ALL {
            if let Some(key) = self.get(kind.key_name()) {
                config.provider_config_mut(kind).api_key = key.to_string();
            }
        }

        if let Some(key) = self.get(VISION_KEY_NAME) {
            config.ocr.api_key = key.to_string();
        }
    }
}

/// Resolve user input such as `google` or `DeepL` to the stored entry name
pub fn canonical_key_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.eq_ignore_ascii_case(VISION_KEY_NAME)
        || trimmed.eq_ignore_ascii_case("vision")
        || trimmed.eq_ignore_ascii_case("ocr")
    {
        return Ok(VISION_KEY_NAME.to_string());
    }

    let kind: ProviderKind = trimmed
        .parse()
        .map_err(|_| anyhow!("Unknown key name '{}': expected a provider or '{}'", name, VISION_KEY_NAME))?;
    Ok(kind.key_name().to_string())
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    if key.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
