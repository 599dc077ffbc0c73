/*!
 * Integration tests for the configuration file and the key store together
 */

use anyhow::Result;

use multi_translate::app_config::{Config, ProviderKind};
use multi_translate::key_store::{ApiKeyStore, KEY_STORE_FILENAME};
use multi_translate::translation::TranslationOrchestrator;

use crate::common;

/// Test a missing conf.json is created with defaults and reloads identically
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(created.providers.len(), ProviderKind::ALL.len());
    assert!(created.usable_providers().next().is_none());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.target_language, created.target_language);
    assert_eq!(reloaded.glossary.terms.len(), created.glossary.terms.len());
    assert!(reloaded.validate().is_ok());
    Ok(())
}

/// Test a partial file is filled in with defaults
#[test]
fn test_load_withPartialFile_shouldApplyDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{ "target_language": "ja", "providers": [ { "type": "deepl", "api_key": "k" } ] }"#,
    )?;

    let config = Config::load(&path)?;
    assert_eq!(config.target_language, "ja");
    assert_eq!(config.providers.len(), 1);
    assert_eq!(config.providers[0].effective_quality(), 95.0);
    assert!(config.orchestrator.max_concurrent_providers >= 1);
    Ok(())
}

/// Test stored keys enable providers and drive provider selection
#[test]
fn test_keyStore_appliedToConfig_shouldSelectKeyedProvidersByQuality() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let config_path = dir.path().join("conf.json");
    let mut config = Config::load_or_create(&config_path)?;

    let mut store = ApiKeyStore::open(dir.path().join(KEY_STORE_FILENAME))?;
    store.set("google", "google-key")?;
    store.set("deepl", "deepl-key")?;
    store.set("vision", "vision-key")?;
    store.save()?;

    let store = ApiKeyStore::open(store.path())?;
    store.apply_to(&mut config);

    assert!(config.ocr.has_usable_key());
    let usable: Vec<ProviderKind> = config.usable_providers().map(|p| p.provider_type).collect();
    assert_eq!(usable.len(), 2);

    let orchestrator = TranslationOrchestrator::from_config(&config)?;
    let selected = orchestrator.select_providers(&config.providers);
    let names: Vec<&str> = selected.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["DeepL", "Google Cloud"]);
    Ok(())
}

/// Test stored keys win over keys written in conf.json
#[test]
fn test_keyStore_withKeyInBothPlaces_shouldPreferStoredKey() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let mut config = Config::default();
    config.provider_config_mut(ProviderKind::OpenAI).api_key = "from-conf".to_string();

    let mut store = ApiKeyStore::open(dir.path().join(KEY_STORE_FILENAME))?;
    store.set("openai", "from-store")?;
    store.apply_to(&mut config);

    let openai = config.provider_config(ProviderKind::OpenAI).map(|p| p.api_key.as_str());
    assert_eq!(openai, Some("from-store"));
    Ok(())
}

/// Test the selection cap from configuration
#[test]
fn test_selectProviders_withCap_shouldLimitCount() -> Result<()> {
    let mut config = Config::default();
    for kind in ProviderKind::ALL {
        config.provider_config_mut(kind).api_key = format!("{}-key", kind.key_name());
    }
    config.orchestrator.max_concurrent_providers = 2;

    let orchestrator = TranslationOrchestrator::from_config(&config)?;
    let names: Vec<String> = orchestrator
        .select_providers(&config.providers)
        .iter()
        .map(|p| p.name().to_string())
        .collect();

    assert_eq!(names, vec!["DeepL".to_string(), "OpenAI".to_string()]);
    Ok(())
}
