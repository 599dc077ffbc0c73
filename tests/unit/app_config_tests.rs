/*!
 * Tests for application configuration functionality
 */

use multi_translate::app_config::{Config, LogLevel, OrchestratorConfig, ProviderConfig, ProviderKind};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "auto");
    assert_eq!(config.target_language, "zh");
    assert_eq!(config.providers.len(), 4);
    assert_eq!(config.orchestrator, OrchestratorConfig::default());
    assert_eq!(config.orchestrator.max_concurrent_providers, 3);
    assert_eq!(config.orchestrator.deadline_ms, None);
    assert_eq!(config.log_level, LogLevel::Info);

    let deepl = config.provider_config(ProviderKind::DeepL).expect("DeepL config should exist");
    assert_eq!(deepl.effective_quality(), 95.0);
    assert_eq!(deepl.effective_endpoint(), "https://api-free.deepl.com/v2/translate");
    assert!(!deepl.has_usable_key());

    let openai = config.provider_config(ProviderKind::OpenAI).expect("OpenAI config should exist");
    assert_eq!(openai.effective_model(), "gpt-3.5-turbo");
}

/// Test provider defaults mirror the supported services
#[test]
fn test_providerKind_defaults_shouldMatchServiceTable() {
    let qualities: Vec<f64> = ProviderKind::ALL.iter().map(|k| k.default_quality()).collect();
    assert_eq!(qualities, vec![95.0, 92.0, 90.0, 88.0]);

    assert_eq!(ProviderKind::GoogleCloud.placeholder_key(), "YOUR_GOOGLE_CLOUD_API_KEY");
    assert_eq!(ProviderKind::Microsoft.default_region(), "eastasia");
    assert_eq!(ProviderKind::GoogleCloud.to_string(), "googleCloud");
    assert_eq!(ProviderKind::GoogleCloud.display_name(), "Google Cloud");
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Invalid source language
    config.source_language = "xyz1".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();

    // Target cannot be detected
    config.target_language = "auto".to_string();
    assert!(config.validate().is_err());

    // Same language on both sides
    config.target_language = "EN".to_string();
    assert!(config.validate().is_err());
    config.target_language = "zh".to_string();
    assert!(config.validate().is_ok());

    // Quality out of range
    config.provider_config_mut(ProviderKind::DeepL).quality = Some(120.0);
    assert!(config.validate().is_err());
    config.provider_config_mut(ProviderKind::DeepL).quality = None;

    // Zero providers per request
    config.orchestrator.max_concurrent_providers = 0;
    assert!(config.validate().is_err());
    config.orchestrator.max_concurrent_providers = 2;

    // Duplicate provider entries
    config.providers.push(ProviderConfig::new(ProviderKind::OpenAI));
    assert!(config.validate().is_err());
}

/// Test configuration round trip through JSON keeps overrides
#[test]
fn test_config_serialization_withOverrides_shouldRoundTrip() {
    let mut config = Config::default();
    config.provider_config_mut(ProviderKind::Microsoft).region = "westeurope".to_string();
    config.provider_config_mut(ProviderKind::OpenAI).quality = Some(97.0);
    config.orchestrator.deadline_ms = Some(2500);
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"type\":\"googleCloud\""));

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.provider_config(ProviderKind::Microsoft).unwrap().effective_region(), "westeurope");
    assert_eq!(parsed.provider_config(ProviderKind::OpenAI).unwrap().effective_quality(), 97.0);
    assert_eq!(parsed.orchestrator.deadline_ms, Some(2500));
    assert_eq!(parsed.log_level, LogLevel::Debug);
}

/// Test an empty endpoint falls back to the public service
#[test]
fn test_providerConfig_withBlankFields_shouldUseDefaults() {
    let config: ProviderConfig = serde_json::from_str(r#"{"type":"deepl","endpoint":"  "}"#).unwrap();
    assert_eq!(config.effective_endpoint(), "https://api-free.deepl.com/v2/translate");
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.effective_region(), "");
}

/// Test provider_config_mut inserts missing entries
#[test]
fn test_providerConfigMut_withMissingProvider_shouldInsertDefault() {
    let mut config = Config {
        providers: Vec::new(),
        ..Config::default()
    };

    config.provider_config_mut(ProviderKind::GoogleCloud).api_key = "g".to_string();
    assert_eq!(config.providers.len(), 1);
    assert_eq!(config.usable_providers().count(), 1);
}
