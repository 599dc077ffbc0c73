use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::language_utils;
use crate::translation::glossary::{self, Glossary, GlossaryEntry};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default source language code (ISO), or `auto`
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Default target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Remote translation services
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    /// Fan-out settings
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    /// Terminology dictionary
    #[serde(default)]
    pub glossary: GlossaryConfig,

    /// Text extraction from images
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    // @provider: DeepL
    #[serde(rename = "deepl")]
    DeepL,
    // @provider: OpenAI chat completions
    #[serde(rename = "openai")]
    OpenAI,
    // @provider: Microsoft Translator
    #[serde(rename = "microsoft")]
    Microsoft,
    // @provider: Google Cloud Translation v2
    #[serde(rename = "googleCloud")]
    GoogleCloud,
}

impl ProviderKind {
    /// Every supported provider, in default quality order
    pub const ALL: [ProviderKind; 4] = [Self::DeepL, Self::OpenAI, Self::Microsoft, Self::GoogleCloud];

    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DeepL => "DeepL",
            Self::OpenAI => "OpenAI",
            Self::Microsoft => "Microsoft",
            Self::GoogleCloud => "Google Cloud",
        }
    }

    // @returns: Identifier used in conf.json and the key store
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::DeepL => "deepl",
            Self::OpenAI => "openai",
            Self::Microsoft => "microsoft",
            Self::GoogleCloud => "googleCloud",
        }
    }

    /// Value shipped in sample configurations; never a real credential
    pub fn placeholder_key(&self) -> &'static str {
        match self {
            Self::DeepL => "YOUR_DEEPL_API_KEY",
            Self::OpenAI => "YOUR_OPENAI_API_KEY",
            Self::Microsoft => "YOUR_MICROSOFT_API_KEY",
            Self::GoogleCloud => "YOUR_GOOGLE_CLOUD_API_KEY",
        }
    }

    pub fn default_quality(&self) -> f64 {
        match self {
            Self::DeepL => 95.0,
            Self::OpenAI => 92.0,
            Self::Microsoft => 90.0,
            Self::GoogleCloud => 88.0,
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::DeepL => "https://api-free.deepl.com/v2/translate",
            Self::OpenAI => "https://api.openai.com/v1/chat/completions",
            Self::Microsoft => "https://api.cognitive.microsofttranslator.com/translate",
            Self::GoogleCloud => "https://translation.googleapis.com/language/translate/v2",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAI => "gpt-3.5-turbo",
            _ => "",
        }
    }

    pub fn default_region(&self) -> &'static str {
        match self {
            Self::Microsoft => "eastasia",
            _ => "",
        }
    }
}

// Implement Display trait for ProviderKind
impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key_name())
    }
}

// Implement FromStr trait for ProviderKind
impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "deepl" => Ok(Self::DeepL),
            "openai" | "chatgpt" => Ok(Self::OpenAI),
            "microsoft" | "azure" => Ok(Self::Microsoft),
            "google" | "googlecloud" | "google-cloud" => Ok(Self::GoogleCloud),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: ProviderKind,

    // @field: API key; empty or placeholder disables the provider
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL, empty for the public endpoint
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Model name (OpenAI only)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: Resource region (Microsoft only)
    #[serde(default = "String::new")]
    pub region: String,

    // @field: Base quality override, 0-100
    #[serde(default)]
    pub quality: Option<f64>,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults and no key
    pub fn new(provider_type: ProviderKind) -> Self {
        Self {
            provider_type,
            api_key: String::new(),
            endpoint: provider_type.default_endpoint().to_string(),
            model: provider_type.default_model().to_string(),
            region: provider_type.default_region().to_string(),
            quality: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Whether the key is non-empty and not the shipped placeholder
    pub fn has_usable_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != self.provider_type.placeholder_key()
    }

    /// Configured quality, or the provider default
    pub fn effective_quality(&self) -> f64 {
        self.quality.unwrap_or_else(|| self.provider_type.default_quality())
    }

    pub fn effective_endpoint(&self) -> String {
        non_empty_or(&self.endpoint, self.provider_type.default_endpoint())
    }

    pub fn effective_model(&self) -> String {
        non_empty_or(&self.model, self.provider_type.default_model())
    }

    pub fn effective_region(&self) -> String {
        non_empty_or(&self.region, self.provider_type.default_region())
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.trim().to_string()
    }
}

/// Multi-provider fan-out settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// Upper bound on providers queried per request
    #[serde(default = "default_max_concurrent_providers")]
    pub max_concurrent_providers: usize,

    /// Overall deadline for the fan-out in milliseconds; outstanding calls are abandoned
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_providers: default_max_concurrent_providers(),
            deadline_ms: None,
        }
    }
}

/// Terminology dictionary configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlossaryConfig {
    /// Language the dictionary translations are written in
    #[serde(default = "default_glossary_target")]
    pub target_language: String,

    /// Source term to translation pairs
    #[serde(default = "glossary::default_entries")]
    pub terms: Vec<GlossaryEntry>,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            target_language: default_glossary_target(),
            terms: glossary::default_entries(),
        }
    }
}

impl GlossaryConfig {
    /// Compile the configured dictionary
    pub fn build(&self) -> Result<Glossary> {
        Glossary::new(self.terms.clone(), self.target_language.clone())
            .context("Failed to compile glossary terms")
    }
}

/// Google Cloud Vision text detection configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OcrConfig {
    /// API key; also read from the key store entry `googleVision`
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service base URL
    #[serde(default = "default_vision_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_vision_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Placeholder shipped for the OCR key
pub const VISION_PLACEHOLDER_KEY: &str = "YOUR_GOOGLE_VISION_API_KEY";

impl OcrConfig {
    pub fn has_usable_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != VISION_PLACEHOLDER_KEY
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    language_utils::AUTO.to_string()
}

fn default_target_language() -> String {
    "zh".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_concurrent_providers() -> usize {
    3
}

fn default_glossary_target() -> String {
    glossary::DEFAULT_GLOSSARY_TARGET.to_string()
}

fn default_vision_endpoint() -> String {
    "https://vision.googleapis.com".to_string()
}

fn default_providers() -> Vec<ProviderConfig> {
    ProviderKind::ALL.iter().map(|kind| ProviderConfig::new(*kind)).collect()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)
            .context("Invalid source language")?;
        language_utils::validate_language_code(&self.target_language)
            .context("Invalid target language")?;

        if language_utils::is_auto(&self.target_language) {
            return Err(anyhow!("Target language cannot be '{}'", language_utils::AUTO));
        }

        if language_utils::language_codes_match(&self.source_language, &self.target_language) {
            return Err(anyhow!(
                "Source and target language are both '{}'",
                self.target_language
            ));
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if !seen.insert(provider.provider_type) {
                return Err(anyhow!(
                    "Provider '{}' is configured more than once",
                    provider.provider_type
                ));
            }

            let quality = provider.effective_quality();
            if !(0.0..=100.0).contains(&quality) {
                return Err(anyhow!(
                    "Quality for provider '{}' must be between 0 and 100, got {}",
                    provider.provider_type,
                    quality
                ));
            }

            if provider.timeout_secs == 0 {
                return Err(anyhow!(
                    "Timeout for provider '{}' must be greater than zero",
                    provider.provider_type
                ));
            }
        }

        if self.orchestrator.max_concurrent_providers == 0 {
            return Err(anyhow!("max_concurrent_providers must be at least 1"));
        }

        language_utils::validate_language_code(&self.glossary.target_language)
            .context("Invalid glossary target language")?;

        if self.usable_providers().next().is_none() {
            warn!("No provider has an API key configured; translation requests will fail");
        }

        Ok(())
    }

    /// Get a specific provider configuration by type
    pub fn provider_config(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.provider_type == kind)
    }

    /// Get or insert a provider configuration by type
    pub fn provider_config_mut(&mut self, kind: ProviderKind) -> &mut ProviderConfig {
        if let Some(index) = self.providers.iter().position(|p| p.provider_type == kind) {
            &mut self.providers[index]
        } else {
            self.providers.push(ProviderConfig::new(kind));
            let last = self.providers.len() - 1;
            &mut self.providers[last]
        }
    }

    /// Providers whose key is usable
    pub fn usable_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.has_usable_key())
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Load the configuration, writing the defaults first if the file is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            providers: default_providers(),
            orchestrator: OrchestratorConfig::default(),
            glossary: GlossaryConfig::default(),
            ocr: OcrConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
