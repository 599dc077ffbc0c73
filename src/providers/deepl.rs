use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{Provider, endpoint_url, read_json, require_key, transport_error};
use crate::translation::model::{TranslationRequest, TranslationResult};

/// DeepL client for the v2 translate API
#[derive(Debug, Clone)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// Key, endpoint and quality
    config: ProviderConfig,
}

/// DeepL translate response
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// One entry per submitted text
    #[serde(default)]
    pub translations: Vec<DeepLTranslation>,
}

/// A single translated text
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// Detected source language, upper case
    #[serde(default)]
    pub detected_source_language: Option<String>,
    /// The translated text
    pub text: String,
}

impl DeepL {
    /// Create a new DeepL client
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self { client, config }
    }

    /// Form fields for a request
    fn form_params(request: &TranslationRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("text", request.text.clone()),
            ("target_lang", language_utils::deepl_code(&request.target_language)),
        ];

        if !request.detect_source() {
            params.push(("source_lang", language_utils::deepl_code(&request.source_language)));
        }

        params.push(("preserve_formatting", "1".to_string()));
        params.push(("formality", "default".to_string()));
        params
    }
}

#[async_trait]
impl Provider for DeepL {
    fn name(&self) -> &str {
        self.config.provider_type.display_name()
    }

    fn base_quality(&self) -> f64 {
        self.config.effective_quality()
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, ProviderError> {
        let api_key = require_key(&self.config)?;
        let url = endpoint_url(&self.config)?;

        debug!("DeepL: translating {} chars to {}", request.text.chars().count(), request.target_language);

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("DeepL-Auth-Key {}", api_key))
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .form(&Self::form_params(request))
            .send()
            .await
            .map_err(|e| transport_error(self.name(), e))?;

        let body: DeepLResponse = read_json(self.name(), response).await?;
        let translation = body
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::malformed(self.name(), "Response contained no translations"))?;

        Ok(TranslationResult::new(translation.text, self.name(), self.base_quality())
            .detected(translation.detected_source_language))
    }
}
