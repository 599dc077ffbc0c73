use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{Provider, classify_status, endpoint_url, require_key, transport_error};
use crate::translation::model::{TranslationRequest, TranslationResult};

/// Google Cloud Translation v2 client
#[derive(Debug, Clone)]
pub struct GoogleCloud {
    /// HTTP client for API requests
    client: Client,
    /// Key, endpoint and quality
    config: ProviderConfig,
}

/// Translation v2 response envelope
#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    pub data: Option<GoogleData>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleData {
    #[serde(default)]
    pub translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTranslation {
    pub translated_text: String,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}

impl GoogleCloud {
    /// Create a new Google Cloud Translation client
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self { client, config }
    }

    fn form_params(request: &TranslationRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", request.text.clone()),
            ("target", language_utils::google_code(&request.target_language)),
            ("format", "text".to_string()),
        ];
        if !request.detect_source() {
            params.push(("source", language_utils::google_code(&request.source_language)));
        }
        params
    }
}

#[async_trait]
impl Provider for GoogleCloud {
    fn name(&self) -> &str {
        self.config.provider_type.display_name()
    }

    fn base_quality(&self) -> f64 {
        self.config.effective_quality()
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, ProviderError> {
        let api_key = require_key(&self.config)?;
        let mut url = endpoint_url(&self.config)?;
        url.query_pairs_mut().append_pair("key", api_key);

        debug!("Google Cloud: translating {} chars to {}", request.text.chars().count(), request.target_language);

        let response = self
            .client
            .post(url)
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .form(&Self::form_params(request))
            .send()
            .await
            .map_err(|e| transport_error(self.name(), e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(self.name(), e))?;

        if !status.is_success() {
            // Google reports a bad key as 400 with reason API_KEY_INVALID
            if status.as_u16() == 400 && body.contains("API_KEY_INVALID") {
                return Err(ProviderError::auth_invalid(self.name(), "API key not valid"));
            }
            return Err(classify_status(self.name(), status, &body));
        }

        let parsed: GoogleResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(self.name(), format!("Failed to parse response: {}", e)))?;

        let translation = parsed
            .data
            .and_then(|data| data.translations.into_iter().next())
            .ok_or_else(|| ProviderError::malformed(self.name(), "Response contained no translations"))?;

        Ok(TranslationResult::new(translation.translated_text, self.name(), self.base_quality())
            .detected(translation.detected_source_language))
    }
}
