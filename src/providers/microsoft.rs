use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{Provider, endpoint_url, read_json, require_key, transport_error};
use crate::translation::model::{TranslationRequest, TranslationResult};

/// Microsoft Translator v3 client
#[derive(Debug, Clone)]
pub struct Microsoft {
    /// HTTP client for API requests
    client: Client,
    /// Key, region, endpoint and quality
    config: ProviderConfig,
}

/// Request element; the API takes an array of these
#[derive(Debug, Serialize)]
struct TextItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

/// One element of the response array
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicrosoftResult {
    #[serde(default)]
    pub detected_language: Option<DetectedLanguage>,
    #[serde(default)]
    pub translations: Vec<MicrosoftTranslation>,
}

#[derive(Debug, Deserialize)]
pub struct DetectedLanguage {
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct MicrosoftTranslation {
    pub text: String,
}

impl Microsoft {
    /// Create a new Microsoft Translator client
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Provider for Microsoft {
    fn name(&self) -> &str {
        self.config.provider_type.display_name()
    }

    fn base_quality(&self) -> f64 {
        self.config.effective_quality()
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, ProviderError> {
        let api_key = require_key(&self.config)?;
        let mut url = endpoint_url(&self.config)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api-version", "3.0");
            query.append_pair("to", &language_utils::microsoft_code(&request.target_language));
            if !request.detect_source() {
                query.append_pair("from", &language_utils::microsoft_code(&request.source_language));
            }
        }

        debug!("Microsoft: translating {} chars to {}", request.text.chars().count(), request.target_language);

        let mut builder = self
            .client
            .post(url)
            .header("Ocp-Apim-Subscription-Key", api_key)
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .json(&[TextItem { text: &request.text }]);

        let region = self.config.effective_region();
        if !region.is_empty() {
            builder = builder.header("Ocp-Apim-Subscription-Region", region);
        }

        let response = builder.send().await.map_err(|e| transport_error(self.name(), e))?;

        let body: Vec<MicrosoftResult> = read_json(self.name(), response).await?;
        let first = body
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::malformed(self.name(), "Response was an empty array"))?;

        let detected = first.detected_language.map(|d| d.language);
        let translation = first
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::malformed(self.name(), "Response contained no translations"))?;

        Ok(TranslationResult::new(translation.text, self.name(), self.base_quality()).detected(detected))
    }
}
