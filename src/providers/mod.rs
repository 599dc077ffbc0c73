/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the remote services:
 * - DeepL: DeepL API v2
 * - OpenAI: chat completions used as a translator
 * - Microsoft: Microsoft Translator v3
 * - Google: Google Cloud Translation v2
 * - Mock: scripted provider for tests
 *
 * Every adapter normalizes its service into a `TranslationResult` and maps
 * failures onto `ProviderErrorKind`.
 */

use async_trait::async_trait;
use log::error;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::app_config::{ProviderConfig, ProviderKind};
use crate::errors::ProviderError;
use crate::translation::model::{TranslationRequest, TranslationResult};

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the orchestrator.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Display name used in results and errors
    fn name(&self) -> &str;

    /// Confidence assigned to every successful result (0-100)
    fn base_quality(&self) -> f64;

    /// Translate one request
    ///
    /// # Arguments
    /// * `request` - The text, languages and optional context
    ///
    /// # Returns
    /// * `Result<TranslationResult, ProviderError>` - The normalized result or a classified error
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, ProviderError>;
}

/// Build the adapter for a provider configuration
pub fn create_provider(config: &ProviderConfig, client: Client) -> Arc<dyn Provider> {
    match config.provider_type {
        ProviderKind::DeepL => Arc::new(deepl::DeepL::new(config.clone(), client)),
        ProviderKind::OpenAI => Arc::new(openai::OpenAI::new(config.clone(), client)),
        ProviderKind::Microsoft => Arc::new(microsoft::Microsoft::new(config.clone(), client)),
        ProviderKind::GoogleCloud => Arc::new(google::GoogleCloud::new(config.clone(), client)),
    }
}

/// HTTP client shared by all adapters; per-request timeouts come from each provider's config
pub fn build_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default()
}

/// Fail fast when the provider has no usable key
pub(crate) fn require_key(config: &ProviderConfig) -> Result<&str, ProviderError> {
    if config.has_usable_key() {
        Ok(config.api_key.trim())
    } else {
        Err(ProviderError::auth_missing(config.provider_type.display_name()))
    }
}

/// Parse the configured endpoint
pub(crate) fn endpoint_url(config: &ProviderConfig) -> Result<Url, ProviderError> {
    let endpoint = config.effective_endpoint();
    Url::parse(&endpoint).map_err(|e| {
        ProviderError::network(
            config.provider_type.display_name(),
            format!("Invalid endpoint '{}': {}", endpoint, e),
        )
    })
}

/// Map a non-success HTTP status onto an error kind
pub fn classify_status(provider_name: &str, status: StatusCode, body: &str) -> ProviderError {
    let message = format!("HTTP {}: {}", status.as_u16(), truncate(body, 200));
    match status.as_u16() {
        401 | 403 => ProviderError::auth_invalid(provider_name, message),
        // 456 is DeepL's quota exceeded status
        429 | 456 => ProviderError::rate_limited(provider_name, message),
        _ => ProviderError::network(provider_name, message),
    }
}

/// Map a transport-level failure
pub fn transport_error(provider_name: &str, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::network(provider_name, "Request timed out")
    } else {
        ProviderError::network(provider_name, format!("Request failed: {}", error))
    }
}

/// Check the status and decode the JSON body of a provider response
pub(crate) async fn read_json<T: DeserializeOwned>(provider_name: &str, response: Response) -> Result<T, ProviderError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(provider_name, e))?;

    if !status.is_success() {
        error!("{} API error ({}): {}", provider_name, status, truncate(&body, 200));
        return Err(classify_status(provider_name, status, &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        ProviderError::malformed(provider_name, format!("Failed to parse response: {}", e))
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

pub mod deepl;
pub mod google;
pub mod microsoft;
pub mod mock;
pub mod openai;
