use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{Provider, endpoint_url, read_json, require_key, transport_error};
use crate::translation::model::{TranslationRequest, TranslationResult};

const SYSTEM_PROMPT: &str = "You are a professional translator with expertise in multiple languages and cultural contexts. Provide accurate, natural, and contextually appropriate translations.";

/// OpenAI client using chat completions as a translator
#[derive(Debug, Clone)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// Key, endpoint, model and quality
    config: ProviderConfig,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// The model to use
    model: String,
    /// The messages for the conversation
    messages: Vec<ChatMessage>,
    /// Temperature for generation
    temperature: f32,
    /// Maximum number of tokens to generate
    max_tokens: u32,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    #[serde(default)]
    pub content: Option<String>,
}

/// Chat completion response; `error` can appear even with a 200 status
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// Error object returned by the API
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

impl OpenAI {
    /// Create a new OpenAI client
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self { client, config }
    }

    /// Build the user prompt for a request
    pub fn build_prompt(request: &TranslationRequest) -> String {
        let target_name = language_utils::get_language_name(&request.target_language);
        let mut prompt = format!("Please translate the following text to {}. ", target_name);

        if !request.detect_source() {
            prompt.push_str(&format!(
                "The source language is {}. ",
                language_utils::get_language_name(&request.source_language)
            ));
        }

        prompt.push_str(
            "Requirements:
1. Maintain the original tone and style
2. Ensure natural and fluent expression
3. Preserve formatting and punctuation
4. Handle technical terms appropriately
5. Consider cultural context
6. Keep placeholder tokens such as ZQTERM0QZ exactly as written",
        );

        if let Some(context) = &request.context {
            prompt.push_str(&format!("\n7. Context: {}", context));
        }

        prompt.push_str("\n\nReply with the translation only.\n\nText to translate:\n");
        prompt.push_str(&request.text);
        prompt
    }

    fn chat_request(&self, request: &TranslationRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.effective_model(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(Self::build_prompt(request)),
                },
            ],
            temperature: 0.3,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl Provider for OpenAI {
    fn name(&self) -> &str {
        self.config.provider_type.display_name()
    }

    fn base_quality(&self) -> f64 {
        self.config.effective_quality()
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, ProviderError> {
        let api_key = require_key(&self.config)?;
        let url = endpoint_url(&self.config)?;

        debug!("OpenAI: translating {} chars with {}", request.text.chars().count(), self.config.effective_model());

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .json(&self.chat_request(request))
            .send()
            .await
            .map_err(|e| transport_error(self.name(), e))?;

        let body: ChatResponse = read_json(self.name(), response).await?;

        if let Some(error) = body.error {
            return Err(ProviderError::malformed(self.name(), format!("API returned an error: {}", error.message)));
        }

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::malformed(self.name(), "Response contained no choices"))?;

        Ok(TranslationResult::new(content.trim(), self.name(), self.base_quality()))
    }
}
