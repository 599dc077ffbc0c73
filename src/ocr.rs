/*!
 * Text extraction from images.
 *
 * The only backend is Google Cloud Vision `TEXT_DETECTION`; the first text
 * annotation holds the full detected text block.
 */

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use url::Url;

use crate::app_config::OcrConfig;
use crate::errors::ProviderError;
use crate::providers::{classify_status, transport_error};

const VISION_NAME: &str = "Google Vision";

/// Anything that can turn image bytes into text
#[async_trait]
pub trait TextExtractor: Send + Sync + Debug {
    /// Extract the text shown in an encoded image (PNG, JPEG, ...)
    async fn extract_text(&self, image: &[u8]) -> Result<String, ProviderError>;
}

/// Google Cloud Vision client
#[derive(Debug, Clone)]
pub struct GoogleVision {
    client: Client,
    config: OcrConfig,
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    #[serde(rename = "maxResults")]
    max_results: u32,
}

/// Vision annotate response
#[derive(Debug, Deserialize)]
pub struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<ImageAnnotation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnnotation {
    #[serde(default)]
    pub text_annotations: Vec<TextAnnotation>,
    #[serde(default)]
    pub error: Option<VisionStatus>,
}

#[derive(Debug, Deserialize)]
pub struct TextAnnotation {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct VisionStatus {
    #[serde(default)]
    pub message: String,
}

impl GoogleVision {
    pub fn new(config: OcrConfig, client: Client) -> Self {
        Self { client, config }
    }

    fn annotate_url(&self) -> Result<Url, ProviderError> {
        let raw = format!("{}/v1/images:annotate", self.config.endpoint.trim_end_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| ProviderError::network(VISION_NAME, format!("Invalid endpoint '{}': {}", raw, e)))?;
        url.query_pairs_mut().append_pair("key", self.config.api_key.trim());
        Ok(url)
    }
}

#[async_trait]
impl TextExtractor for GoogleVision {
    async fn extract_text(&self, image: &[u8]) -> Result<String, ProviderError> {
        if !self.config.has_usable_key() {
            return Err(ProviderError::auth_missing(VISION_NAME));
        }
        if image.is_empty() {
            return Err(ProviderError::malformed(VISION_NAME, "Image is empty"));
        }

        debug!("Sending {} byte image to Google Vision", image.len());

        let payload = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    feature_type: "TEXT_DETECTION",
                    max_results: 1,
                }],
            }],
        };

        let response = self
            .client
            .post(self.annotate_url()?)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(VISION_NAME, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(VISION_NAME, e))?;
        if !status.is_success() {
            return Err(classify_status(VISION_NAME, status, &body));
        }

        let parsed: AnnotateResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(VISION_NAME, format!("Failed to parse response: {}", e)))?;

        let annotation = parsed
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::malformed(VISION_NAME, "Response contained no annotations"))?;

        if let Some(error) = annotation.error {
            return Err(ProviderError::malformed(VISION_NAME, error.message));
        }

        let text = annotation
            .text_annotations
            .into_iter()
            .next()
            .map(|a| a.description)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ProviderError::malformed(VISION_NAME, "No text found in image"))?;

        info!("Extracted {} characters from image", text.chars().count());
        Ok(text)
    }
}
