/*!
 * Mock collaborators for orchestrator tests
 *
 * Builds `Arc<dyn Provider>` lists out of the library's `MockProvider` and
 * provides a text extractor that never touches the network.
 */

use async_trait::async_trait;
use std::sync::Arc;

use multi_translate::errors::{ProviderError, ProviderErrorKind};
use multi_translate::ocr::TextExtractor;
use multi_translate::providers::Provider;
use multi_translate::providers::mock::MockProvider;

/// Wrap mock providers for injection into the orchestrator
pub fn provider_list(mocks: Vec<MockProvider>) -> Vec<Arc<dyn Provider>> {
    mocks
        .into_iter()
        .map(|mock| Arc::new(mock) as Arc<dyn Provider>)
        .collect()
}

/// Three providers that all fail, each with a different kind
pub fn all_failing() -> Vec<Arc<dyn Provider>> {
    provider_list(vec![
        MockProvider::failing("DeepL", ProviderErrorKind::AuthInvalid),
        MockProvider::failing("OpenAI", ProviderErrorKind::RateLimited),
        MockProvider::failing("Microsoft", ProviderErrorKind::NetworkFailure),
    ])
}

/// Text extractor returning a fixed outcome
#[derive(Debug, Clone)]
pub struct StaticTextExtractor {
    outcome: Result<String, ProviderError>,
}

impl StaticTextExtractor {
    pub fn with_text(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(ProviderError::malformed("Google Vision", message)),
        }
    }
}

#[async_trait]
impl TextExtractor for StaticTextExtractor {
    async fn extract_text(&self, _image: &[u8]) -> Result<String, ProviderError> {
        self.outcome.clone()
    }
}
