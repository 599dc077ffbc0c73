/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds, echoing the text with a language tag
 * - `MockProvider::fixed()` - Always returns the same text
 * - `MockProvider::failing()` - Always fails with the given error kind
 * - `MockProvider::drop_markers()` - Succeeds but loses glossary markers
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::{ProviderError, ProviderErrorKind};
use crate::providers::Provider;
use crate::translation::model::{TranslationRequest, TranslationResult};

static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ZQTERMX*\d+QZ").unwrap()
});

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns `[<target>] <text>`, markers untouched
    Working,
    /// Always returns this text
    Fixed(String),
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with this kind
    Failing(ProviderErrorKind),
    /// Returns an empty string
    Empty,
    /// Returns the input unchanged
    Identity,
    /// Sleeps, then behaves like `Working`
    Slow { delay_ms: u64 },
    /// Like `Working` but strips glossary markers
    DropMarkers,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Display name
    name: String,
    /// Base quality reported with results
    quality: f64,
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Last request received, shared between clones
    last_request: Arc<Mutex<Option<TranslationRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(name: impl Into<String>, quality: f64, behavior: MockBehavior) -> Self {
        Self {
            name: name.into(),
            quality,
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working(name: &str, quality: f64) -> Self {
        Self::new(name, quality, MockBehavior::Working)
    }

    /// Create a mock that always answers with `text`
    pub fn fixed(name: &str, quality: f64, text: &str) -> Self {
        Self::new(name, quality, MockBehavior::Fixed(text.to_string()))
    }

    /// Create a failing mock provider that always errors
    pub fn failing(name: &str, kind: ProviderErrorKind) -> Self {
        Self::new(name, 50.0, MockBehavior::Failing(kind))
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(name: &str, quality: f64, fail_every: usize) -> Self {
        Self::new(name, quality, MockBehavior::Intermittent { fail_every })
    }

    /// Create a mock that returns empty responses
    pub fn empty(name: &str, quality: f64) -> Self {
        Self::new(name, quality, MockBehavior::Empty)
    }

    /// Create a mock that echoes its input
    pub fn identity(name: &str, quality: f64) -> Self {
        Self::new(name, quality, MockBehavior::Identity)
    }

    /// Create a mock that answers after a delay
    pub fn slow(name: &str, quality: f64, delay_ms: u64) -> Self {
        Self::new(name, quality, MockBehavior::Slow { delay_ms })
    }

    /// Create a mock that loses glossary markers
    pub fn drop_markers(name: &str, quality: f64) -> Self {
        Self::new(name, quality, MockBehavior::DropMarkers)
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Last request received, if any
    pub fn last_request(&self) -> Option<TranslationRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }

    fn tagged(request: &TranslationRequest) -> String {
        format!("[{}] {}", request.target_language, request.text)
    }

    fn success(&self, text: impl Into<String>) -> Result<TranslationResult, ProviderError> {
        Ok(TranslationResult::new(text, self.name.clone(), self.quality))
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_quality(&self) -> f64 {
        self.quality
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }

        match &self.behavior {
            MockBehavior::Working => self.success(Self::tagged(request)),

            MockBehavior::Fixed(text) => self.success(text.clone()),

            MockBehavior::Intermittent { fail_every } => {
                if *fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::network(
                        &self.name,
                        format!("Simulated intermittent failure (request #{})", count + 1),
                    ))
                } else {
                    self.success(Self::tagged(request))
                }
            }

            MockBehavior::Failing(kind) => Err(ProviderError::new(*kind, &self.name, "Simulated provider failure")),

            MockBehavior::Empty => self.success(String::new()),

            MockBehavior::Identity => self.success(request.text.clone()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                self.success(Self::tagged(request))
            }

            MockBehavior::DropMarkers => {
                let stripped = MARKER_PATTERN.replace_all(&Self::tagged(request), "").into_owned();
                self.success(stripped)
            }
        }
    }
}
