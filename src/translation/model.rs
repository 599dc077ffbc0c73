/*!
 * Data model shared by the glossary, the evaluator and the orchestrator.
 */

use serde::Serialize;

use crate::errors::ProviderError;
use crate::language_utils;

/// A single translation request as issued by a caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, or `auto`
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Free-form hint about the domain or tone, used by LLM providers
    pub context: Option<String>,
}

impl TranslationRequest {
    /// Create a new request without context
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            context: None,
        }
    }

    /// Attach a context hint; blank hints are dropped
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = if context.trim().is_empty() { None } else { Some(context) };
        self
    }

    /// Whether the provider should detect the source language
    pub fn detect_source(&self) -> bool {
        language_utils::is_auto(&self.source_language)
    }

    /// Copy of this request carrying different text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

/// Normalized answer from one provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    /// Translated text
    pub translated_text: String,
    /// Display name of the provider
    pub provider_name: String,
    /// Provider confidence before heuristics (0-100)
    pub base_confidence: f64,
    /// Source language reported by the provider
    pub detected_source_language: Option<String>,
    /// Glossary markers that could not be restored in this result
    pub unresolved_markers: usize,
}

impl TranslationResult {
    /// Create a result as an adapter produces it
    pub fn new(
        translated_text: impl Into<String>,
        provider_name: impl Into<String>,
        base_confidence: f64,
    ) -> Self {
        Self {
            translated_text: translated_text.into(),
            provider_name: provider_name.into(),
            base_confidence,
            detected_source_language: None,
            unresolved_markers: 0,
        }
    }

    /// Set the detected source language
    pub fn detected(mut self, language: Option<String>) -> Self {
        self.detected_source_language = language.map(|l| language_utils::normalize_detected(&l));
        self
    }
}

/// A result after the quality heuristics ran
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    /// The candidate that was scored
    #[serde(flatten)]
    pub result: TranslationResult,
    /// Heuristic score clamped to 0-100
    pub final_score: f64,
    /// Translated length divided by source length, in characters
    pub length_ratio: f64,
    /// Number of glossary terms found in the source text
    pub terminology_hit_count: usize,
}

impl ScoredResult {
    pub fn translated_text(&self) -> &str {
        &self.result.translated_text
    }

    pub fn provider_name(&self) -> &str {
        &self.result.provider_name
    }
}

/// Side information about one high-quality translation call
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranslationDiagnostics {
    /// Providers the request was dispatched to
    pub providers_attempted: usize,
    /// Providers that returned a usable response
    pub providers_succeeded: usize,
    /// Whether glossary markers were inserted before dispatch
    pub had_terminology_markers: bool,
    /// Failures of the providers that did not succeed
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<ProviderError>,
    /// Wall-clock time of the whole call in milliseconds
    pub elapsed_ms: u64,
}

fn serialize_errors<S>(errors: &[ProviderError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(errors.iter().map(|e| e.to_string()))
}

/// Outcome of the multi-provider path
#[derive(Debug, Clone, Serialize)]
pub struct HighQualityTranslation {
    /// Top-ranked candidate
    pub best: ScoredResult,
    /// Remaining candidates, best first
    pub alternatives: Vec<ScoredResult>,
    /// What happened during the fan-out
    pub diagnostics: TranslationDiagnostics,
}

/// Outcome of the single-provider path
#[derive(Debug, Clone, Serialize)]
pub struct FastTranslation {
    /// Raw provider result
    pub result: TranslationResult,
    /// Wall-clock time in milliseconds
    pub elapsed_ms: u64,
}

/// Outcome of translating the text found in an image
#[derive(Debug, Clone, Serialize)]
pub struct ImageTranslation {
    /// Text returned by OCR
    pub extracted_text: String,
    /// Multi-provider translation of that text
    pub translation: HighQualityTranslation,
}
