/*!
 * Multi-provider translation orchestrator.
 *
 * The high-quality path:
 * 1. Select providers with usable keys, best quality first, capped
 * 2. Replace glossary terms with markers
 * 3. Send the marked text to every provider concurrently and settle all calls
 * 4. Restore markers in each successful result
 * 5. Rank the results with the quality evaluator
 *
 * The fast path sends the raw text to the single best provider.
 *
 * Provider credentials are read from the configuration slice passed to each
 * call, so the orchestrator itself holds no key state.
 */

use futures::future::join_all;
use log::{debug, info, warn};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{Config, OrchestratorConfig, ProviderConfig};
use crate::errors::{ProviderError, TranslationError};
use crate::ocr::TextExtractor;
use crate::providers::{self, Provider};
use crate::translation::glossary::Glossary;
use crate::translation::model::{
    FastTranslation, HighQualityTranslation, ImageTranslation, TranslationDiagnostics, TranslationRequest,
    TranslationResult,
};
use crate::translation::quality::QualityEvaluator;

/// Fans translation requests out to providers and ranks the answers
#[derive(Debug, Clone)]
pub struct TranslationOrchestrator {
    /// Terminology protected across provider calls
    glossary: Arc<Glossary>,
    /// Ranks successful results
    evaluator: QualityEvaluator,
    /// Provider cap and deadline
    settings: OrchestratorConfig,
    /// Shared by every adapter built from configuration
    client: Client,
}

impl Default for TranslationOrchestrator {
    fn default() -> Self {
        Self::new(Glossary::default(), OrchestratorConfig::default())
    }
}

impl TranslationOrchestrator {
    /// Create an orchestrator around a glossary
    pub fn new(glossary: Glossary, settings: OrchestratorConfig) -> Self {
        let glossary = Arc::new(glossary);
        Self {
            evaluator: QualityEvaluator::new(Arc::clone(&glossary)),
            glossary,
            settings,
            client: providers::build_http_client(),
        }
    }

    /// Create an orchestrator from the application configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(config.glossary.build()?, config.orchestrator.clone()))
    }

    /// Use a specific HTTP client for providers built from configuration
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    pub fn settings(&self) -> &OrchestratorConfig {
        &self.settings
    }

    /// Providers with usable keys, best quality first, at most `max_concurrent_providers`
    pub fn select_providers(&self, configs: &[ProviderConfig]) -> Vec<Arc<dyn Provider>> {
        let mut usable: Vec<&ProviderConfig> = configs.iter().filter(|c| c.has_usable_key()).collect();
        usable.sort_by(|a, b| b.effective_quality().total_cmp(&a.effective_quality()));

        usable
            .into_iter()
            .take(self.settings.max_concurrent_providers.max(1))
            .map(|config| providers::create_provider(config, self.client.clone()))
            .collect()
    }

    /// Translate with every selected provider and return the best result
    pub async fn translate_high_quality(
        &self,
        request: &TranslationRequest,
        configs: &[ProviderConfig],
    ) -> Result<HighQualityTranslation, TranslationError> {
        ensure_text(request)?;
        let selected = self.select_providers(configs);
        self.translate_with_providers(request, &selected).await
    }

    /// Translate with an explicit provider list, dispatched in the given order
    pub async fn translate_with_providers(
        &self,
        request: &TranslationRequest,
        providers: &[Arc<dyn Provider>],
    ) -> Result<HighQualityTranslation, TranslationError> {
        let started = Instant::now();
        ensure_text(request)?;

        if providers.is_empty() {
            return Err(TranslationError::NoProvidersAvailable);
        }

        let marked = self.glossary.preprocess(&request.text);
        let outbound = request.with_text(marked.text.clone());

        info!(
            "Translating {} chars {} -> {} with {} provider(s): {}",
            request.text.chars().count(),
            request.source_language,
            request.target_language,
            providers.len(),
            providers.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
        );

        let calls = providers
            .iter()
            .map(|provider| self.call_provider(provider.as_ref(), &outbound));
        let outcomes = join_all(calls).await;

        let mut successes: Vec<TranslationResult> = Vec::new();
        let mut errors: Vec<ProviderError> = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(mut result) => {
                    let restored = self
                        .glossary
                        .postprocess(&result.translated_text, &marked.markers, &request.target_language);
                    result.translated_text = restored.text;
                    result.unresolved_markers = restored.unresolved_markers;
                    successes.push(result);
                }
                Err(error) => {
                    warn!("{}", error);
                    errors.push(error);
                }
            }
        }

        if successes.is_empty() {
            return Err(TranslationError::AllProvidersFailed { errors });
        }

        let providers_succeeded = successes.len();
        let mut ranked = self.evaluator.evaluate(&request.text, successes);
        let best = ranked.remove(0);

        let diagnostics = TranslationDiagnostics {
            providers_attempted: providers.len(),
            providers_succeeded,
            had_terminology_markers: marked.has_markers(),
            errors,
            elapsed_ms: elapsed_ms(started),
        };

        info!(
            "Best translation from {} (score {:.1}), {}/{} providers succeeded in {} ms",
            best.provider_name(),
            best.final_score,
            diagnostics.providers_succeeded,
            diagnostics.providers_attempted,
            diagnostics.elapsed_ms
        );

        Ok(HighQualityTranslation {
            best,
            alternatives: ranked,
            diagnostics,
        })
    }

    /// Translate with the single highest-quality usable provider, without glossary or ranking
    pub async fn translate_fast(
        &self,
        request: &TranslationRequest,
        configs: &[ProviderConfig],
    ) -> Result<FastTranslation, TranslationError> {
        ensure_text(request)?;
        let selected = self.select_providers(configs);
        self.translate_fast_with_providers(request, &selected).await
    }

    /// Fast path over an explicit provider list; the first highest-quality provider wins
    pub async fn translate_fast_with_providers(
        &self,
        request: &TranslationRequest,
        providers: &[Arc<dyn Provider>],
    ) -> Result<FastTranslation, TranslationError> {
        let started = Instant::now();
        ensure_text(request)?;

        let provider = providers
            .iter()
            .reduce(|best, p| if p.base_quality() > best.base_quality() { p } else { best })
            .ok_or(TranslationError::NoProvidersAvailable)?;

        debug!("Fast translation with {}", provider.name());
        let result = self.call_provider(provider.as_ref(), request).await?;

        Ok(FastTranslation {
            result,
            elapsed_ms: elapsed_ms(started),
        })
    }

    /// Extract text from an image and translate it with the high-quality path
    pub async fn translate_image(
        &self,
        image: &[u8],
        source_language: &str,
        target_language: &str,
        extractor: &dyn TextExtractor,
        configs: &[ProviderConfig],
    ) -> Result<ImageTranslation, TranslationError> {
        let extracted_text = extractor
            .extract_text(image)
            .await
            .map_err(|e| TranslationError::Ocr(e.to_string()))?;

        let request = TranslationRequest::new(extracted_text.clone(), source_language, target_language);
        let translation = self.translate_high_quality(&request, configs).await?;

        Ok(ImageTranslation {
            extracted_text,
            translation,
        })
    }

    /// One isolated provider call, bounded by the configured deadline
    async fn call_provider(
        &self,
        provider: &dyn Provider,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, ProviderError> {
        let call = provider.translate(request);
        match self.settings.deadline_ms {
            Some(ms) => match tokio::time::timeout(Duration::from_millis(ms), call).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ProviderError::network(provider.name(), "deadline exceeded")),
            },
            None => call.await,
        }
    }
}

fn ensure_text(request: &TranslationRequest) -> Result<(), TranslationError> {
    if request.text.trim().is_empty() {
        Err(TranslationError::EmptyInput)
    } else {
        Ok(())
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
