/*!
 * # multi-translate
 *
 * A Rust library for best-effort translation through several remote
 * machine-translation services at once.
 *
 * ## Features
 *
 * - Query several providers concurrently:
 *   - DeepL
 *   - OpenAI chat completions
 *   - Microsoft Translator
 *   - Google Cloud Translation
 * - Tolerate partial failures and report every provider error
 * - Rank results with a fixed quality heuristic
 * - Protect domain terminology with glossary markers
 * - Translate text found in images through Google Cloud Vision
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `key_store`: Persisted API keys
 * - `translation`: The translation pipeline:
 *   - `translation::glossary`: Terminology substitution
 *   - `translation::quality`: Result scoring and ranking
 *   - `translation::orchestrator`: Multi-provider fan-out
 * - `providers`: Client implementations for the remote services
 * - `ocr`: Text extraction from images
 * - `language_utils`: ISO language code utilities and provider mappings
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod errors;
pub mod key_store;
pub mod language_utils;
pub mod ocr;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, ProviderConfig, ProviderKind};
pub use errors::{AppError, ProviderError, ProviderErrorKind, TranslationError};
pub use key_store::ApiKeyStore;
pub use language_utils::{get_language_name, language_codes_match, validate_language_code};
pub use providers::Provider;
pub use translation::{
    HighQualityTranslation, FastTranslation, ScoredResult, TranslationOrchestrator, TranslationRequest,
    TranslationResult,
};
