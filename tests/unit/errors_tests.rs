/*!
 * Tests for error types
 */

use multi_translate::errors::{AppError, ProviderError, ProviderErrorKind, TranslationError};

/// Test provider error display includes provider and kind
#[test]
fn test_providerError_display_shouldIncludeNameAndKind() {
    let error = ProviderError::rate_limited("DeepL", "HTTP 456: Quota exceeded");
    assert_eq!(error.to_string(), "DeepL: RateLimited - HTTP 456: Quota exceeded");

    let missing = ProviderError::auth_missing("Google Cloud");
    assert_eq!(missing.kind, ProviderErrorKind::AuthMissing);
    assert!(missing.to_string().contains("API key is not configured"));
}

/// Test conversion of provider errors into translation errors
#[test]
fn test_translationError_fromProviderError_shouldWrap() {
    let error: TranslationError = ProviderError::network("OpenAI", "connection refused").into();
    assert!(matches!(error, TranslationError::ProviderFailed(_)));
    assert_eq!(error.provider_errors().len(), 1);
    assert!(TranslationError::EmptyInput.provider_errors().is_empty());
}

/// Test AppError wraps every layer
#[test]
fn test_appError_conversions_shouldKeepMessages() {
    let app: AppError = TranslationError::NoProvidersAvailable.into();
    assert!(app.to_string().contains("No translation providers available"));

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json missing");
    let app: AppError = io.into();
    assert!(matches!(app, AppError::File(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let app: AppError = json_error.into();
    assert!(matches!(app, AppError::Config(_)));
}
