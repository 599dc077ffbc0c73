/*!
 * Error types for the multi-translate library.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::fmt;

use thiserror::Error;

/// Classification of a failed provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// No credential configured, or only the placeholder value
    AuthMissing,
    /// The provider rejected the credential
    AuthInvalid,
    /// The provider throttled the request or the quota is exhausted
    RateLimited,
    /// Transport-level failure, timeout or unexpected HTTP status
    NetworkFailure,
    /// The provider answered with a body we could not interpret
    MalformedResponse,
}

impl ProviderErrorKind {
    /// Stable identifier used in aggregate messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthMissing => "AuthMissing",
            Self::AuthInvalid => "AuthInvalid",
            Self::RateLimited => "RateLimited",
            Self::NetworkFailure => "NetworkFailure",
            Self::MalformedResponse => "MalformedResponse",
        }
    }

    /// Whether the failure points at configuration rather than a transient issue
    pub fn is_configuration_issue(&self) -> bool {
        matches!(self, Self::AuthMissing | Self::AuthInvalid)
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{provider_name}: {kind} - {message}")]
pub struct ProviderError {
    /// What went wrong
    pub kind: ProviderErrorKind,
    /// Display name of the provider that failed
    pub provider_name: String,
    /// Details from the provider or the transport
    pub message: String,
}

impl ProviderError {
    /// Create a new provider error
    pub fn new(kind: ProviderErrorKind, provider_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            provider_name: provider_name.into(),
            message: message.into(),
        }
    }

    pub fn auth_missing(provider_name: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::AuthMissing, provider_name, "API key is not configured")
    }

    pub fn auth_invalid(provider_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::AuthInvalid, provider_name, message)
    }

    pub fn rate_limited(provider_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, provider_name, message)
    }

    pub fn network(provider_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::NetworkFailure, provider_name, message)
    }

    pub fn malformed(provider_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::MalformedResponse, provider_name, message)
    }
}

/// Errors surfaced by the translation orchestrator
#[derive(Error, Debug)]
pub enum TranslationError {
    /// No provider has a usable credential
    #[error("No translation providers available: configure at least one API key")]
    NoProvidersAvailable,

    /// Every dispatched provider call failed
    #[error("All translation providers failed: {}", join_errors(.errors))]
    AllProvidersFailed {
        /// One entry per dispatched provider
        errors: Vec<ProviderError>,
    },

    /// The single provider used by the fast path failed
    #[error("Provider error: {0}")]
    ProviderFailed(#[from] ProviderError),

    /// Nothing to translate
    #[error("Input text is empty")]
    EmptyInput,

    /// Text extraction from an image failed
    #[error("OCR error: {0}")]
    Ocr(String),
}

impl TranslationError {
    /// Per-provider errors carried by this error, if any
    pub fn provider_errors(&self) -> &[ProviderError] {
        match self {
            Self::AllProvidersFailed { errors } => errors,
            Self::ProviderFailed(error) => std::slice::from_ref(error),
            _ => &[],
        }
    }
}

fn join_errors(errors: &[ProviderError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in configuration or the key store
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
