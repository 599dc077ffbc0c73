use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for language code handling
///
/// Every provider speaks its own dialect of language codes. The library uses
/// ISO 639-1 (2-letter) codes internally plus the `auto` pseudo-code for
/// source detection; each adapter maps through one of the tables below and
/// falls back to passing the code through unchanged.

/// Pseudo language code requesting source detection
pub const AUTO: &str = "auto";

/// Whether the code asks the provider to detect the source language
pub fn is_auto(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(AUTO)
}

/// Validate that a language code is `auto`, an ISO 639-1 code, or an
/// ISO 639-1 code with a region/script suffix (`zh-TW`, `pt-BR`)
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized_code = code.trim().to_lowercase();

    if is_auto(&normalized_code) {
        return Ok(());
    }

    let primary = normalized_code
        .split(['-', '_'])
        .next()
        .unwrap_or_default();

    if primary.len() == 2 && Language::from_639_1(primary).is_some() {
        return Ok(());
    }

    // Accept 3-letter codes too, providers map them through unchanged
    if primary.len() == 3 && Language::from_639_3(primary).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Check that source and target differ once normalized
pub fn language_codes_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Get the English name for a language code, used when prompting LLM providers
pub fn get_language_name(code: &str) -> String {
    match code.trim().to_lowercase().as_str() {
        // Names the prompts have always used, kept stable
        "en" => "English".to_string(),
        "zh" | "zh-cn" | "zh-hans" => "Chinese (Simplified)".to_string(),
        "zh-tw" | "zh-hant" => "Chinese (Traditional)".to_string(),
        "ja" => "Japanese".to_string(),
        "ko" => "Korean".to_string(),
        "fr" => "French".to_string(),
        "de" => "German".to_string(),
        "es" => "Spanish".to_string(),
        "it" => "Italian".to_string(),
        "pt" => "Portuguese".to_string(),
        "ru" => "Russian".to_string(),
        "ar" => "Arabic".to_string(),
        other => Language::from_639_1(other)
            .map(|lang| lang.to_name().to_string())
            .unwrap_or_else(|| code.to_string()),
    }
}

/// DeepL expects upper-case codes; unknown codes are upper-cased as well
pub fn deepl_code(code: &str) -> String {
    match code.trim().to_lowercase().as_str() {
        "zh" => "ZH".to_string(),
        "en" => "EN".to_string(),
        "ja" => "JA".to_string(),
        "ko" => "KO".to_string(),
        "fr" => "FR".to_string(),
        "de" => "DE".to_string(),
        "es" => "ES".to_string(),
        "it" => "IT".to_string(),
        "pt" => "PT".to_string(),
        "ru" => "RU".to_string(),
        _ => code.trim().to_uppercase(),
    }
}

/// Microsoft Translator distinguishes Chinese scripts
pub fn microsoft_code(code: &str) -> String {
    match code.trim().to_lowercase().as_str() {
        "zh" => "zh-Hans".to_string(),
        "zh-tw" => "zh-Hant".to_string(),
        "en" => "en".to_string(),
        "ja" => "ja".to_string(),
        "ko" => "ko".to_string(),
        "fr" => "fr".to_string(),
        "de" => "de".to_string(),
        "es" => "es".to_string(),
        "it" => "it".to_string(),
        "pt" => "pt".to_string(),
        "ru" => "ru".to_string(),
        "ar" => "ar".to_string(),
        _ => code.trim().to_string(),
    }
}

/// Google Cloud Translation uses BCP-47 for Chinese
pub fn google_code(code: &str) -> String {
    match code.trim().to_lowercase().as_str() {
        "zh" => "zh-CN".to_string(),
        "zh-tw" => "zh-TW".to_string(),
        _ => code.trim().to_string(),
    }
}

/// Normalize a provider-reported language code to lower-case ISO style
pub fn normalize_detected(code: &str) -> String {
    let lower = code.trim().to_lowercase();
    match lower.as_str() {
        "zh-hans" | "zh-cn" => "zh".to_string(),
        _ => lower,
    }
}
