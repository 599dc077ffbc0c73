/*!
 * Glossary substitution for domain terminology.
 *
 * Known terms are swapped for neutral markers before the text leaves the
 * process, so remote providers cannot mistranslate them, and the markers are
 * swapped back for the glossary translation (or the original wording) once the
 * provider answers.
 *
 * Markers have the shape `ZQTERM{n}QZ`: letters and digits only, which every
 * provider passes through untouched, and the `QZ` tail keeps `ZQTERM1QZ` from
 * matching inside `ZQTERM10QZ`. When the input already contains tokens of that
 * shape, the prefix is padded with `X` (`ZQTERMX{n}QZ`, `ZQTERMXX{n}QZ`, ...)
 * until it no longer appears in the input.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::language_utils;

/// Any marker-shaped token; the group holds the `X` padding
static MARKER_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ZQTERM(X*)\d+QZ").unwrap()
});

const MARKER_PREFIX: &str = "ZQTERM";

/// Target language of the built-in dictionary
pub const DEFAULT_GLOSSARY_TARGET: &str = "zh";

/// English to Simplified Chinese terms shipped with the crate
const DEFAULT_TERMS: &[(&str, &str)] = &[
    // Technology
    ("API", "API"),
    ("algorithm", "算法"),
    ("machine learning", "机器学习"),
    ("artificial intelligence", "人工智能"),
    ("deep learning", "深度学习"),
    ("neural network", "神经网络"),
    ("database", "数据库"),
    ("framework", "框架"),
    ("interface", "接口"),
    ("backend", "后端"),
    ("frontend", "前端"),
    // Business
    ("business model", "商业模式"),
    ("market analysis", "市场分析"),
    ("revenue", "收入"),
    ("profit margin", "利润率"),
    ("stakeholder", "利益相关者"),
    ("ROI", "投资回报率"),
    // Medical
    ("diagnosis", "诊断"),
    ("treatment", "治疗"),
    ("symptoms", "症状"),
    ("prescription", "处方"),
    ("medication", "药物"),
    // Legal
    ("contract", "合同"),
    ("copyright", "版权"),
    ("intellectual property", "知识产权"),
    ("liability", "责任"),
    ("compliance", "合规"),
];

/// One dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// Source-language term
    pub term: String,
    /// Translation in the glossary's target language
    pub translation: String,
}

impl GlossaryEntry {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
        }
    }
}

/// The built-in dictionary as owned entries
pub fn default_entries() -> Vec<GlossaryEntry> {
    DEFAULT_TERMS
        .iter()
        .map(|(term, translation)| GlossaryEntry::new(*term, *translation))
        .collect()
}

/// A placeholder inserted for one occurrence of a glossary term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryMarker {
    /// The marker token, unique within one call
    pub marker: String,
    /// Source text exactly as it was matched
    pub original_term: String,
    /// Translation to restore for the glossary target language
    pub target_translation: String,
}

/// Text with glossary terms replaced by markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedText {
    pub text: String,
    pub markers: Vec<GlossaryMarker>,
}

impl MarkedText {
    pub fn has_markers(&self) -> bool {
        !self.markers.is_empty()
    }
}

/// Provider output with markers swapped back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub text: String,
    /// Markers missing from the output plus marker tokens left over after restoration
    pub unresolved_markers: usize,
}

#[derive(Debug, Clone)]
struct CompiledEntry {
    entry: GlossaryEntry,
    pattern: Regex,
}

/// Dictionary-driven marker substitution
#[derive(Debug, Clone)]
pub struct Glossary {
    /// Entries ordered longest term first
    entries: Vec<CompiledEntry>,
    /// Language the dictionary translations are written in
    target_language: String,
}

impl Default for Glossary {
    fn default() -> Self {
        Self::new(default_entries(), DEFAULT_GLOSSARY_TARGET)
            .unwrap_or_else(|_| Self::empty(DEFAULT_GLOSSARY_TARGET))
    }
}

impl Glossary {
    /// Build a glossary from entries whose translations are in `target_language`
    pub fn new(entries: Vec<GlossaryEntry>, target_language: impl Into<String>) -> Result<Self, regex::Error> {
        let mut entries: Vec<GlossaryEntry> = entries
            .into_iter()
            .filter(|e| !e.term.trim().is_empty())
            .collect();

        // Multi-word terms must be replaced before the words they contain
        entries.sort_by(|a, b| {
            b.term
                .chars()
                .count()
                .cmp(&a.term.chars().count())
                .then_with(|| a.term.cmp(&b.term))
        });
        let mut seen = HashSet::new();
        entries.retain(|e| seen.insert(e.term.trim().to_lowercase()));

        let compiled = entries
            .into_iter()
            .map(|entry| {
                let pattern = Regex::new(&term_pattern(entry.term.trim()))?;
                Ok(CompiledEntry { entry, pattern })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            entries: compiled,
            target_language: target_language.into(),
        })
    }

    /// A glossary that never substitutes anything
    pub fn empty(target_language: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            target_language: target_language.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn entries(&self) -> impl Iterator<Item = &GlossaryEntry> {
        self.entries.iter().map(|c| &c.entry)
    }

    /// Replace every whole-word, case-insensitive occurrence of a term with a fresh marker
    pub fn preprocess(&self, text: &str) -> MarkedText {
        let mut markers = Vec::new();
        let mut processed = text.to_string();
        let prefix = marker_prefix(text);

        for compiled in &self.entries {
            if !compiled.pattern.is_match(&processed) {
                continue;
            }

            processed = compiled
                .pattern
                .replace_all(&processed, |caps: &regex::Captures| {
                    let marker = format!("{}{}QZ", prefix, markers.len());
                    markers.push(GlossaryMarker {
                        marker: marker.clone(),
                        original_term: caps[0].to_string(),
                        target_translation: compiled.entry.translation.clone(),
                    });
                    marker
                })
                .into_owned();
        }

        if !markers.is_empty() {
            debug!("Glossary marked {} term occurrence(s)", markers.len());
        }

        MarkedText {
            text: processed,
            markers,
        }
    }

    /// Swap markers back in a provider's output
    ///
    /// When `target_language` is the glossary's own target the dictionary
    /// translation is restored; otherwise the matched source text comes back
    /// unchanged.
    pub fn postprocess(&self, text: &str, markers: &[GlossaryMarker], target_language: &str) -> Restored {
        let use_translation = self.translates_into(target_language);
        let mut restored = text.to_string();
        let mut unresolved = 0;

        for marker in markers {
            if !restored.contains(&marker.marker) {
                unresolved += 1;
                continue;
            }
            let replacement = if use_translation {
                &marker.target_translation
            } else {
                &marker.original_term
            };
            restored = restored.replace(&marker.marker, replacement);
        }

        if let Some(padding) = markers.first().and_then(|m| marker_padding(&m.marker)) {
            unresolved += MARKER_TOKEN
                .captures_iter(&restored)
                .filter(|caps| caps[1].len() == padding)
                .count();
        }

        if unresolved > 0 {
            warn!("{} glossary marker(s) could not be restored", unresolved);
        }

        Restored {
            text: restored,
            unresolved_markers: unresolved,
        }
    }

    /// Entries whose term occurs in `text`, case-insensitive substring match
    pub fn terms_in(&self, text: &str) -> Vec<&GlossaryEntry> {
        let lowered = text.to_lowercase();
        self.entries()
            .filter(|entry| lowered.contains(&entry.term.to_lowercase()))
            .collect()
    }

    /// Whether restored markers should use the dictionary translation
    pub fn translates_into(&self, target_language: &str) -> bool {
        language_utils::normalize_detected(target_language)
            == language_utils::normalize_detected(&self.target_language)
    }
}

/// Case-insensitive pattern with word boundaries only on word-character edges
fn term_pattern(term: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let leading = if term.chars().next().is_some_and(is_word) { r"\b" } else { "" };
    let trailing = if term.chars().next_back().is_some_and(is_word) { r"\b" } else { "" };
    format!(r"(?i){}{}{}", leading, regex::escape(term), trailing)
}

/// Shortest marker prefix whose tokens do not already occur in `text`
fn marker_prefix(text: &str) -> String {
    let taken: HashSet<usize> = MARKER_TOKEN
        .captures_iter(text)
        .map(|caps| caps[1].len())
        .collect();
    let padding = (0..).find(|n| !taken.contains(n)).unwrap_or(0);
    format!("{}{}", MARKER_PREFIX, "X".repeat(padding))
}

fn marker_padding(marker: &str) -> Option<usize> {
    MARKER_TOKEN.captures(marker).map(|caps| caps[1].len())
}
