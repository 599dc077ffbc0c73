/*!
 * Heuristic quality scoring for competing provider results.
 *
 * Each candidate starts from its provider's base confidence and is adjusted by:
 * - Empty output: score forced to zero
 * - Length ratio outside [0.3, 3.0]: penalty
 * - Output identical to the input: penalty
 * - Every glossary term carried over intact: small bonus
 */

use std::cmp::Ordering;
use std::sync::Arc;

use log::debug;

use crate::translation::glossary::Glossary;
use crate::translation::model::{ScoredResult, TranslationResult};

/// Lowest acceptable translated/original length ratio
pub const MIN_LENGTH_RATIO: f64 = 0.3;

/// Highest acceptable translated/original length ratio
pub const MAX_LENGTH_RATIO: f64 = 3.0;

/// Penalty for a length ratio outside the acceptable band
pub const LENGTH_PENALTY: f64 = 10.0;

/// Penalty for returning the input unchanged
pub const IDENTITY_PENALTY: f64 = 30.0;

/// Bonus when all glossary terms survived translation
pub const TERMINOLOGY_BONUS: f64 = 5.0;

/// Scores and ranks provider results
#[derive(Debug, Clone)]
pub struct QualityEvaluator {
    glossary: Arc<Glossary>,
}

impl Default for QualityEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(Glossary::default()))
    }
}

impl QualityEvaluator {
    pub fn new(glossary: Arc<Glossary>) -> Self {
        Self { glossary }
    }

    /// Score every candidate and sort them best first
    ///
    /// Ties on the final score fall back to the provider's base confidence,
    /// then to the order the candidates were given in.
    pub fn evaluate(&self, original_text: &str, candidates: Vec<TranslationResult>) -> Vec<ScoredResult> {
        let mut scored: Vec<ScoredResult> = candidates
            .into_iter()
            .map(|candidate| self.score(original_text, candidate))
            .collect();

        scored.sort_by(rank_order);
        scored
    }

    /// Score a single candidate against the text it was translated from
    pub fn score(&self, original_text: &str, candidate: TranslationResult) -> ScoredResult {
        let translated = candidate.translated_text.trim();
        let original = original_text.trim();

        let length_ratio = length_ratio(original_text, &candidate.translated_text);
        let terms = self.glossary.terms_in(original_text);
        let terminology_hit_count = terms.len();

        if translated.is_empty() {
            return ScoredResult {
                result: candidate,
                final_score: 0.0,
                length_ratio,
                terminology_hit_count,
            };
        }

        let mut score = candidate.base_confidence;

        if !original_text.is_empty() && !(MIN_LENGTH_RATIO..=MAX_LENGTH_RATIO).contains(&length_ratio) {
            score -= LENGTH_PENALTY;
        }

        let is_identity = translated == original;
        if is_identity {
            score -= IDENTITY_PENALTY;
        }

        if terminology_hit_count > 0 && !is_identity && candidate.unresolved_markers == 0 {
            let lowered = translated.to_lowercase();
            let all_satisfied = terms.iter().all(|entry| {
                lowered.contains(&entry.translation.to_lowercase()) || lowered.contains(&entry.term.to_lowercase())
            });
            if all_satisfied {
                score += TERMINOLOGY_BONUS;
            }
        }

        let final_score = if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 };
        debug!(
            "{} scored {:.1} (base {:.1}, ratio {:.2}, terms {})",
            candidate.provider_name, final_score, candidate.base_confidence, length_ratio, terminology_hit_count
        );

        ScoredResult {
            result: candidate,
            final_score,
            length_ratio,
            terminology_hit_count,
        }
    }
}

/// Character-count ratio of translated to original text, 0.0 for an empty original
pub fn length_ratio(original_text: &str, translated_text: &str) -> f64 {
    let original_len = original_text.chars().count();
    if original_len == 0 {
        return 0.0;
    }
    translated_text.chars().count() as f64 / original_len as f64
}

/// Ordering used when ranking, exposed for callers merging result lists
pub fn rank_order(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.final_score
        .total_cmp(&a.final_score)
        .then_with(|| b.result.base_confidence.total_cmp(&a.result.base_confidence))
}
