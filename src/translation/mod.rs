/*!
 * Multi-provider translation.
 *
 * This module contains the translation pipeline, split into:
 *
 * - `model`: Requests, results and diagnostics
 * - `glossary`: Terminology markers applied around provider calls
 * - `quality`: Heuristic scoring and ranking of provider results
 * - `orchestrator`: Provider selection, concurrent fan-out and result assembly
 */

// Re-export main types for easier usage
pub use self::glossary::{Glossary, GlossaryEntry, GlossaryMarker, MarkedText, Restored};
pub use self::model::{
    FastTranslation, HighQualityTranslation, ImageTranslation, ScoredResult, TranslationDiagnostics,
    TranslationRequest, TranslationResult,
};
pub use self::orchestrator::TranslationOrchestrator;
pub use self::quality::QualityEvaluator;

// Submodules
pub mod glossary;
pub mod model;
pub mod orchestrator;
pub mod quality;
