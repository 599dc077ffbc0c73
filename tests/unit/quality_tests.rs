/*!
 * Tests for the quality evaluator
 */

use std::sync::Arc;

use multi_translate::translation::glossary::Glossary;
use multi_translate::translation::model::TranslationResult;
use multi_translate::translation::quality::{QualityEvaluator, length_ratio};

fn candidate(text: &str, provider: &str, base: f64) -> TranslationResult {
    TranslationResult::new(text, provider, base)
}

/// Test the reference case keeps the base confidence
#[test]
fn test_score_withHelloWorld_shouldStayAtBase() {
    let evaluator = QualityEvaluator::default();
    let scored = evaluator.score("Hello world", candidate("你好，世界", "DeepL", 95.0));

    assert_eq!(scored.final_score, 95.0);
    assert!((scored.length_ratio - 5.0 / 11.0).abs() < 1e-9);
}

/// Test scores always stay within 0..=100
#[test]
fn test_score_withExtremeBases_shouldClamp() {
    let evaluator = QualityEvaluator::default();

    let high = evaluator.score("Hello world", candidate("Bonjour le monde", "A", 250.0));
    assert_eq!(high.final_score, 100.0);

    let low = evaluator.score("Hello world", candidate("Hello world", "B", 10.0));
    assert_eq!(low.final_score, 0.0);

    let negative = evaluator.score("Hello world", candidate("x", "C", -5.0));
    assert_eq!(negative.final_score, 0.0);
}

/// Test empty output always scores zero
#[test]
fn test_score_withEmptyOutput_shouldBeZero() {
    let evaluator = QualityEvaluator::default();
    for text in ["", " ", "\n\t"] {
        let scored = evaluator.score("The API works", candidate(text, "Empty", 95.0));
        assert_eq!(scored.final_score, 0.0);
    }
}

/// Test identity output is penalized by at least 30
#[test]
fn test_score_withIdentityOutput_shouldLoseThirty() {
    let evaluator = QualityEvaluator::default();

    let scored = evaluator.score("Hello world", candidate("  Hello world ", "Echo", 90.0));
    assert_eq!(scored.final_score, 60.0);

    // Glossary terms carried verbatim do not earn a bonus on an echo
    let scored = evaluator.score("The API is down", candidate("The API is down", "Echo", 90.0));
    assert!(scored.final_score <= 60.0);
}

/// Test the length band boundaries in both directions
#[test]
fn test_score_lengthBoundaries_shouldBeInclusive() {
    let evaluator = QualityEvaluator::default();
    let original = "abcdefghij";

    let at_low = evaluator.score(original, candidate("xyz", "P", 80.0));
    assert_eq!(at_low.final_score, 80.0);

    let below_low = evaluator.score(original, candidate("xy", "P", 80.0));
    assert_eq!(below_low.final_score, 70.0);

    let at_high = evaluator.score(original, candidate(&"x".repeat(30), "P", 80.0));
    assert_eq!(at_high.final_score, 80.0);

    let above_high = evaluator.score(original, candidate(&"x".repeat(31), "P", 80.0));
    assert_eq!(above_high.final_score, 70.0);
}

/// Test length is measured in characters, not bytes
#[test]
fn test_lengthRatio_shouldCountChars() {
    assert_eq!(length_ratio("abcd", "数据库数"), 1.0);
    assert_eq!(length_ratio("", "anything"), 0.0);
}

/// Test the terminology bonus
#[test]
fn test_score_withSatisfiedTerms_shouldAddBonus() {
    let evaluator = QualityEvaluator::default();

    let translated = evaluator.score("We need a database", candidate("我们需要一个数据库", "P", 90.0));
    assert_eq!(translated.terminology_hit_count, 1);
    assert_eq!(translated.final_score, 95.0);

    let verbatim = evaluator.score("Call the API now", candidate("Appelle l'API maintenant", "P", 90.0));
    assert_eq!(verbatim.final_score, 95.0);

    let missing = evaluator.score("We need a database", candidate("我们需要一个东西", "P", 90.0));
    assert_eq!(missing.final_score, 90.0);
}

/// Test unresolved markers block the bonus
#[test]
fn test_score_withUnresolvedMarkers_shouldNotAddBonus() {
    let evaluator = QualityEvaluator::default();
    let mut result = candidate("我们需要一个数据库", "P", 90.0);
    result.unresolved_markers = 1;

    let scored = evaluator.score("We need a database", result);
    assert_eq!(scored.final_score, 90.0);
}

/// Test ranking order and tie breaking
#[test]
fn test_evaluate_shouldSortByScoreThenBaseThenOrder() {
    let evaluator = QualityEvaluator::new(Arc::new(Glossary::empty("zh")));
    let ranked = evaluator.evaluate(
        "Hello world",
        vec![
            candidate("Hola mundo", "First", 80.0),
            candidate("Hello world", "Echo", 99.0),
            candidate("Ciao mondo", "Second", 80.0),
            candidate("Hallo Welt", "Best", 90.0),
        ],
    );

    let names: Vec<&str> = ranked.iter().map(|r| r.provider_name()).collect();
    assert_eq!(names, vec!["Best", "First", "Second", "Echo"]);
    assert!(ranked.windows(2).all(|w| w[0].final_score >= w[1].final_score));
}

/// Test non-finite base confidence never escapes the score range
#[test]
fn test_score_withNonFiniteBase_shouldBeZero() {
    let evaluator = QualityEvaluator::default();
    for base in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let scored = evaluator.score("Hello world", candidate("Bonjour le monde", "Odd", base));
        assert_eq!(scored.final_score, 0.0);
    }
}
