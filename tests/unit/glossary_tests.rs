/*!
 * Tests for glossary substitution
 */

use multi_translate::translation::glossary::{Glossary, GlossaryEntry, default_entries};

/// Test the built-in dictionary size and target
#[test]
fn test_defaultGlossary_shouldShipAllTerms() {
    let glossary = Glossary::default();
    assert_eq!(glossary.len(), 27);
    assert_eq!(default_entries().len(), 27);
    assert_eq!(glossary.target_language(), "zh");
}

/// Test identity round trip reconstructs the input for non-glossary targets
#[test]
fn test_roundTrip_withUnchangedOutput_shouldReconstructInput() {
    let glossary = Glossary::default();
    let inputs = [
        "Our API uses machine learning and a neural network.",
        "ROI, revenue and the PROFIT MARGIN are in the contract.",
        "Nothing to protect here.",
        "",
    ];

    for input in inputs {
        let marked = glossary.preprocess(input);
        let restored = glossary.postprocess(&marked.text, &marked.markers, "en");
        assert_eq!(restored.text, input);
        assert_eq!(restored.unresolved_markers, 0);
    }
}

/// Test matching is whole word only
#[test]
fn test_preprocess_withEmbeddedTerm_shouldNotMatchPartialWords() {
    let glossary = Glossary::default();
    let marked = glossary.preprocess("Interfaces and contractors are not terms, but an interface is.");

    assert_eq!(marked.markers.len(), 1);
    assert_eq!(marked.markers[0].original_term, "interface");
    assert!(marked.text.contains("Interfaces"));
    assert!(marked.text.contains("contractors"));
}

/// Test each occurrence gets its own marker with exact source case
#[test]
fn test_preprocess_withRepeatedTerm_shouldUseDistinctMarkers() {
    let glossary = Glossary::default();
    let marked = glossary.preprocess("Database, database, DATABASE");

    assert_eq!(marked.markers.len(), 3);
    let originals: Vec<&str> = marked.markers.iter().map(|m| m.original_term.as_str()).collect();
    assert_eq!(originals, vec!["Database", "database", "DATABASE"]);

    let mut tokens: Vec<&str> = marked.markers.iter().map(|m| m.marker.as_str()).collect();
    tokens.dedup();
    assert_eq!(tokens.len(), 3);
    assert!(marked.markers.iter().all(|m| m.marker.chars().all(|c| c.is_ascii_alphanumeric())));
}

/// Test restoration into the glossary language uses the dictionary translation
#[test]
fn test_postprocess_withGlossaryTarget_shouldInsertTranslations() {
    let glossary = Glossary::default();
    let marked = glossary.preprocess("machine learning for diagnosis");
    let provider_output = marked.text.replace(" for ", " 用于 ");

    let restored = glossary.postprocess(&provider_output, &marked.markers, "zh");
    assert!(restored.text.contains("机器学习"));
    assert!(restored.text.contains("诊断"));
    assert!(!restored.text.contains("ZQTERM"));
}

/// Test a custom glossary in another target language
#[test]
fn test_customGlossary_withFrenchTarget_shouldRestoreFrenchTerms() {
    let glossary = Glossary::new(
        vec![
            GlossaryEntry::new("invoice", "facture"),
            GlossaryEntry::new("purchase order", "bon de commande"),
        ],
        "fr",
    )
    .unwrap();

    let marked = glossary.preprocess("Attach the purchase order to the invoice");
    assert_eq!(marked.markers.len(), 2);

    let restored = glossary.postprocess(&marked.text, &marked.markers, "fr");
    assert_eq!(restored.text, "Attach the bon de commande to the facture");
}

/// Test terms_in uses substring matching
#[test]
fn test_termsIn_shouldFindCaseInsensitiveSubstrings() {
    let glossary = Glossary::default();
    let found: Vec<&str> = glossary
        .terms_in("Backend DATABASE migration")
        .iter()
        .map(|e| e.term.as_str())
        .collect();

    assert_eq!(found.len(), 2);
    assert!(found.contains(&"backend"));
    assert!(found.contains(&"database"));
    assert!(glossary.terms_in("hello world").is_empty());
}

/// Test an empty glossary never touches the text
#[test]
fn test_emptyGlossary_shouldLeaveTextAlone() {
    let glossary = Glossary::empty("zh");
    let marked = glossary.preprocess("API database");
    assert!(!marked.has_markers());
    assert_eq!(marked.text, "API database");
}

/// Test marker-shaped tokens already in the input survive a round trip
#[test]
fn test_roundTrip_withMarkerShapedInput_shouldKeepUserTokens() {
    let glossary = Glossary::default();
    for input in [
        "Token ZQTERM0QZ and the API",
        "ZQTERM0QZ ZQTERMX1QZ then the database and the API",
    ] {
        let marked = glossary.preprocess(input);
        assert!(marked.has_markers());
        for marker in &marked.markers {
            assert!(!input.contains(&marker.marker), "{} collides with the input", marker.marker);
        }

        let restored = glossary.postprocess(&marked.text, &marked.markers, "en");
        assert_eq!(restored.text, input);
        assert_eq!(restored.unresolved_markers, 0);
    }
}

/// Test user tokens are not counted as unrestored markers
#[test]
fn test_postprocess_withMarkerShapedInput_shouldOnlyRestoreOwnMarkers() {
    let glossary = Glossary::default();
    let marked = glossary.preprocess("Keep ZQTERM0QZ, translate the database");
    let provider_output = marked.text.replace("Keep", "保留").replace("translate the", "翻译");

    let restored = glossary.postprocess(&provider_output, &marked.markers, "zh");
    assert_eq!(restored.text, "保留 ZQTERM0QZ, 翻译 数据库");
    assert_eq!(restored.unresolved_markers, 0);
}

/// Test terms starting or ending with punctuation still match
#[test]
fn test_preprocess_withPunctuatedTerms_shouldMatch() {
    let glossary = Glossary::new(
        vec![
            GlossaryEntry::new("C++", "C++语言"),
            GlossaryEntry::new(".NET", ".NET平台"),
            GlossaryEntry::new("U.S.", "美国"),
        ],
        "zh",
    )
    .unwrap();

    let input = "We write C++ code on .NET in the U.S. office";
    let marked = glossary.preprocess(input);
    assert_eq!(marked.markers.len(), 3);
    assert!(!marked.text.contains("C++"));

    let restored = glossary.postprocess(&marked.text, &marked.markers, "zh");
    assert_eq!(restored.text, "We write C++语言 code on .NET平台 in the 美国 office");

    // Word edges still need a boundary
    assert!(!glossary.preprocess("AC++ is not a term").has_markers());
}

/// Test duplicate terms differing only in case collapse to one entry
#[test]
fn test_new_withCaseOnlyDuplicates_shouldKeepOneEntry() {
    let glossary = Glossary::new(
        vec![
            GlossaryEntry::new("API", "API"),
            GlossaryEntry::new("ROI", "投资回报率"),
            GlossaryEntry::new("api", "接口"),
        ],
        "zh",
    )
    .unwrap();

    assert_eq!(glossary.len(), 2);
}
