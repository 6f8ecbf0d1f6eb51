//! Tests for span detector types

use super::*;

#[test]
fn test_span_from_input() {
    let text = "call 555-123-4567 now";
    let span = Span::from_input(text, 5, 17, Category::Phone).unwrap();

    assert_eq!(span.text, "555-123-4567");
    assert_eq!(span.len(), 12);
    assert!(!span.is_empty());
    assert!(span.rewritten.is_none());
}

#[test]
fn test_span_from_input_rejects_bad_ranges() {
    let text = "naïve";
    assert!(Span::from_input(text, 3, 3, Category::Name).is_none());
    assert!(Span::from_input(text, 4, 2, Category::Name).is_none());
    assert!(Span::from_input(text, 0, 99, Category::Name).is_none());
    // Byte 3 falls inside the two-byte 'ï'
    assert!(Span::from_input(text, 0, 3, Category::Name).is_none());
}

#[test]
fn test_span_serialization_omits_missing_rewrite() {
    let span = Span::from_input("test@example.com", 0, 16, Category::Email).unwrap();

    let json = serde_json::to_value(&span).unwrap();
    assert_eq!(json["category"], "email");
    assert!(json.get("rewritten").is_none());

    let back: Span = serde_json::from_value(json).unwrap();
    assert_eq!(back, span);
}

#[test]
fn test_detection_result_counts_match_spans() {
    let text = "a@b.co and c@d.co call 555-123-4567";
    let spans = vec![
        Span::from_input(text, 0, 6, Category::Email).unwrap(),
        Span::from_input(text, 11, 17, Category::Email).unwrap(),
        Span::from_input(text, 23, 35, Category::Phone).unwrap(),
    ];

    let result = DetectionResult::from_spans(spans);
    assert_eq!(result.counts.get(Category::Email), 2);
    assert_eq!(result.counts.get(Category::Phone), 1);
    assert_eq!(result.counts.total(), result.spans.len());
    assert_eq!(result.spans_of(Category::Email).count(), 2);
}

#[test]
fn test_detector_config_default_covers_every_category() {
    let config = DetectorConfig::default();

    for category in Category::ALL {
        assert!(
            config.patterns.iter().any(|p| p.category == category),
            "no default pattern for {}",
            category
        );
    }
}

#[test]
fn test_detector_config_default_registration_order() {
    let config = DetectorConfig::default();
    let position = |category: Category| {
        config
            .patterns
            .iter()
            .position(|p| p.category == category)
            .unwrap()
    };

    // Format-specific categories are registered ahead of the generic ones
    // they would otherwise tie with.
    assert!(position(Category::Ssn) < position(Category::Id));
    assert!(position(Category::CreditCard) < position(Category::Financial));
    assert!(position(Category::Email) < position(Category::Name));
}

#[test]
fn test_detector_config_only() {
    let config = DetectorConfig::default().only(&[Category::Phone, Category::Email]);

    let categories: Vec<Category> = config.patterns.iter().map(|p| p.category).collect();
    assert_eq!(categories, vec![Category::Email, Category::Phone]);
}

#[test]
fn test_detector_config_serialization() {
    let config = DetectorConfig {
        patterns: vec![
            PatternSpec::new(Category::CreditCard, r"\d{16}").validated(Validator::Luhn),
            PatternSpec::new(Category::Name, r"[A-Z][a-z]+"),
        ],
    };

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"luhn\""));

    let back: DetectorConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_pattern_spec_validator_defaults_to_none() {
    let spec: PatternSpec =
        serde_json::from_str(r#"{"category": "vin", "pattern": "[A-Z0-9]{17}"}"#).unwrap();

    assert_eq!(spec.category, Category::Vin);
    assert!(spec.validator.is_none());
}

#[test]
fn test_detector_finds_contact_details() {
    let detector = RegexSpanDetector::new(DetectorConfig::default()).unwrap();
    let text = "Contact John Smith at john.smith@example.com or (555) 123-4567.";
    let result = detector.detect(text);

    assert!(
        result
            .spans_of(Category::Email)
            .any(|s| s.text == "john.smith@example.com")
    );
    assert!(
        result
            .spans_of(Category::Phone)
            .any(|s| s.text == "(555) 123-4567")
    );
    assert!(result.counts.get(Category::Name) >= 1);
}

#[test]
fn test_detector_empty_input() {
    let detector = RegexSpanDetector::new(DetectorConfig::default()).unwrap();
    let result = detector.detect("");

    assert!(result.is_empty());
    assert_eq!(result.counts.total(), 0);
}
