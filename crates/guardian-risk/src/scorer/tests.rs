use super::*;
use crate::config::ContextTopic;
use guardian_core::Category;
use proptest::prelude::*;

fn scorer() -> RiskScorer {
    RiskScorer::new(RiskConfig::default()).unwrap()
}

fn counts(entries: &[(Category, usize)]) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    for (category, count) in entries {
        counts.set(*category, *count);
    }
    counts
}

#[test]
fn test_level_boundaries() {
    assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(24), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(25), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(49), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(50), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(74), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(75), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
}

#[test]
fn test_level_serialization() {
    assert_eq!(serde_json::to_string(&RiskLevel::Critical).unwrap(), "\"critical\"");
    assert_eq!(RiskLevel::Medium.to_string(), "medium");
}

#[test]
fn test_empty_text_scores_zero() {
    let result = scorer().score("", &CategoryCounts::new());

    assert_eq!(result.score, 0);
    assert_eq!(result.level, RiskLevel::Low);
    assert_eq!(result.factors.len(), 1);
    assert_eq!(result.factors[0].name, "PII Density");
    assert_eq!(result.factors[0].points, 0);
}

#[test]
fn test_factor_order_and_points() {
    // 100 characters, no context keywords
    let text = "x".repeat(100);
    let result = scorer().score(&text, &counts(&[(Category::Email, 1), (Category::Phone, 2)]));

    let names: Vec<&str> = result.factors.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["PII Density", "Contains email", "Contains phone"]);

    // 3 spans per 100 chars is a density of 30, far past the cap
    assert_eq!(result.factors[0].points, 25);
    assert_eq!(result.factors[1].points, 10);
    assert_eq!(result.factors[2].points, 20);
    assert_eq!(result.score, 25 + 30);
    assert_eq!(result.level, RiskLevel::High);
}

#[test]
fn test_sensitivity_cap_keeps_factor_points() {
    let text = "y".repeat(10_000);
    let result = scorer().score(&text, &counts(&[(Category::Health, 3)]));

    // density = 3 / 10000 * 1000 = 0.3, 0.3 * 25 = 7.5 rounds to 8
    assert_eq!(result.factors[0].points, 8);
    assert_eq!(result.factors[1].points, 105);
    assert_eq!(result.score, 8 + 40);
}

#[test]
fn test_context_topics() {
    let text = "The company attorney asked the Bank about the ELECTION and a patient.";
    let result = scorer().score(text, &CategoryCounts::new());

    let names: Vec<&str> = result.factors.iter().skip(1).map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Political Context",
            "Organizational Context",
            "Financial Context",
            "Health Context",
            "Legal Context",
        ]
    );
    assert!(result.factors.iter().skip(1).all(|f| f.points == 10));
    // Five topics give 50 points, capped at 35
    assert_eq!(result.score, 35);
    assert_eq!(result.level, RiskLevel::Medium);
}

#[test]
fn test_context_presence_is_binary() {
    let once = scorer().score("bank", &CategoryCounts::new());
    let many = scorer().score("bank bank money payment bank", &CategoryCounts::new());

    assert_eq!(once.score, 10);
    assert_eq!(many.score, 10);
}

#[test]
fn test_total_capped_at_100() {
    let text = "confidential bank patient court election ".repeat(3);
    let result = scorer().score(&text, &counts(&[(Category::Financial, 10), (Category::Ssn, 10)]));

    assert_eq!(result.score, 100);
    assert_eq!(result.level, RiskLevel::Critical);
}

#[test]
fn test_density_counts_characters() {
    // 50 multi-byte characters
    let text = "é".repeat(50);
    let result = scorer().score(&text, &counts(&[(Category::Name, 1)]));

    assert!(result.factors[0].description.contains("50 characters"));
    assert_eq!(result.factors[0].points, 25);
}

#[test]
fn test_custom_topics() {
    let config = RiskConfig {
        context_topics: vec![ContextTopic::new("gaming", &["dragon", "quest"])],
        ..RiskConfig::default()
    };
    let scorer = RiskScorer::new(config).unwrap();

    let result = scorer.score("A DRAGON appears", &CategoryCounts::new());
    assert_eq!(result.factors.last().unwrap().name, "Gaming Context");
    assert_eq!(result.score, 10);
}

proptest! {
    #[test]
    fn adding_an_instance_never_lowers_the_score(
        text in "[a-z ]{0,200}",
        index in 0usize..Category::ALL.len(),
        base in 0usize..5,
    ) {
        let scorer = scorer();
        let category = Category::ALL[index];

        let before = scorer.score(&text, &counts(&[(category, base)]));
        let after = scorer.score(&text, &counts(&[(category, base + 1)]));

        prop_assert!(after.score >= before.score);
        prop_assert!(after.score <= 100);
    }
}
