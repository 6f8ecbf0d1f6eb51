//! Risk scoring configuration

use guardian_core::Category;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A named topic detected by keyword presence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextTopic {
    /// Lowercase topic name, e.g. "political"
    pub name: String,

    /// Keywords matched case-insensitively as substrings
    pub keywords: Vec<String>,
}

impl ContextTopic {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Weights, topics and caps used by the risk scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Points per detected span, by category; configured entries override
    /// the built-in weights one by one
    #[serde(deserialize_with = "merge_weights")]
    pub weights: BTreeMap<Category, u32>,

    /// Weight for categories missing from `weights`
    pub default_weight: u32,

    /// Topics checked for the context factor, in report order
    pub context_topics: Vec<ContextTopic>,

    /// Points awarded per topic present
    pub context_points: u32,

    pub density_cap: u32,
    pub sensitivity_cap: u32,
    pub context_cap: u32,
}

impl RiskConfig {
    pub fn weight(&self, category: Category) -> u32 {
        self.weights
            .get(&category)
            .copied()
            .unwrap_or(self.default_weight)
    }
}

fn default_weights() -> BTreeMap<Category, u32> {
    [
        (Category::Name, 5),
        (Category::Email, 10),
        (Category::Phone, 10),
        (Category::Address, 15),
        (Category::Id, 25),
        (Category::Financial, 30),
        (Category::Health, 35),
        (Category::Other, 5),
        (Category::IndianId, 25),
        (Category::IndianFinancial, 30),
        (Category::CreditCard, 30),
        (Category::Ssn, 25),
        (Category::Passport, 25),
        (Category::DriversLicense, 25),
        (Category::Vin, 15),
        (Category::IpAddress, 10),
        (Category::MacAddress, 10),
        (Category::PatientId, 35),
    ]
    .into_iter()
    .collect()
}

fn merge_weights<'de, D>(deserializer: D) -> Result<BTreeMap<Category, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<Category, u32>::deserialize(deserializer)?;
    let mut weights = default_weights();
    weights.extend(overrides);
    Ok(weights)
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            default_weight: 5,
            context_topics: vec![
                ContextTopic::new(
                    "political",
                    &["government", "election", "policy", "party", "president", "vote"],
                ),
                ContextTopic::new(
                    "organizational",
                    &["confidential", "internal", "company", "corporate", "proprietary"],
                ),
                ContextTopic::new(
                    "financial",
                    &["bank", "account", "credit", "money", "transaction", "payment"],
                ),
                ContextTopic::new(
                    "health",
                    &["health", "medical", "doctor", "patient", "diagnosis", "treatment"],
                ),
                ContextTopic::new(
                    "legal",
                    &["legal", "lawsuit", "attorney", "court", "judge", "contract"],
                ),
            ],
            context_points: 10,
            density_cap: 25,
            sensitivity_cap: 40,
            context_cap: 35,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let config = RiskConfig::default();

        assert_eq!(config.weight(Category::Health), 35);
        assert_eq!(config.weight(Category::Financial), 30);
        assert_eq!(config.weight(Category::Id), 25);
        assert_eq!(config.weight(Category::Address), 15);
        assert_eq!(config.weight(Category::Email), 10);
        assert_eq!(config.weight(Category::Name), 5);
        assert!(Category::ALL.iter().all(|c| config.weight(*c) > 0));
    }

    #[test]
    fn test_missing_weight_uses_default() {
        let mut config = RiskConfig::default();
        config.weights.remove(&Category::Vin);
        config.default_weight = 7;

        assert_eq!(config.weight(Category::Vin), 7);
    }

    #[test]
    fn test_partial_config_deserialization() {
        let config: RiskConfig =
            serde_json::from_str(r#"{"context_cap": 20, "weights": {"email": 50}}"#).unwrap();

        assert_eq!(config.context_cap, 20);
        assert_eq!(config.weight(Category::Email), 50);
        assert_eq!(config.weight(Category::Phone), 10);
        assert_eq!(config.weight(Category::Health), 35);
        assert_eq!(config.weight(Category::Financial), 30);
        assert_eq!(config.weights.len(), Category::ALL.len());
        assert_eq!(config.context_topics.len(), 5);
    }
}
