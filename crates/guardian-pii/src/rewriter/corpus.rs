//! Pools of plausible values used by the anonymizer

use serde::{Deserialize, Serialize};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Synthetic value pools.
///
/// Every list must be non-empty; [`SyntheticCorpus::empty_lists`] reports the
/// ones that are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticCorpus {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub email_domains: Vec<String>,
    pub street_names: Vec<String>,
    pub cities: Vec<String>,
    pub states: Vec<String>,
    pub hospitals: Vec<String>,
    pub conditions: Vec<String>,
    pub medications: Vec<String>,
    pub banks: Vec<String>,
    pub indian_id_types: Vec<String>,
}

impl SyntheticCorpus {
    /// Names of the lists that hold no values
    pub fn empty_lists(&self) -> Vec<&'static str> {
        [
            ("first_names", &self.first_names),
            ("last_names", &self.last_names),
            ("email_domains", &self.email_domains),
            ("street_names", &self.street_names),
            ("cities", &self.cities),
            ("states", &self.states),
            ("hospitals", &self.hospitals),
            ("conditions", &self.conditions),
            ("medications", &self.medications),
            ("banks", &self.banks),
            ("indian_id_types", &self.indian_id_types),
        ]
        .into_iter()
        .filter(|(_, list)| list.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl Default for SyntheticCorpus {
    fn default() -> Self {
        Self {
            first_names: strings(&[
                "John", "Jane", "Michael", "Sarah", "Robert", "Emily", "David", "Lisa", "James",
                "Mary", "William", "Emma", "Richard", "Linda", "Thomas", "Susan", "Rahul", "Priya",
                "Amit", "Neha", "Raj", "Ananya", "Vikram", "Meera",
            ]),
            last_names: strings(&[
                "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
                "Anderson", "Wilson", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Thompson",
                "Sharma", "Patel", "Singh", "Kumar", "Gupta", "Verma", "Mehra", "Joshi",
            ]),
            email_domains: strings(&[
                "example.com",
                "anonymous.org",
                "private.net",
                "redacted.com",
                "secure.net",
                "protected.org",
                "placeholder.com",
                "masked.net",
            ]),
            street_names: strings(&[
                "Maple Street",
                "Oak Avenue",
                "Cedar Lane",
                "Pine Road",
                "Elm Drive",
                "Birch Court",
                "Willow Way",
                "Spruce Boulevard",
                "Aspen Circle",
                "Sycamore Place",
                "MG Road",
                "Nehru Street",
                "Gandhi Marg",
                "Subhash Nagar",
                "Shivaji Lane",
            ]),
            cities: strings(&[
                "Springfield",
                "Riverside",
                "Madison",
                "Franklin",
                "Clinton",
                "Georgetown",
                "Arlington",
                "Bristol",
                "Salem",
                "Newport",
                "Mumbai",
                "Delhi",
                "Bangalore",
                "Chennai",
                "Kolkata",
                "Hyderabad",
                "Pune",
            ]),
            states: strings(&[
                "CA", "NY", "TX", "FL", "IL", "PA", "OH", "MI", "GA", "NC", "MH", "DL", "KA", "TN",
                "WB", "TS", "HR", "UP",
            ]),
            hospitals: strings(&[
                "Central Hospital",
                "Memorial Medical",
                "Unity Healthcare",
                "Providence Hospital",
                "St. Mary Medical Center",
                "Regional Hospital",
                "Community Health",
                "AIIMS",
                "Apollo Hospital",
                "Fortis Healthcare",
                "Max Hospital",
            ]),
            conditions: strings(&[
                "General Checkup",
                "Regular Visit",
                "Health Screening",
                "Annual Physical",
                "Routine Examination",
                "Wellness Check",
                "Medical Review",
            ]),
            medications: strings(&[
                "Standard Medication",
                "Common Treatment",
                "Regular Prescription",
                "Basic Medicine",
                "General Therapy",
                "Routine Treatment",
            ]),
            banks: strings(&[
                "State Bank",
                "National Bank",
                "City Union",
                "Federal Bank",
                "Reserve Bank",
                "HDFC Bank",
                "ICICI Bank",
                "SBI",
                "Axis Bank",
                "Canara Bank",
            ]),
            indian_id_types: strings(&[
                "Masked Aadhar",
                "Masked PAN",
                "Voter ID",
                "Driving License",
                "Passport",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_corpus_has_no_empty_lists() {
        assert!(SyntheticCorpus::default().empty_lists().is_empty());
    }

    #[test]
    fn test_empty_lists_reported_by_name() {
        let corpus = SyntheticCorpus {
            cities: Vec::new(),
            banks: Vec::new(),
            ..SyntheticCorpus::default()
        };

        assert_eq!(corpus.empty_lists(), vec!["cities", "banks"]);
    }

    #[test]
    fn test_partial_corpus_fills_missing_lists_from_defaults() {
        let corpus: SyntheticCorpus =
            serde_json::from_str(r#"{"first_names": ["Alex"], "last_names": ["Doe"]}"#).unwrap();

        assert_eq!(corpus.first_names, vec!["Alex"]);
        assert_eq!(corpus.last_names, vec!["Doe"]);
        assert_eq!(corpus.cities, SyntheticCorpus::default().cities);
    }
}
