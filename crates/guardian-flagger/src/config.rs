//! Content flagging configuration

use serde::{Deserialize, Serialize};

/// A labelled list of keywords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCategory {
    /// Label reported on the flag, e.g. "Dangerous Content"
    pub name: String,

    /// Keywords matched case-insensitively as substrings
    pub keywords: Vec<String>,
}

impl KeywordCategory {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: strings(keywords),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Keyword tables and thresholds for the content flagger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlaggerConfig {
    pub categories: Vec<KeywordCategory>,

    /// Category that receives the directive bonus and jailbreak flags
    pub adversarial_category: String,

    /// Category that on its own does not count as flagged content
    pub safe_category: String,

    /// Second-person directives that raise adversarial confidence
    pub directive_phrases: Vec<String>,

    /// Phrases that always produce an adversarial flag
    pub jailbreak_phrases: Vec<String>,

    /// Confidence of a flag produced only by a jailbreak phrase
    pub jailbreak_confidence: u32,

    /// Maximum distance, in characters, between two keyword occurrences
    /// for the proximity bonus
    pub proximity_window: usize,
}

impl Default for FlaggerConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                KeywordCategory::new(
                    "Security Risk",
                    &[
                        "password",
                        "credentials",
                        "api key",
                        "secret key",
                        "private key",
                        "access token",
                        "vulnerability",
                        "exploit",
                        "malware",
                        "phishing",
                        "hack",
                    ],
                ),
                KeywordCategory::new(
                    "Potentially Confidential",
                    &[
                        "confidential",
                        "secret",
                        "private",
                        "internal",
                        "proprietary",
                        "restricted",
                        "classified",
                        "do not share",
                    ],
                ),
                KeywordCategory::new(
                    "Financial Risk",
                    &[
                        "bank account",
                        "credit card",
                        "routing number",
                        "wire transfer",
                        "investment",
                        "salary",
                        "tax return",
                        "insider trading",
                    ],
                ),
                KeywordCategory::new(
                    "Medical Risk",
                    &[
                        "diagnosis",
                        "prescription",
                        "medical history",
                        "patient",
                        "treatment",
                        "therapy",
                        "mental health",
                    ],
                ),
                KeywordCategory::new(
                    "Personal Risk",
                    &[
                        "home address",
                        "social security",
                        "date of birth",
                        "passport",
                        "phone number",
                        "maiden name",
                    ],
                ),
                KeywordCategory::new(
                    "Political Content",
                    &[
                        "election",
                        "party",
                        "campaign",
                        "vote",
                        "political",
                        "government",
                    ],
                ),
                KeywordCategory::new(
                    "Corporate Risk",
                    &[
                        "merger",
                        "acquisition",
                        "layoff",
                        "earnings report",
                        "trade secret",
                        "board meeting",
                        "unreleased",
                    ],
                ),
                KeywordCategory::new(
                    "Dangerous Content",
                    &[
                        "weapon",
                        "bomb",
                        "explosive",
                        "kill",
                        "attack",
                        "violence",
                        "poison",
                    ],
                ),
                KeywordCategory::new(
                    "Unethical Instructions",
                    &[
                        "steal",
                        "illegal",
                        "cheat",
                        "fraud",
                        "scam",
                        "launder",
                        "forge",
                        "blackmail",
                    ],
                ),
                KeywordCategory::new(
                    "Adversarial Prompting",
                    &[
                        "ignore previous instructions",
                        "ignore previous",
                        "previous instructions",
                        "reveal your",
                        "system prompt",
                        "disregard",
                        "override",
                        "bypass",
                        "jailbreak",
                        "pretend you are",
                    ],
                ),
                KeywordCategory::new(
                    "Discrimination/Hate",
                    &[
                        "racist",
                        "hate speech",
                        "inferior race",
                        "slur",
                        "discriminate",
                        "supremacy",
                    ],
                ),
                KeywordCategory::new(
                    "NSFW Content",
                    &["nsfw", "explicit", "pornographic", "nude", "sexual"],
                ),
                KeywordCategory::new(
                    "Data Scraping",
                    &[
                        "scrape",
                        "crawler",
                        "harvest emails",
                        "extract all",
                        "bulk download",
                        "dump the database",
                    ],
                ),
                KeywordCategory::new(
                    "Prompt Engineering",
                    &[
                        "you are an expert",
                        "step by step",
                        "your role is",
                        "chain of thought",
                        "few-shot",
                        "respond only with",
                    ],
                ),
                KeywordCategory::new(
                    "Safe Content",
                    &[
                        "hello",
                        "thank you",
                        "please help",
                        "weather",
                        "recipe",
                        "summarize",
                        "translate",
                    ],
                ),
            ],
            adversarial_category: "Adversarial Prompting".to_string(),
            safe_category: "Safe Content".to_string(),
            directive_phrases: strings(&["you must", "you have to", "you should", "i want you to"]),
            jailbreak_phrases: strings(&[
                "ignore previous instructions",
                "ignore all previous",
                "forget your training",
                "forget your instructions",
                "you are now",
                "do anything now",
                "developer mode",
                "without any restrictions",
            ]),
            jailbreak_confidence: 85,
            proximity_window: 50,
        }
    }
}
