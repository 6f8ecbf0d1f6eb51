//! Span rewriting: redaction, display encryption and anonymization

mod anonymizer;
mod cipher;
mod corpus;
mod segments;
mod standard_rewriter;

pub use anonymizer::Anonymizer;
pub use cipher::DisplayCipher;
pub use corpus::SyntheticCorpus;
pub use segments::render_segments;
pub use standard_rewriter::StandardRewriter;

use crate::detector::Span;
use guardian_core::{Category, Error};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Rewrite mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteMode {
    /// Replace with a plausible synthetic value of the same kind
    #[default]
    Anonymize,

    /// Replace with a fixed per-category placeholder
    Redact,

    /// Replace with a truncated cipher text. One-way: the full cipher text is
    /// discarded, so the original cannot be recovered from the output.
    Encrypt,
}

impl RewriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteMode::Anonymize => "anonymize",
            RewriteMode::Redact => "redact",
            RewriteMode::Encrypt => "encrypt",
        }
    }
}

impl fmt::Display for RewriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewriteMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anonymize" => Ok(RewriteMode::Anonymize),
            "redact" => Ok(RewriteMode::Redact),
            "encrypt" => Ok(RewriteMode::Encrypt),
            other => Err(Error::Config(format!(
                "Invalid rewrite mode '{}'. Use 'anonymize', 'redact' or 'encrypt'",
                other
            ))),
        }
    }
}

/// One piece of a rendered text: either untouched text or a marked span.
///
/// `original_text` carries the un-obfuscated span text for tooltips. Strip it
/// with [`RenderSegment::without_original`] before persisting or transmitting
/// segments whose purpose is confidentiality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderSegment {
    Plain {
        text: String,
    },
    Marked {
        category: Category,
        display_text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        original_text: Option<String>,
    },
}

impl RenderSegment {
    /// Text shown for this segment
    pub fn display_text(&self) -> &str {
        match self {
            RenderSegment::Plain { text } => text,
            RenderSegment::Marked { display_text, .. } => display_text,
        }
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, RenderSegment::Marked { .. })
    }

    /// Copy of this segment with the original span text removed
    pub fn without_original(&self) -> Self {
        match self {
            RenderSegment::Plain { text } => RenderSegment::Plain { text: text.clone() },
            RenderSegment::Marked {
                category,
                display_text,
                ..
            } => RenderSegment::Marked {
                category: *category,
                display_text: display_text.clone(),
                original_text: None,
            },
        }
    }
}

/// Result of rewriting a text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewriteOutput {
    /// The fully rewritten text
    pub text: String,

    /// Input spans in text order; selected spans carry their replacement
    pub spans: Vec<Span>,

    /// Plain and marked segments partitioning the original text
    pub segments: Vec<RenderSegment>,
}

impl RewriteOutput {
    /// Remove original span text from segments and spans.
    ///
    /// Spans keep their offsets and categories; their `text` is replaced by
    /// the rewritten value, or emptied when they were not processed.
    pub fn strip_originals(&mut self) {
        for segment in &mut self.segments {
            *segment = segment.without_original();
        }
        for span in &mut self.spans {
            span.text = span.rewritten.clone().unwrap_or_default();
        }
    }
}

/// Trait for rewriting sensitive spans in text
pub trait SpanRewriter: Send + Sync {
    /// Rewrite the spans whose category is selected, leaving the rest intact
    fn rewrite(
        &self,
        text: &str,
        spans: &[Span],
        categories: &HashSet<Category>,
        mode: RewriteMode,
    ) -> RewriteOutput;
}

/// Settings for the display cipher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptionConfig {
    /// Secret the cipher key is derived from
    pub passphrase: String,

    /// Key derivation salt
    #[serde(default = "default_salt")]
    pub salt: String,

    /// Number of encoded characters kept for display
    #[serde(default = "default_prefix_len")]
    pub prefix_len: usize,

    /// Appended after the truncated cipher text
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_salt() -> String {
    "guardian-display-cipher".to_string()
}

fn default_prefix_len() -> usize {
    20
}

fn default_marker() -> String {
    "...".to_string()
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            passphrase: "PrivacyGuardian".to_string(),
            salt: default_salt(),
            prefix_len: default_prefix_len(),
            marker: default_marker(),
        }
    }
}

/// Configuration for span rewriting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriterConfig {
    /// Redaction placeholder per category; configured entries override the
    /// built-in placeholders one by one
    #[serde(
        default = "default_placeholders",
        deserialize_with = "merge_placeholders"
    )]
    pub placeholders: BTreeMap<Category, String>,

    /// Placeholder for categories missing from `placeholders`
    #[serde(default = "default_fallback_placeholder")]
    pub fallback_placeholder: String,

    /// Pools of synthetic values for anonymization
    #[serde(default)]
    pub corpus: SyntheticCorpus,

    #[serde(default)]
    pub encryption: EncryptionConfig,
}

impl RewriterConfig {
    /// Placeholder used when redacting `category`
    pub fn placeholder(&self, category: Category) -> &str {
        self.placeholders
            .get(&category)
            .map(String::as_str)
            .unwrap_or(&self.fallback_placeholder)
    }
}

fn default_fallback_placeholder() -> String {
    "[REDACTED]".to_string()
}

fn merge_placeholders<'de, D>(deserializer: D) -> Result<BTreeMap<Category, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<Category, String>::deserialize(deserializer)?;
    let mut placeholders = default_placeholders();
    placeholders.extend(overrides);
    Ok(placeholders)
}

fn default_placeholders() -> BTreeMap<Category, String> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let placeholder = match category {
                Category::Name => "[NAME REDACTED]",
                Category::Email => "[EMAIL REDACTED]",
                Category::Phone => "[PHONE REDACTED]",
                Category::Address => "[ADDRESS REDACTED]",
                Category::Id => "[ID REDACTED]",
                Category::Financial => "[FINANCIAL INFO REDACTED]",
                Category::Health => "[HEALTH INFO REDACTED]",
                Category::Other => "[REDACTED]",
                Category::IndianId => "[INDIAN ID REDACTED]",
                Category::IndianFinancial => "[INDIAN FINANCIAL INFO REDACTED]",
                Category::CreditCard => "[CREDIT CARD REDACTED]",
                Category::Ssn => "[SSN REDACTED]",
                Category::Passport => "[PASSPORT REDACTED]",
                Category::DriversLicense => "[DRIVERS LICENSE REDACTED]",
                Category::Vin => "[VIN REDACTED]",
                Category::IpAddress => "[IP ADDRESS REDACTED]",
                Category::MacAddress => "[MAC ADDRESS REDACTED]",
                Category::PatientId => "[PATIENT ID REDACTED]",
            };
            (category, placeholder.to_string())
        })
        .collect()
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            placeholders: default_placeholders(),
            fallback_placeholder: default_fallback_placeholder(),
            corpus: SyntheticCorpus::default(),
            encryption: EncryptionConfig::default(),
        }
    }
}
