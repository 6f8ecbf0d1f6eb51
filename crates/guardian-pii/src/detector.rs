//! Sensitive span detectors

mod consolidation;
mod regex_detector;

pub use regex_detector::RegexSpanDetector;

pub(crate) use consolidation::{RawMatch, consolidate};

use guardian_core::{Category, CategoryCounts};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A tagged, offset-addressed substring identified as sensitive.
///
/// Offsets are UTF-8 byte offsets into the original input, half-open
/// `[start, end)`, and always fall on character boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// The detected text, equal to `input[start..end]`
    pub text: String,

    /// Start position in the text
    pub start: usize,

    /// End position in the text (exclusive)
    pub end: usize,

    /// Category of sensitive data
    pub category: Category,

    /// Replacement chosen by the rewriter, if this span was processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewritten: Option<String>,
}

impl Span {
    /// Create a span over `input[start..end]`.
    ///
    /// Returns `None` when the range is empty, out of bounds, or not on
    /// character boundaries.
    pub fn from_input(input: &str, start: usize, end: usize, category: Category) -> Option<Self> {
        if start >= end {
            return None;
        }
        input.get(start..end).map(|text| Self {
            text: text.to_string(),
            start,
            end,
            category,
            rewritten: None,
        })
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Output of a detector run: the consolidated span set and its tally.
///
/// `spans` is sorted by `start` and non-overlapping, and
/// `counts.total() == spans.len()`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    pub spans: Vec<Span>,
    pub counts: CategoryCounts,
}

impl DetectionResult {
    /// Build a result from consolidated spans, tallying categories.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        let counts = spans.iter().map(|span| span.category).collect();
        Self { spans, counts }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Spans of a single category, in text order
    pub fn spans_of(&self, category: Category) -> impl Iterator<Item = &Span> + '_ {
        self.spans.iter().filter(move |span| span.category == category)
    }
}

/// Trait for detecting sensitive spans in text
pub trait SpanDetector: Send + Sync {
    /// Detect and consolidate sensitive spans in the given text
    fn detect(&self, text: &str) -> DetectionResult;

    /// Get the categories this detector can find
    fn supported_categories(&self) -> Vec<Category>;
}

/// Post-match check applied to a raw regex hit before consolidation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// Card number checksum
    Luhn,

    /// Reject SSN area/group/serial values that are never issued
    Ssn,
}

/// One entry of the pattern table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Category assigned to matches of this pattern
    pub category: Category,

    /// Regex pattern
    pub pattern: String,

    /// Optional validation of each match
    #[serde(default)]
    pub validator: Option<Validator>,
}

impl PatternSpec {
    pub fn new(category: Category, pattern: impl Into<String>) -> Self {
        Self {
            category,
            pattern: pattern.into(),
            validator: None,
        }
    }

    pub fn validated(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// Configuration for a span detector.
///
/// Pattern order is registration order: when two matches cover exactly the
/// same range, the earlier-registered category is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub patterns: Vec<PatternSpec>,
}

impl DetectorConfig {
    /// Restrict the table to the given categories, keeping order
    pub fn only(mut self, categories: &[Category]) -> Self {
        self.patterns.retain(|p| categories.contains(&p.category));
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                PatternSpec::new(
                    Category::Email,
                    r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
                ),
                // (555) 123-4567, 555-123-4567, 555.123.4567, +1 555 123 4567
                PatternSpec::new(
                    Category::Phone,
                    r"(?:\+\d{1,2}\s?)?(?:\(\d{3}\)|\b\d{3})[\s.-]?\d{3}[\s.-]?\d{4}\b",
                ),
                PatternSpec::new(Category::Ssn, r"\b\d{3}-\d{2}-\d{4}\b").validated(Validator::Ssn),
                // Visa, MC, Amex, Discover prefixes
                PatternSpec::new(
                    Category::CreditCard,
                    r"\b(?:4\d{3}|5[1-5]\d{2}|3[47]\d{2}|6(?:011|5\d{2}))[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{3,4}\b",
                )
                .validated(Validator::Luhn),
                PatternSpec::new(Category::Passport, r"\b[A-Z]{1,2}\d{7,8}\b"),
                PatternSpec::new(
                    Category::DriversLicense,
                    r"(?i:\bdriver'?s?\s+licen[cs]e|\bDL)(?:\s+(?i:no|number))?[.:#\s]*[A-Z]{0,2}\d[A-Z0-9-]{5,15}\b",
                ),
                PatternSpec::new(Category::Vin, r"\b[A-HJ-NPR-Z0-9]{17}\b"),
                PatternSpec::new(
                    Category::IpAddress,
                    r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b|\b(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\b",
                ),
                PatternSpec::new(
                    Category::MacAddress,
                    r"\b(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}\b",
                ),
                PatternSpec::new(
                    Category::PatientId,
                    r"\b(?i:mrn|patient\s+(?:no|number|#))[.:#\s-]*\d{5,10}\b",
                ),
                // PAN card, or Aadhaar number introduced by its name
                PatternSpec::new(
                    Category::IndianId,
                    r"\b[A-Z]{5}\d{4}[A-Z]\b|\b(?i:aadhaa?r)(?:\s+(?i:no|number))?[.:#\s-]*[2-9]\d{3}[\s-]?\d{4}[\s-]?\d{4}\b",
                ),
                // IFSC code, UPI handle, or introduced bank account number
                PatternSpec::new(
                    Category::IndianFinancial,
                    r"\b[A-Z]{4}0[A-Z0-9]{6}\b|\b[A-Za-z0-9._-]{2,}@(?:upi|ybl|okaxis|okhdfcbank|oksbi|okicici|paytm|apl|ibl|axl)\b|\b(?i:a/c|account\s+(?:no\.?|number))[:#\s]*\d{9,18}\b",
                ),
                PatternSpec::new(Category::Name, r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b"),
                PatternSpec::new(
                    Category::Address,
                    r"\b\d+\s+[A-Za-z\s]+,\s+[A-Za-z\s]+,\s+[A-Z]{2}\s+\d{5}\b",
                ),
                PatternSpec::new(Category::Id, r"\b\d{3}[-\s]?\d{2}[-\s]?\d{4}\b"),
                PatternSpec::new(Category::Financial, r"\b(?:\d{4}[-\s]?){3}\d{4}\b"),
                PatternSpec::new(
                    Category::Health,
                    r"\b(?i:patient|medical\s+record|diagnosis|treatment)\s+(?i:id)[:#]?\s*[A-Z0-9-]*\d[A-Z0-9-]*\b",
                ),
                // Dates of birth, MM/DD/YYYY
                PatternSpec::new(
                    Category::Other,
                    r"\b(?:0[1-9]|1[0-2])[/-](?:0[1-9]|[12]\d|3[01])[/-](?:19|20)\d{2}\b",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests;
