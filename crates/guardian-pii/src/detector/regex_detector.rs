//! Regex-based span detector implementation

use crate::detector::{
    DetectionResult, DetectorConfig, RawMatch, SpanDetector, Validator, consolidate,
};
use guardian_core::{Category, Error, Result};
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, trace};

struct CompiledPattern {
    category: Category,
    regex: Arc<Regex>,
    validator: Option<Validator>,
}

/// Regex-based span detector
///
/// Compiles the whole pattern table up front; a malformed pattern fails
/// construction rather than individual calls.
pub struct RegexSpanDetector {
    patterns: Vec<CompiledPattern>,
}

impl RegexSpanDetector {
    /// Create a new regex-based detector with the given configuration
    pub fn new(config: DetectorConfig) -> Result<Self> {
        let mut patterns = Vec::with_capacity(config.patterns.len());
        for spec in config.patterns {
            let regex = Regex::new(&spec.pattern).map_err(|source| Error::InvalidPattern {
                category: spec.category,
                source,
            })?;
            patterns.push(CompiledPattern {
                category: spec.category,
                regex: Arc::new(regex),
                validator: spec.validator,
            });
        }

        debug!(patterns = patterns.len(), "Compiled span detector patterns");

        Ok(Self { patterns })
    }

    /// Collect every accepted hit of every pattern, in registration order
    fn scan(&self, text: &str) -> Vec<RawMatch> {
        let mut matches = Vec::new();

        for pattern in &self.patterns {
            for found in pattern.regex.find_iter(text) {
                if found.start() == found.end() {
                    continue;
                }
                if let Some(validator) = pattern.validator
                    && !validate(validator, found.as_str())
                {
                    trace!(
                        category = %pattern.category,
                        start = found.start(),
                        "Match rejected by validator"
                    );
                    continue;
                }
                matches.push(RawMatch {
                    category: pattern.category,
                    start: found.start(),
                    end: found.end(),
                });
            }
        }

        matches
    }
}

fn validate(validator: Validator, candidate: &str) -> bool {
    match validator {
        Validator::Luhn => validate_luhn(candidate),
        Validator::Ssn => validate_ssn(candidate),
    }
}

/// Validate a potential card number using the Luhn algorithm
fn validate_luhn(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }

    let checksum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    checksum.is_multiple_of(10)
}

/// Validate a potential SSN
fn validate_ssn(ssn: &str) -> bool {
    let digits: String = ssn.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 9 {
        return false;
    }

    // All zeros in any group
    if digits.starts_with("000") || digits[3..5] == *"00" || digits[5..9] == *"0000" {
        return false;
    }

    // 666 and the 9xx range (ITIN) are never issued
    !(digits.starts_with("666") || digits.starts_with('9'))
}

impl SpanDetector for RegexSpanDetector {
    fn detect(&self, text: &str) -> DetectionResult {
        if text.is_empty() {
            return DetectionResult::default();
        }

        let raw = self.scan(text);
        let raw_count = raw.len();
        let result = DetectionResult::from_spans(consolidate(text, raw));

        debug!(
            raw_matches = raw_count,
            spans = result.spans.len(),
            "Consolidated sensitive spans"
        );

        result
    }

    fn supported_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for pattern in &self.patterns {
            if !categories.contains(&pattern.category) {
                categories.push(pattern.category);
            }
        }
        categories
    }
}
