//! Category-weighted risk scoring

use crate::config::RiskConfig;
use aho_corasick::AhoCorasick;
use guardian_core::{CategoryCounts, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Coarse risk bucket derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Bucket a 0-100 score: below 25 is low, below 50 medium, below 75 high
    pub fn from_score(score: u32) -> Self {
        match score {
            0..25 => RiskLevel::Low,
            25..50 => RiskLevel::Medium,
            50..75 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One itemized contributor to the score.
///
/// `points` is reported before any cap is applied to the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub points: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Aggregate score, 0 to 100
    pub score: u32,
    pub level: RiskLevel,

    /// Density factor, then one per present category, then one per present
    /// context topic
    pub factors: Vec<RiskFactor>,
}

/// Scores texts against a fixed weight and topic table
pub struct RiskScorer {
    config: RiskConfig,
    topic_matcher: AhoCorasick,
    /// Topic index for each automaton pattern
    pattern_topics: Vec<usize>,
}

impl RiskScorer {
    pub fn new(config: RiskConfig) -> Result<Self> {
        let mut keywords = Vec::new();
        let mut pattern_topics = Vec::new();
        for (index, topic) in config.context_topics.iter().enumerate() {
            for keyword in topic.keywords.iter().filter(|k| !k.is_empty()) {
                keywords.push(keyword.as_str());
                pattern_topics.push(index);
            }
        }

        let topic_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)
            .map_err(|e| Error::KeywordTable(format!("Context topics: {}", e)))?;

        Ok(Self {
            config,
            topic_matcher,
            pattern_topics,
        })
    }

    /// Score `text` given the category counts of its detected spans
    pub fn score(&self, text: &str, counts: &CategoryCounts) -> RiskScore {
        let mut factors = Vec::new();

        // Density: spans per thousand characters
        let total_spans = counts.total();
        let length = text.chars().count();
        let density = total_spans as f64 / length.max(1) as f64 * 1000.0;
        let density_points = ((density * 25.0).round() as u32).min(self.config.density_cap);
        factors.push(RiskFactor {
            name: "PII Density".to_string(),
            points: density_points,
            description: format!(
                "Text contains {} sensitive spans in {} characters.",
                total_spans, length
            ),
        });

        let mut sensitivity: u32 = 0;
        for (category, count) in counts.present() {
            let count = u32::try_from(count).unwrap_or(u32::MAX);
            let points = self.config.weight(category).saturating_mul(count);
            sensitivity = sensitivity.saturating_add(points);
            factors.push(RiskFactor {
                name: format!("Contains {}", category),
                points,
                description: format!("Found {} instances of {} data.", count, category),
            });
        }

        let mut context: u32 = 0;
        for topic in self.present_topics(text) {
            context = context.saturating_add(self.config.context_points);
            factors.push(RiskFactor {
                name: format!("{} Context", capitalize(topic)),
                points: self.config.context_points,
                description: format!("Text contains {} context which increases risk.", topic),
            });
        }

        let score = density_points
            .saturating_add(sensitivity.min(self.config.sensitivity_cap))
            .saturating_add(context.min(self.config.context_cap))
            .min(100);
        let level = RiskLevel::from_score(score);

        debug!(
            score,
            level = %level,
            factors = factors.len(),
            "Scored text risk"
        );

        RiskScore {
            score,
            level,
            factors,
        }
    }

    /// Names of the topics with at least one keyword in `text`, in table order
    fn present_topics(&self, text: &str) -> Vec<&str> {
        let mut present = vec![false; self.config.context_topics.len()];
        for found in self.topic_matcher.find_overlapping_iter(text) {
            present[self.pattern_topics[found.pattern().as_usize()]] = true;
        }

        self.config
            .context_topics
            .iter()
            .zip(present)
            .filter(|(_, present)| *present)
            .map(|(topic, _)| topic.name.as_str())
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests;
