//! Keyword-category content flagger

use crate::config::FlaggerConfig;
use aho_corasick::AhoCorasick;
use guardian_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

const KEYWORD_POINTS: u32 = 15;
const BASE_POINTS: u32 = 10;
const OCCURRENCE_BONUS: u32 = 10;
const PROXIMITY_BONUS: u32 = 10;
const DIRECTIVE_BONUS: u32 = 15;

/// A named concern with a 0-100 confidence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub category: String,
    pub confidence: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlaggingResult {
    /// Sorted by confidence, highest first
    pub flags: Vec<Flag>,

    /// True when at least one flag is outside the safe category
    pub has_flagged_content: bool,
}

struct CategoryMatcher {
    name: String,
    keywords: Vec<String>,
    matcher: AhoCorasick,
    adversarial: bool,
}

/// One keyword hit: index into the category's keywords and byte offset
#[derive(Debug, Clone, Copy)]
struct Occurrence {
    keyword: usize,
    start: usize,
}

/// Content flagger over a fixed set of keyword categories
pub struct ContentFlagger {
    config: FlaggerConfig,
    categories: Vec<CategoryMatcher>,
    directives: AhoCorasick,
    jailbreaks: AhoCorasick,
}

fn build_matcher(label: &str, keywords: &[String]) -> Result<AhoCorasick> {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(keywords)
        .map_err(|e| Error::KeywordTable(format!("{}: {}", label, e)))
}

/// Drop empty and repeated keywords, keeping first occurrence order
fn distinct_keywords(keywords: &[String]) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        if !keyword.is_empty() && !distinct.contains(&keyword) {
            distinct.push(keyword);
        }
    }
    distinct
}

impl ContentFlagger {
    pub fn new(config: FlaggerConfig) -> Result<Self> {
        let mut categories = Vec::with_capacity(config.categories.len());
        for category in &config.categories {
            let keywords = distinct_keywords(&category.keywords);
            categories.push(CategoryMatcher {
                matcher: build_matcher(&category.name, &keywords)?,
                name: category.name.clone(),
                keywords,
                adversarial: category.name == config.adversarial_category,
            });
        }

        let directives = build_matcher(
            "directive phrases",
            &distinct_keywords(&config.directive_phrases),
        )?;
        let jailbreak_phrases = distinct_keywords(&config.jailbreak_phrases);
        let jailbreaks = build_matcher("jailbreak phrases", &jailbreak_phrases)?;

        debug!(categories = categories.len(), "Built content flagger");

        Ok(Self {
            config: FlaggerConfig {
                jailbreak_phrases,
                ..config
            },
            categories,
            directives,
            jailbreaks,
        })
    }

    /// Flag `text` against every keyword category and the jailbreak list
    pub fn flag(&self, text: &str) -> FlaggingResult {
        let mut flags: Vec<Flag> = self
            .categories
            .iter()
            .filter_map(|category| self.flag_category(category, text))
            .collect();

        if let Some(flag) = self.jailbreak_flag(text, &flags) {
            flags.push(flag);
        }

        flags.sort_by(|a, b| b.confidence.cmp(&a.confidence));

        let has_flagged_content = flags
            .iter()
            .any(|flag| flag.category != self.config.safe_category);

        debug!(
            flags = flags.len(),
            has_flagged_content, "Flagged content"
        );

        FlaggingResult {
            flags,
            has_flagged_content,
        }
    }

    fn flag_category(&self, category: &CategoryMatcher, text: &str) -> Option<Flag> {
        let mut occurrences: Vec<Occurrence> = category
            .matcher
            .find_overlapping_iter(text)
            .map(|m| Occurrence {
                keyword: m.pattern().as_usize(),
                start: m.start(),
            })
            .collect();
        if occurrences.is_empty() {
            return None;
        }
        occurrences.sort_by_key(|o| (o.start, o.keyword));

        let mut found = vec![false; category.keywords.len()];
        for occurrence in &occurrences {
            found[occurrence.keyword] = true;
        }
        let matched: Vec<&str> = category
            .keywords
            .iter()
            .zip(&found)
            .filter(|(_, found)| **found)
            .map(|(keyword, _)| keyword.as_str())
            .collect();

        let distinct = u32::try_from(matched.len()).unwrap_or(u32::MAX);
        let mut confidence = distinct
            .saturating_mul(KEYWORD_POINTS)
            .saturating_add(BASE_POINTS)
            .min(100);

        if occurrences.len() > matched.len() {
            confidence += OCCURRENCE_BONUS;
        }
        if has_nearby_pair(text, &occurrences, self.config.proximity_window) {
            confidence += PROXIMITY_BONUS;
        }
        if category.adversarial && self.directives.is_match(text) {
            confidence += DIRECTIVE_BONUS;
        }
        let confidence = confidence.min(100);

        trace!(
            category = %category.name,
            keywords = matched.len(),
            occurrences = occurrences.len(),
            confidence,
            "Keyword category matched"
        );

        Some(Flag {
            category: category.name.clone(),
            confidence,
            description: format!(
                "Contains potentially {} keywords: {}",
                category.name.to_lowercase(),
                matched.join(", ")
            ),
        })
    }

    /// Adversarial flag for jailbreak phrasing, unless one is already raised.
    ///
    /// A keyword flag in the adversarial category always wins, even when its
    /// confidence is below `jailbreak_confidence`. The default table holds
    /// "ignore previous instructions" along with its sub-phrases, so that
    /// phrase alone scores 3 keywords plus proximity (65), not 85.
    fn jailbreak_flag(&self, text: &str, flags: &[Flag]) -> Option<Flag> {
        if flags
            .iter()
            .any(|flag| flag.category == self.config.adversarial_category)
        {
            return None;
        }

        let mut found = vec![false; self.config.jailbreak_phrases.len()];
        for m in self.jailbreaks.find_overlapping_iter(text) {
            found[m.pattern().as_usize()] = true;
        }
        let phrases: Vec<&str> = self
            .config
            .jailbreak_phrases
            .iter()
            .zip(found)
            .filter(|(_, found)| *found)
            .map(|(phrase, _)| phrase.as_str())
            .collect();
        if phrases.is_empty() {
            return None;
        }

        Some(Flag {
            category: self.config.adversarial_category.clone(),
            confidence: self.config.jailbreak_confidence.min(100),
            description: format!("Contains jailbreak phrases: {}", phrases.join(", ")),
        })
    }
}

/// Whether two occurrences of different keywords start within `window`
/// characters of each other. `occurrences` must be sorted by start.
fn has_nearby_pair(text: &str, occurrences: &[Occurrence], window: usize) -> bool {
    let positions = char_positions(text, occurrences.iter().map(|o| o.start));

    for i in 0..occurrences.len() {
        for j in (i + 1)..occurrences.len() {
            if positions[j] - positions[i] > window {
                break;
            }
            if occurrences[j].keyword != occurrences[i].keyword {
                return true;
            }
        }
    }
    false
}

/// Convert ascending byte offsets into character offsets
fn char_positions(text: &str, byte_offsets: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut chars = 0;
    let mut byte = 0;
    for offset in byte_offsets {
        chars += text.get(byte..offset).map_or(0, |gap| gap.chars().count());
        byte = offset;
        positions.push(chars);
    }
    positions
}

#[cfg(test)]
mod tests;
