//! The configured detection and transformation engine

use crate::config::EngineConfig;
use guardian_core::{Category, CategoryCounts, Result};
use guardian_flagger::{ContentFlagger, FlaggingResult};
use guardian_pii::{
    DetectionResult, RegexSpanDetector, RewriteMode, RewriteOutput, Span, SpanDetector,
    SpanRewriter, StandardRewriter,
};
use guardian_risk::{RiskScore, RiskScorer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// Everything the engine reports about one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub spans: Vec<Span>,
    pub counts: CategoryCounts,
    pub risk: RiskScore,
    pub flags: FlaggingResult,
    pub rewrite: RewriteOutput,
}

/// Stateless engine over immutable, validated configuration.
///
/// Every method is a pure function of its inputs (plus randomness in
/// anonymize mode), so one engine can be shared across threads.
pub struct Engine {
    detector: Box<dyn SpanDetector>,
    scorer: RiskScorer,
    flagger: ContentFlagger,
    rewriter: Box<dyn SpanRewriter>,
}

impl Engine {
    /// Validate `config` and build every component.
    ///
    /// Malformed patterns or keyword tables fail here, never per call.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let detector = RegexSpanDetector::new(config.detector)?;
        let scorer = RiskScorer::new(config.risk)?;
        let flagger = ContentFlagger::new(config.flagger)?;
        let rewriter = StandardRewriter::new(config.rewriter)?;

        info!(
            categories = detector.supported_categories().len(),
            "Guardian engine ready"
        );

        Ok(Self::from_parts(
            Box::new(detector),
            scorer,
            flagger,
            Box::new(rewriter),
        ))
    }

    /// Assemble an engine from already-built components
    pub fn from_parts(
        detector: Box<dyn SpanDetector>,
        scorer: RiskScorer,
        flagger: ContentFlagger,
        rewriter: Box<dyn SpanRewriter>,
    ) -> Self {
        Self {
            detector,
            scorer,
            flagger,
            rewriter,
        }
    }

    pub fn detect_sensitive_spans(&self, text: &str) -> DetectionResult {
        self.detector.detect(text)
    }

    pub fn score_risk(&self, text: &str, counts: &CategoryCounts) -> RiskScore {
        self.scorer.score(text, counts)
    }

    pub fn flag_content(&self, text: &str) -> FlaggingResult {
        self.flagger.flag(text)
    }

    pub fn rewrite_text(
        &self,
        text: &str,
        spans: &[Span],
        categories: &HashSet<Category>,
        mode: RewriteMode,
    ) -> RewriteOutput {
        self.rewriter.rewrite(text, spans, categories, mode)
    }

    /// Run detection, scoring, flagging and rewriting over one text
    pub fn analyze(
        &self,
        text: &str,
        categories: &HashSet<Category>,
        mode: RewriteMode,
    ) -> Analysis {
        let DetectionResult { spans, counts } = self.detect_sensitive_spans(text);
        let risk = self.score_risk(text, &counts);
        let flags = self.flag_content(text);
        let rewrite = self.rewrite_text(text, &spans, categories, mode);

        debug!(
            spans = spans.len(),
            score = risk.score,
            flags = flags.flags.len(),
            mode = %mode,
            "Analyzed text"
        );

        Analysis {
            spans,
            counts,
            risk,
            flags,
            rewrite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_flagger::FlaggerConfig;
    use guardian_pii::{DetectorConfig, PatternSpec, RewriterConfig};
    use guardian_risk::{RiskConfig, RiskLevel};

    fn engine() -> Engine {
        Engine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let mut config = EngineConfig::default();
        config.detector.patterns.clear();

        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let mut config = EngineConfig::default();
        config
            .detector
            .patterns
            .push(PatternSpec::new(Category::Other, "(unclosed"));

        assert!(matches!(
            Engine::new(config),
            Err(guardian_core::Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_from_parts_with_custom_detector() {
        let detector = RegexSpanDetector::new(DetectorConfig {
            patterns: vec![PatternSpec::new(Category::Other, r"TICKET-\d+")],
        })
        .unwrap();
        let engine = Engine::from_parts(
            Box::new(detector),
            RiskScorer::new(RiskConfig::default()).unwrap(),
            ContentFlagger::new(FlaggerConfig::default()).unwrap(),
            Box::new(StandardRewriter::new(RewriterConfig::default()).unwrap()),
        );

        let selected: HashSet<Category> = [Category::Other].into_iter().collect();
        let analysis = engine.analyze("see TICKET-42", &selected, RewriteMode::Redact);

        assert_eq!(analysis.spans.len(), 1);
        assert_eq!(analysis.rewrite.text, "see [REDACTED]");
    }

    #[test]
    fn test_analyze_empty_text() {
        let selected: HashSet<Category> = Category::ALL.into_iter().collect();
        let analysis = engine().analyze("", &selected, RewriteMode::Anonymize);

        assert!(analysis.spans.is_empty());
        assert_eq!(analysis.counts.total(), 0);
        assert_eq!(analysis.risk.score, 0);
        assert_eq!(analysis.risk.level, RiskLevel::Low);
        assert!(!analysis.flags.has_flagged_content);
        assert_eq!(analysis.rewrite.text, "");
    }

    #[test]
    fn test_analyze_counts_match_spans() {
        let selected: HashSet<Category> = Category::ALL.into_iter().collect();
        let analysis = engine().analyze(
            "Mail jane@example.org, SSN 123-45-6789, confidential.",
            &selected,
            RewriteMode::Redact,
        );

        assert_eq!(analysis.counts.total(), analysis.spans.len());
        assert_eq!(analysis.counts.get(Category::Email), 1);
        assert_eq!(analysis.counts.get(Category::Ssn), 1);
        assert!(analysis.rewrite.text.contains("[EMAIL REDACTED]"));
        assert!(analysis.rewrite.text.contains("[SSN REDACTED]"));
        assert!(analysis.flags.has_flagged_content);
        assert!(analysis.risk.score > 0);
    }
}
