//! Guardian PII Detection and Rewriting
//!
//! This crate provides the span-level half of the Guardian engine:
//! - Pattern-based detection of 18 sensitive data categories
//! - Consolidation of overlapping hits into a non-overlapping span set
//! - Rewriting selected spans by redaction, display encryption or
//!   synthetic anonymization, plus render segments for highlighting UIs

pub mod detector;
pub mod rewriter;

pub use detector::{
    DetectionResult, DetectorConfig, PatternSpec, RegexSpanDetector, Span, SpanDetector, Validator,
};
pub use rewriter::{
    Anonymizer, DisplayCipher, EncryptionConfig, RenderSegment, RewriteMode, RewriteOutput,
    RewriterConfig, SpanRewriter, StandardRewriter, SyntheticCorpus,
};
