//! Standard span rewriter implementation

use crate::detector::Span;
use crate::rewriter::{
    Anonymizer, DisplayCipher, RewriteMode, RewriteOutput, RewriterConfig, SpanRewriter,
    render_segments,
};
use guardian_core::{Category, Error, Result};
use rand::RngCore;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Standard implementation of span rewriting
pub struct StandardRewriter {
    config: RewriterConfig,
    anonymizer: Anonymizer,
    cipher: DisplayCipher,
}

impl StandardRewriter {
    /// Create a new standard rewriter with the given configuration
    pub fn new(config: RewriterConfig) -> Result<Self> {
        let anonymizer = Anonymizer::new(config.corpus.clone(), config.placeholder(Category::Other))
            .map_err(|e| Error::Config(format!("Anonymizer patterns failed to compile: {}", e)))?;
        let cipher = DisplayCipher::new(&config.encryption)?;

        Ok(Self {
            config,
            anonymizer,
            cipher,
        })
    }

    /// Rewrite using an explicit random source for anonymization
    pub fn rewrite_with_rng(
        &self,
        text: &str,
        spans: &[Span],
        categories: &HashSet<Category>,
        mode: RewriteMode,
        rng: &mut dyn RngCore,
    ) -> RewriteOutput {
        let mut accepted = accept_spans(text, spans);

        let mut processed = 0;
        for span in &mut accepted {
            if categories.contains(&span.category) {
                span.rewritten = Some(self.replacement(span, mode, rng));
                processed += 1;
            }
        }

        // Apply back to front so earlier offsets stay valid
        let mut rewritten = text.to_string();
        for span in accepted.iter().rev() {
            if let Some(replacement) = &span.rewritten {
                rewritten.replace_range(span.range(), replacement);
            }
        }

        debug!(
            mode = %mode,
            spans = accepted.len(),
            processed,
            "Rewrote sensitive spans"
        );

        let segments = render_segments(text, &accepted);
        RewriteOutput {
            text: rewritten,
            spans: accepted,
            segments,
        }
    }

    /// Compute the replacement for a single selected span
    fn replacement(&self, span: &Span, mode: RewriteMode, rng: &mut dyn RngCore) -> String {
        match mode {
            RewriteMode::Redact => self.config.placeholder(span.category).to_string(),

            RewriteMode::Encrypt => match self.cipher.obfuscate(&span.text) {
                Ok(display) => display,
                Err(e) => {
                    warn!(
                        category = %span.category,
                        error = %e,
                        "Display encryption failed, redacting span instead"
                    );
                    self.config.placeholder(span.category).to_string()
                }
            },

            RewriteMode::Anonymize => self.anonymizer.anonymize(span.category, &span.text, rng),
        }
    }
}

/// Sort caller spans and drop any that are out of range or overlap an
/// earlier one. Span text is re-read from `text`.
fn accept_spans(text: &str, spans: &[Span]) -> Vec<Span> {
    let mut sorted: Vec<&Span> = spans.iter().collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut accepted: Vec<Span> = Vec::with_capacity(sorted.len());
    let mut last_end = 0;

    for span in sorted {
        if span.start < last_end {
            warn!(
                start = span.start,
                end = span.end,
                "Skipping span that overlaps a previous span"
            );
            continue;
        }
        match Span::from_input(text, span.start, span.end, span.category) {
            Some(valid) => {
                last_end = valid.end;
                accepted.push(valid);
            }
            None => {
                warn!(
                    start = span.start,
                    end = span.end,
                    len = text.len(),
                    "Skipping span outside the text or off a character boundary"
                );
            }
        }
    }

    accepted
}

impl SpanRewriter for StandardRewriter {
    fn rewrite(
        &self,
        text: &str,
        spans: &[Span],
        categories: &HashSet<Category>,
        mode: RewriteMode,
    ) -> RewriteOutput {
        let mut rng = rand::rng();
        self.rewrite_with_rng(text, spans, categories, mode, &mut rng)
    }
}
