//! Merging of overlapping pattern hits into a non-overlapping span set

use crate::detector::Span;
use guardian_core::Category;

/// A pattern hit before consolidation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawMatch {
    pub category: Category,
    pub start: usize,
    pub end: usize,
}

/// Consolidate raw hits into spans sorted by start with no overlaps.
///
/// Hits are ordered by start, then by end (shorter first); the sort is stable
/// so identical ranges keep registration order. Each hit is compared only with
/// the most recently appended span: a hit starting before that span's end is
/// folded into it, extending the end if needed, and the span keeps its
/// category. Chains of overlapping hits therefore collapse into a single span
/// labelled with the category of the first hit.
pub(crate) fn consolidate(text: &str, mut matches: Vec<RawMatch>) -> Vec<Span> {
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut spans: Vec<Span> = Vec::with_capacity(matches.len());
    let mut last_end = 0;

    for m in matches {
        if m.start < last_end {
            if let Some(previous) = spans.last_mut() {
                if m.end > previous.end {
                    previous.end = m.end;
                    previous.text = text[previous.start..previous.end].to_string();
                }
                last_end = previous.end;
            }
        } else if let Some(span) = Span::from_input(text, m.start, m.end, m.category) {
            last_end = span.end;
            spans.push(span);
        }
    }

    spans
}
