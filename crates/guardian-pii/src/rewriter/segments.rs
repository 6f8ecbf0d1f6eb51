use crate::detector::Span;
use crate::rewriter::RenderSegment;

/// Split `text` into plain and marked segments.
///
/// `spans` must be sorted, non-overlapping and lie on character boundaries of
/// `text`. Concatenating the original text of every segment (plain text, or
/// `original_text` for marked ones) gives back `text` exactly. Marked segments
/// display the span's replacement when it has one, otherwise its own text.
pub fn render_segments(text: &str, spans: &[Span]) -> Vec<RenderSegment> {
    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in spans {
        if span.start > cursor {
            segments.push(RenderSegment::Plain {
                text: text[cursor..span.start].to_string(),
            });
        }
        segments.push(RenderSegment::Marked {
            category: span.category,
            display_text: span.rewritten.clone().unwrap_or_else(|| span.text.clone()),
            original_text: Some(span.text.clone()),
        });
        cursor = span.end;
    }

    if cursor < text.len() {
        segments.push(RenderSegment::Plain {
            text: text[cursor..].to_string(),
        });
    }

    segments
}
