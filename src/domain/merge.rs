//! Combining detector output for one page.

use super::span::SensitiveSpan;

/// Default minimum span length, in characters.
pub const DEFAULT_MIN_SPAN_CHARS: usize = 8;

/// Concatenates pattern and entity spans and drops the short ones.
///
/// Short matches are mostly false positives once separated from their
/// pattern context (partial postal codes, stray digit groups), so a single
/// length floor applies to every category alike.
#[derive(Debug, Clone, Copy)]
pub struct SpanMerger {
    min_span_chars: usize,
}

impl SpanMerger {
    pub fn new(min_span_chars: usize) -> Self {
        Self { min_span_chars }
    }

    pub fn min_span_chars(&self) -> usize {
        self.min_span_chars
    }

    /// Pattern spans first, then entity spans, each in detector order.
    ///
    /// Spans shorter than the floor are discarded; a span exactly at the
    /// floor is kept. No deduplication is done.
    pub fn merge(
        &self,
        pattern_spans: Vec<SensitiveSpan>,
        entity_spans: Vec<SensitiveSpan>,
    ) -> Vec<SensitiveSpan> {
        pattern_spans
            .into_iter()
            .chain(entity_spans)
            .filter(|span| span.char_len() >= self.min_span_chars)
            .collect()
    }
}

impl Default for SpanMerger {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SPAN_CHARS)
    }
}
