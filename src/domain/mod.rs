//! Domain models and business logic for sensitive data detection.
//!
//! This module contains the detectors that find personal data in a page's
//! extracted text, and the merger that decides which spans go on to be
//! redacted.

pub mod address;
pub mod entity;
pub mod merge;
pub mod patterns;
pub mod span;

pub use address::AddressValidator;
pub use entity::{EntityDetector, EntityLabel, EntityRecognizer, RecognizedEntity};
pub use merge::{SpanMerger, DEFAULT_MIN_SPAN_CHARS};
pub use patterns::PatternDetector;
pub use span::{SensitiveSpan, SpanCategory};

/// Trait for span detection strategies.
pub trait SpanDetector {
    /// Finds sensitive spans in one page's text.
    ///
    /// Every returned span satisfies `0 <= start < end <= text.len()`.
    fn detect(&self, text: &str) -> Vec<SensitiveSpan>;

    /// Returns a short name used in logs.
    fn name(&self) -> &str;
}

/// Runs both detectors over `text` and merges their spans.
pub fn detect_page_spans(
    text: &str,
    patterns: &PatternDetector,
    entities: &EntityDetector<'_>,
    merger: &SpanMerger,
) -> Vec<SensitiveSpan> {
    let pattern_spans = patterns.detect(text);
    let entity_spans = entities.detect(text);
    log::trace!(
        "{}: {} span(s), {}: {} span(s)",
        patterns.name(),
        pattern_spans.len(),
        entities.name(),
        entity_spans.len()
    );
    merger.merge(pattern_spans, entity_spans)
}
