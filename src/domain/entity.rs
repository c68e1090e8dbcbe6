//! Entity-based address detection.
//!
//! Named-entity recognition is an external capability behind the
//! [`EntityRecognizer`] trait. The detector keeps only location entities
//! and lets [`AddressValidator`] decide which of them are real addresses.

use super::address::AddressValidator;
use super::span::{SensitiveSpan, SpanCategory};
use super::SpanDetector;
use crate::error::AnonymizerResult;

/// Semantic class assigned by a recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityLabel {
    Location,
    Other(String),
}

impl EntityLabel {
    /// Maps a recognizer's raw label onto a semantic class.
    ///
    /// `LOC`, `LOCATION` and `GPE` are locations; everything else is kept
    /// verbatim as [`EntityLabel::Other`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "LOC" | "LOCATION" | "GPE" => Self::Location,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn is_location(&self) -> bool {
        matches!(self, Self::Location)
    }
}

/// One labelled span returned by a recognizer.
///
/// `start` and `end` are UTF-8 byte offsets into the text passed to
/// [`EntityRecognizer::recognize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedEntity {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

impl RecognizedEntity {
    pub fn new(start: usize, end: usize, label: EntityLabel) -> Self {
        Self { start, end, label }
    }
}

/// Named-entity recognition capability.
///
/// Implementations are constructed and owned by the caller and injected
/// into the pipeline. They must be safe to share across threads; the
/// pipeline never serialises calls itself.
pub trait EntityRecognizer: Send + Sync {
    /// Labels entities in `text`.
    ///
    /// Fails with [`AnonymizerError::ModelUnavailable`] when the underlying
    /// model cannot be reached.
    ///
    /// [`AnonymizerError::ModelUnavailable`]: crate::error::AnonymizerError::ModelUnavailable
    fn recognize(&self, text: &str) -> AnonymizerResult<Vec<RecognizedEntity>>;

    /// Returns a human-readable name for this recognizer.
    fn name(&self) -> &str;
}

/// Turns location entities into [`SpanCategory::Address`] spans.
///
/// A missing or failing recognizer yields no spans; pattern detection is
/// unaffected.
pub struct EntityDetector<'a> {
    recognizer: Option<&'a dyn EntityRecognizer>,
    validator: AddressValidator,
}

impl<'a> EntityDetector<'a> {
    pub fn new(recognizer: Option<&'a dyn EntityRecognizer>) -> Self {
        Self {
            recognizer,
            validator: AddressValidator::new(),
        }
    }

    fn to_span(&self, text: &str, entity: &RecognizedEntity) -> Option<SensitiveSpan> {
        if !entity.label.is_location() {
            return None;
        }
        let Some(span) = SensitiveSpan::new(text, entity.start, entity.end, SpanCategory::Address)
        else {
            log::warn!(
                "Dropping entity with invalid offsets {}..{} (text is {} bytes)",
                entity.start,
                entity.end,
                text.len()
            );
            return None;
        };
        let surface = span.text(text)?;
        self.validator.is_plausible_address(surface).then_some(span)
    }
}

impl SpanDetector for EntityDetector<'_> {
    fn detect(&self, text: &str) -> Vec<SensitiveSpan> {
        let Some(recognizer) = self.recognizer else {
            return Vec::new();
        };

        match recognizer.recognize(text) {
            Ok(entities) => entities
                .iter()
                .filter_map(|entity| self.to_span(text, entity))
                .collect(),
            Err(e) if !e.is_fatal() => {
                log::warn!("Address detection skipped: {}", e);
                Vec::new()
            }
            Err(e) => {
                log::error!(
                    "Recognizer '{}' failed, address detection skipped: {}",
                    recognizer.name(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn name(&self) -> &str {
        self.recognizer.map_or("entities(disabled)", |r| r.name())
    }
}
