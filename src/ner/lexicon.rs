//! Offline, rule-based location tagging.

use crate::domain::{EntityLabel, EntityRecognizer, RecognizedEntity};
use crate::error::AnonymizerResult;
use once_cell::sync::Lazy;
use regex::Regex;

/// Tags Brazilian street addresses without a statistical model.
///
/// Recognizes a street-type word (`Rua`, `Av.`, `Alameda`, ...), up to six
/// name words, an optional `nº` marker and a house number:
///
/// - Rua das Flores, 123
/// - Av. Paulista, 1578
/// - Travessa do Comércio nº 45
///
/// Every hit is labelled as a location, so it still goes through the
/// address heuristics like any model output.
#[derive(Debug, Clone, Default)]
pub struct StreetLexiconRecognizer;

impl StreetLexiconRecognizer {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"(?i)\b(?:rua|avenida|av\.|alameda|travessa|praça|rodovia|estrada|largo)\s+(?:[\p{L}'.-]+\s+){0,5}?[\p{L}'.-]+,?\s*(?:n[º°o]\.?\s*)?\d{1,5}\b",
            )
            .expect("Valid street address regex")
        });
        &PATTERN
    }
}

impl EntityRecognizer for StreetLexiconRecognizer {
    fn recognize(&self, text: &str) -> AnonymizerResult<Vec<RecognizedEntity>> {
        Ok(Self::regex()
            .find_iter(text)
            .map(|m| RecognizedEntity::new(m.start(), m.end(), EntityLabel::Location))
            .collect())
    }

    fn name(&self) -> &str {
        "street-lexicon"
    }
}
