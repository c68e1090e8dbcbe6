//! Fixed-format personal data detection.
//!
//! This module encapsulates the regular expressions for Brazilian tax
//! identifiers (CPF, CNPJ), e-mail addresses, phone numbers and postal
//! codes (CEP).

use super::span::{SensitiveSpan, SpanCategory};
use super::SpanDetector;
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex-based detector for fixed-format sensitive data.
///
/// Every pattern is applied independently over the whole text, in the order
/// returned by [`PatternDetector::patterns`], and every non-overlapping match
/// becomes its own span. Overlaps between patterns are kept as-is.
///
/// All patterns are case-insensitive and anchored on Unicode word
/// boundaries. The `regex` crate matches in linear time, so none of them can
/// backtrack catastrophically.
///
/// # Example
///
/// ```
/// use anonymizer::domain::{PatternDetector, SpanCategory, SpanDetector};
///
/// let detector = PatternDetector::new();
/// let spans = detector.detect("CPF 123.456.789-01");
/// assert_eq!(spans[0].category(), SpanCategory::TaxIdFormatted);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternDetector;

impl PatternDetector {
    /// Creates a new pattern detector.
    pub fn new() -> Self {
        Self
    }

    /// Returns the category/pattern pairs in application order.
    pub fn patterns() -> &'static [(SpanCategory, Regex)] {
        static PATTERNS: Lazy<Vec<(SpanCategory, Regex)>> = Lazy::new(|| {
            [
                (SpanCategory::TaxIdFormatted, r"\b\d{3}\.\d{3}\.\d{3}-\d{2}\b"),
                (SpanCategory::OrgIdFormatted, r"\b\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}\b"),
                // Digits are word characters, so `\b` already rejects a run
                // that touches another digit on either side.
                (SpanCategory::TaxIdDigits, r"\b\d{11}\b"),
                (SpanCategory::OrgIdDigits, r"\b\d{14}\b"),
                (
                    SpanCategory::Email,
                    r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b",
                ),
                (
                    SpanCategory::Phone,
                    r"\b(?:\(?\d{2}\)?\s?)?(?:9\d{4}|\d{4})[ -]?\d{4}\b",
                ),
                (SpanCategory::PostalCode, r"\b\d{5}[-\s]?\d{3}\b"),
            ]
            .into_iter()
            .map(|(category, pattern)| {
                let regex = Regex::new(&format!("(?i){pattern}")).expect("Valid regex pattern");
                (category, regex)
            })
            .collect()
        });
        &PATTERNS
    }
}

impl SpanDetector for PatternDetector {
    fn detect(&self, text: &str) -> Vec<SensitiveSpan> {
        Self::patterns()
            .iter()
            .flat_map(|(category, regex)| {
                regex
                    .find_iter(text)
                    .filter_map(move |m| SensitiveSpan::new(text, m.start(), m.end(), *category))
            })
            .collect()
    }

    fn name(&self) -> &str {
        "patterns"
    }
}
