//! Sensitive span model shared by every detector.

use std::fmt;
use std::ops::Range;

/// Kind of personal data a span was detected as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpanCategory {
    /// CPF in `XXX.XXX.XXX-XX` form
    TaxIdFormatted,
    /// CPF as a bare run of 11 digits
    TaxIdDigits,
    /// CNPJ in `XX.XXX.XXX/XXXX-XX` form
    OrgIdFormatted,
    /// CNPJ as a bare run of 14 digits
    OrgIdDigits,
    Email,
    Phone,
    /// CEP, `XXXXX-XXX`
    PostalCode,
    /// Street address confirmed by the address heuristics
    Address,
}

impl SpanCategory {
    /// Stable upper-case name used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaxIdFormatted => "TAX_ID_FORMATTED",
            Self::TaxIdDigits => "TAX_ID_DIGITS",
            Self::OrgIdFormatted => "ORG_ID_FORMATTED",
            Self::OrgIdDigits => "ORG_ID_DIGITS",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::PostalCode => "POSTAL_CODE",
            Self::Address => "ADDRESS",
        }
    }
}

impl fmt::Display for SpanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-open range `[start, end)` of one page's text, tagged with a category.
///
/// Offsets are UTF-8 byte offsets and always lie on `char` boundaries, so
/// slicing the page text with [`SensitiveSpan::range`] never panics. Spans
/// are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveSpan {
    start: usize,
    end: usize,
    char_len: usize,
    category: SpanCategory,
}

impl SensitiveSpan {
    /// Builds a span over `text[start..end]`.
    ///
    /// Returns `None` unless `start < end <= text.len()` and both offsets
    /// fall on character boundaries.
    pub fn new(text: &str, start: usize, end: usize, category: SpanCategory) -> Option<Self> {
        if start >= end || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return None;
        }
        let char_len = text.get(start..end)?.chars().count();
        Some(Self {
            start,
            end,
            char_len,
            category,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn category(&self) -> SpanCategory {
        self.category
    }

    /// Byte range into the page text.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length in characters (Unicode scalar values), not bytes.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// The literal text covered by this span.
    ///
    /// `text` must be the page text the span was detected in.
    pub fn text<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.range())
    }
}
