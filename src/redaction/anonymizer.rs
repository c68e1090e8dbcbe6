//! Whole-document anonymization.

use super::backend::{DocumentHandle, PageHandle, PdfBackend, SaveOptions};
use super::page::PageRedactor;
use crate::config::AnonymizerConfig;
use crate::domain::{
    detect_page_spans, EntityDetector, EntityRecognizer, PatternDetector, SensitiveSpan,
    SpanMerger,
};
use crate::error::AnonymizerResult;

/// Statistics about an anonymization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionStats {
    /// Pages visited
    pub pages_processed: usize,

    /// Pages whose extracted text is empty
    pub pages_skipped: usize,

    /// Pages with at least one mark applied
    pub pages_modified: usize,

    /// Spans surviving the merge, over all pages
    pub spans_detected: usize,

    /// Spans that produced no mark
    pub spans_unlocated: usize,

    /// Redaction marks applied, over all pages
    pub marks_applied: usize,
}

impl RedactionStats {
    /// Returns true if any redactions were applied.
    pub fn has_redactions(&self) -> bool {
        self.marks_applied > 0
    }
}

/// Successful result of [`DocumentAnonymizer::anonymize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnonymizeOutcome {
    /// At least one mark was applied; `bytes` is the redacted document.
    Redacted { bytes: Vec<u8>, stats: RedactionStats },

    /// Nothing sensitive was found. No document was written; the caller
    /// decides whether to pass the original bytes through.
    NothingFound { stats: RedactionStats },
}

impl AnonymizeOutcome {
    pub fn stats(&self) -> &RedactionStats {
        match self {
            Self::Redacted { stats, .. } | Self::NothingFound { stats } => stats,
        }
    }

    pub fn is_redacted(&self) -> bool {
        matches!(self, Self::Redacted { .. })
    }

    /// The redacted document, if one was produced.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Redacted { bytes, .. } => Some(bytes),
            Self::NothingFound { .. } => None,
        }
    }
}

/// Detected spans for one page, without redacting anything.
#[derive(Debug, Clone)]
pub struct PageScan {
    /// 1-based page number
    pub page_number: usize,
    pub text: String,
    pub spans: Vec<SensitiveSpan>,
}

/// Runs detection and redaction over every page of a document, in order.
///
/// The entity recognizer is injected once and reused for every document;
/// without one, only pattern detection runs.
pub struct DocumentAnonymizer<B: PdfBackend> {
    backend: B,
    config: AnonymizerConfig,
    recognizer: Option<Box<dyn EntityRecognizer>>,
    patterns: PatternDetector,
}

impl<B: PdfBackend> DocumentAnonymizer<B> {
    /// Creates an anonymizer with default settings and no recognizer.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: AnonymizerConfig::default(),
            recognizer: None,
            patterns: PatternDetector::new(),
        }
    }

    pub fn with_config(mut self, config: AnonymizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn config(&self) -> &AnonymizerConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn entity_detector(&self) -> EntityDetector<'_> {
        EntityDetector::new(self.recognizer.as_deref())
    }

    fn merger(&self) -> SpanMerger {
        SpanMerger::new(self.config.min_span_chars)
    }

    /// Anonymizes a PDF held in memory.
    ///
    /// Fails only when the document cannot be opened, a page cannot be
    /// loaded or committed, or the result cannot be serialized. The
    /// document is released on every path. Only pages with no extracted
    /// text at all are skipped; whitespace-only pages still go through
    /// detection.
    pub fn anonymize(&self, bytes: &[u8]) -> AnonymizerResult<AnonymizeOutcome> {
        self.config.validate()?;

        let document = self.backend.open(bytes)?;
        let page_count = document.page_count()?;
        let redactor = PageRedactor::from_config(&self.config);
        let entities = self.entity_detector();
        let merger = self.merger();

        let mut stats = RedactionStats::default();

        for index in 0..page_count {
            let page_number = index + 1;
            let mut page = document.load_page(index)?;
            stats.pages_processed += 1;

            let text = page.extract_text()?;
            if text.is_empty() {
                log::debug!("Page {}: no extractable text, skipping", page_number);
                stats.pages_skipped += 1;
                continue;
            }

            let spans = detect_page_spans(&text, &self.patterns, &entities, &merger);
            log::debug!(
                "Page {}: {} chars of text, {} span(s) to redact",
                page_number,
                text.chars().count(),
                spans.len()
            );

            let result = redactor.redact(&mut page, page_number, &spans, &text)?;

            stats.spans_detected += spans.len();
            stats.spans_unlocated += result.spans_unlocated;
            stats.marks_applied += result.marks_applied;
            if result.marks_applied > 0 {
                stats.pages_modified += 1;
            }
        }

        log::info!(
            "{}: {} page(s), {} span(s), {} mark(s) applied",
            self.backend.name(),
            stats.pages_processed,
            stats.spans_detected,
            stats.marks_applied
        );

        if !stats.has_redactions() {
            return Ok(AnonymizeOutcome::NothingFound { stats });
        }

        let options = SaveOptions {
            compress: self.config.compress,
            garbage_level: self.config.garbage_level,
        };
        let bytes = document.serialize(&options)?;
        Ok(AnonymizeOutcome::Redacted { bytes, stats })
    }

    /// Detects spans on every page without modifying the document.
    pub fn scan(&self, bytes: &[u8]) -> AnonymizerResult<Vec<PageScan>> {
        let document = self.backend.open(bytes)?;
        let entities = self.entity_detector();
        let merger = self.merger();

        let mut pages = Vec::new();
        for index in 0..document.page_count()? {
            let text = document.load_page(index)?.extract_text()?;
            let spans = detect_page_spans(&text, &self.patterns, &entities, &merger);
            pages.push(PageScan {
                page_number: index + 1,
                text,
                spans,
            });
        }
        Ok(pages)
    }

    /// Returns the reading-order text of every page.
    pub fn extract_pages(&self, bytes: &[u8]) -> AnonymizerResult<Vec<String>> {
        let document = self.backend.open(bytes)?;
        (0..document.page_count()?)
            .map(|index| document.load_page(index)?.extract_text())
            .collect()
    }
}
