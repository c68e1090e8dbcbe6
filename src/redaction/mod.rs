//! Span-to-geometry mapping, destructive redaction, and document handling.
//!
//! [`DocumentAnonymizer`] is the in-memory core: bytes in, redacted bytes
//! (or a "nothing found" signal) out. [`AnonymizationService`] wraps it
//! with file handling for the command-line tool.

pub mod anonymizer;
pub mod backend;
pub mod mupdf_backend;
pub mod page;

pub use anonymizer::{AnonymizeOutcome, DocumentAnonymizer, PageScan, RedactionStats};
pub use backend::{
    Color, DocumentHandle, PageHandle, PdfBackend, Point, Quad, Rect, SaveOptions, TextLine,
};
pub use mupdf_backend::MupdfBackend;
pub use page::{PageRedaction, PageRedactor};

use crate::error::{AnonymizerError, AnonymizerResult};
use std::path::Path;

/// What to do with the output path when a document has nothing to redact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnchangedPolicy {
    /// Leave the output path untouched.
    #[default]
    Skip,

    /// Copy the original bytes to the output path.
    CopyOriginal,
}

/// Result of a file-level anonymization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReport {
    pub stats: RedactionStats,

    /// Whether anything was written to the output path
    pub output_written: bool,
}

/// File-level anonymization service.
///
/// This service reads and writes documents on disk around a
/// [`DocumentAnonymizer`], and applies the [`UnchangedPolicy`] when a
/// document turns out to be clean.
pub struct AnonymizationService<B: PdfBackend = MupdfBackend> {
    anonymizer: DocumentAnonymizer<B>,
    unchanged: UnchangedPolicy,
}

impl AnonymizationService<MupdfBackend> {
    /// Creates a service with the MuPDF backend, default settings and no
    /// entity recognizer.
    pub fn with_mupdf() -> Self {
        Self::new(DocumentAnonymizer::new(MupdfBackend::new()))
    }
}

impl<B: PdfBackend> AnonymizationService<B> {
    pub fn new(anonymizer: DocumentAnonymizer<B>) -> Self {
        Self {
            anonymizer,
            unchanged: UnchangedPolicy::default(),
        }
    }

    pub fn with_unchanged_policy(mut self, policy: UnchangedPolicy) -> Self {
        self.unchanged = policy;
        self
    }

    pub fn anonymizer(&self) -> &DocumentAnonymizer<B> {
        &self.anonymizer
    }

    /// Anonymizes `input` into `output`.
    ///
    /// # Returns
    /// Redaction statistics and whether `output` was written
    pub fn anonymize_file(&self, input: &Path, output: &Path) -> AnonymizerResult<ServiceReport> {
        let bytes = read_input(input)?;

        match self.anonymizer.anonymize(&bytes)? {
            AnonymizeOutcome::Redacted { bytes, stats } => {
                write_output(output, &bytes)?;
                Ok(ServiceReport {
                    stats,
                    output_written: true,
                })
            }
            AnonymizeOutcome::NothingFound { stats } => {
                let output_written = match self.unchanged {
                    UnchangedPolicy::Skip => false,
                    UnchangedPolicy::CopyOriginal => {
                        write_output(output, &bytes)?;
                        true
                    }
                };
                Ok(ServiceReport {
                    stats,
                    output_written,
                })
            }
        }
    }

    /// Extracts the reading-order text of every page of a PDF.
    pub fn extract_text(&self, input: &Path) -> AnonymizerResult<Vec<String>> {
        self.anonymizer.extract_pages(&read_input(input)?)
    }

    /// Lists the spans that would be redacted, page by page.
    pub fn scan(&self, input: &Path) -> AnonymizerResult<Vec<PageScan>> {
        self.anonymizer.scan(&read_input(input)?)
    }
}

fn read_input(path: &Path) -> AnonymizerResult<Vec<u8>> {
    if !path.exists() {
        return Err(AnonymizerError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "Input file does not exist"),
        });
    }
    std::fs::read(path).map_err(|e| AnonymizerError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> AnonymizerResult<()> {
    std::fs::write(path, bytes).map_err(|e| AnonymizerError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
