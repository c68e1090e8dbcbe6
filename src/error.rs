//! Error types for the PDF anonymization library.
//!
//! Only [`AnonymizerError::MalformedDocument`], [`AnonymizerError::Serialization`]
//! and page-level processing failures ever leave [`DocumentAnonymizer`]. The
//! recoverable kinds ([`AnonymizerError::ModelUnavailable`] and
//! [`AnonymizerError::SpanLocation`]) are logged and swallowed where they occur.
//!
//! [`DocumentAnonymizer`]: crate::redaction::DocumentAnonymizer

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed backend error carried as an error source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for anonymization operations.
pub type AnonymizerResult<T> = Result<T, AnonymizerError>;

/// Error type for all anonymization operations.
#[derive(Debug, Error)]
pub enum AnonymizerError {
    /// The input bytes could not be opened as a PDF document.
    #[error("malformed document: {message}")]
    MalformedDocument {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The redacted document could not be written out.
    #[error("failed to serialize redacted document: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A span's text could not be located on its page.
    #[error("could not locate a {category} span on page {page}: {reason}")]
    SpanLocation {
        page: usize,
        category: String,
        reason: String,
    },

    /// The entity recognizer could not be obtained or failed to run.
    #[error("entity recognizer '{recognizer}' unavailable: {reason}")]
    ModelUnavailable { recognizer: String, reason: String },

    /// A page could not be loaded, marked, or committed.
    #[error("PDF processing error on page {page}: {message}")]
    PdfProcessing {
        message: String,
        page: usize,
        #[source]
        source: Option<BoxError>,
    },

    /// Backend-specific error outside of a single page (MuPDF, ...).
    #[error("{backend} backend error: {message}")]
    Backend {
        backend: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Error occurred while reading or writing files.
    #[error("IO error for path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid parameters.
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// Configuration file could not be read or is invalid.
    #[error("Invalid configuration '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl AnonymizerError {
    /// Returns true for the failures that abort a whole document.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::SpanLocation { .. } | Self::ModelUnavailable { .. }
        )
    }
}
