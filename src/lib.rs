//! PDF anonymization library with secure, destructive redaction.
//!
//! This library finds personal data in the text of PDF pages and removes
//! it for good. It uses MuPDF's redaction API, so redacted text is
//! physically deleted from the content streams rather than hidden under an
//! overlay.
//!
//! # Features
//!
//! - **Fixed-format data**: CPF and CNPJ (formatted or bare digits), e-mail
//!   addresses, phone numbers and CEP postal codes
//! - **Street addresses**: location entities from a pluggable recognizer,
//!   filtered by address heuristics
//! - **Tight marks**: search hits are inset vertically so bars do not bleed
//!   into neighbouring lines
//! - **Explicit outcomes**: redacted bytes, "nothing found", or an error
//!
//! # Architecture
//!
//! - [`domain`]: Span model and detectors (patterns, entities, merging)
//! - [`ner`]: Entity recognizers (offline street lexicon, external program)
//! - [`redaction`]: Backend traits, page redaction, document pipeline
//! - [`config`]: Tunable parameters
//! - [`error`]: Error handling
//!
//! # Quick Start
//!
//! ```no_run
//! use anonymizer::{AnonymizeOutcome, DocumentAnonymizer, MupdfBackend};
//! use anonymizer::ner::StreetLexiconRecognizer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let anonymizer = DocumentAnonymizer::new(MupdfBackend::new())
//!     .with_recognizer(Box::new(StreetLexiconRecognizer::new()));
//!
//! let input = std::fs::read("contrato.pdf")?;
//! match anonymizer.anonymize(&input)? {
//!     AnonymizeOutcome::Redacted { bytes, stats } => {
//!         std::fs::write("contrato-anonimizado.pdf", bytes)?;
//!         println!("{} marks applied", stats.marks_applied);
//!     }
//!     AnonymizeOutcome::NothingFound { .. } => println!("nothing to redact"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Pattern Detection
//!
//! ```
//! use anonymizer::domain::{PatternDetector, SpanCategory, SpanDetector};
//!
//! let text = "Contato: joao@email.com, CPF 123.456.789-01";
//! let spans = PatternDetector::new().detect(text);
//! assert_eq!(spans.len(), 2);
//! assert_eq!(spans[1].category(), SpanCategory::Email);
//! ```

// Public API
pub mod config;
pub mod domain;
pub mod error;
pub mod ner;
pub mod redaction;

// Re-exports for convenient access
pub use config::AnonymizerConfig;
pub use domain::{
    AddressValidator, EntityDetector, EntityRecognizer, PatternDetector, SensitiveSpan,
    SpanCategory, SpanDetector, SpanMerger,
};
pub use error::{AnonymizerError, AnonymizerResult};
pub use redaction::{
    AnonymizationService, AnonymizeOutcome, DocumentAnonymizer, MupdfBackend, PageRedactor,
    RedactionStats, UnchangedPolicy,
};
