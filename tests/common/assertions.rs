//! Custom assertions for anonymization testing.
//!
//! Provides domain-specific assertions that make tests more readable
//! and provide better error messages.

use anonymizer::{DocumentAnonymizer, MupdfBackend};

/// Extracts all page text from PDF bytes through MuPDF.
///
/// # Panics
/// Panics if the document cannot be opened.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    DocumentAnonymizer::new(MupdfBackend::new())
        .extract_pages(bytes)
        .unwrap_or_else(|e| panic!("Failed to extract text from PDF: {}", e))
        .concat()
}

/// Asserts that none of `literals` survive in the redacted PDF.
///
/// # Panics
/// Panics listing every literal still present.
pub fn assert_all_redacted(bytes: &[u8], literals: &[&str]) {
    let text = extract_pdf_text(bytes);
    let found: Vec<&str> = literals
        .iter()
        .copied()
        .filter(|literal| text.contains(literal))
        .collect();

    assert!(
        found.is_empty(),
        "Literals should be redacted but were found: {:?}\nExtracted text: {:?}",
        found,
        text
    );
}

/// Asserts that `literal` is still readable in the PDF.
///
/// # Panics
/// Panics if the literal is missing.
pub fn assert_preserved(bytes: &[u8], literal: &str) {
    let text = extract_pdf_text(bytes);
    assert!(
        text.contains(literal),
        "Literal '{}' should be preserved but was not found in {:?}",
        literal,
        text
    );
}

/// Asserts that bytes parse as a PDF with an independent parser.
///
/// # Panics
/// Panics if lopdf rejects the document.
pub fn assert_valid_pdf(bytes: &[u8]) {
    assert!(!bytes.is_empty(), "PDF should not be empty");
    assert!(bytes.starts_with(b"%PDF"), "PDF header missing");
    lopdf::Document::load_mem(bytes)
        .unwrap_or_else(|e| panic!("Output should be a loadable PDF: {}", e));
}

/// Asserts that every line of every page in a memory document no longer
/// contains any of `literals`.
///
/// # Panics
/// Panics naming the first surviving literal.
pub fn assert_memory_redacted(model: &super::MemoryDocumentModel, literals: &[&str]) {
    for (index, page) in model.pages.iter().enumerate() {
        for line in page {
            for literal in literals {
                assert!(
                    !line.contains(literal),
                    "'{}' still present on page {}: {:?}",
                    literal,
                    index + 1,
                    line
                );
            }
        }
    }
}
