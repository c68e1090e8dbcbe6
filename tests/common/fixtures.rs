//! Test fixtures and PDF builders.
//!
//! Provides builders for creating test PDFs with specific content,
//! following the Builder pattern for clean test setup.

use anyhow::Result;
use printpdf::*;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Builder for creating test PDFs, one text line per `use_text` call so
/// that every line lands at its own baseline.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let pdf = TestPdfBuilder::new()
///     .with_line("Contato: joao@email.com")
///     .new_page()
///     .with_line("CPF 123.456.789-01")
///     .build(Path::new("/tmp/test.pdf"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    title: String,
    pages: Vec<Vec<String>>,
    font_size: f32,
    page_width: Mm,
    page_height: Mm,
}

impl TestPdfBuilder {
    /// Creates a new test PDF builder with one empty A4 page.
    pub fn new() -> Self {
        Self {
            title: "Test Document".to_string(),
            pages: vec![Vec::new()],
            font_size: 12.0,
            page_width: Mm(210.0),  // A4 width
            page_height: Mm(297.0), // A4 height
        }
    }

    /// Sets the document title (metadata only).
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Adds a line of text to the current page.
    pub fn with_line(mut self, line: &str) -> Self {
        if let Some(page) = self.pages.last_mut() {
            page.push(line.to_string());
        }
        self
    }

    /// Adds several lines to the current page.
    pub fn with_lines(self, lines: &[&str]) -> Self {
        lines.iter().fold(self, |builder, line| builder.with_line(line))
    }

    /// Starts a new page; following lines go there.
    pub fn new_page(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    /// Sets the font size in points.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Builds the PDF and writes it to the specified path.
    pub fn build(self, output_path: &Path) -> Result<PathBuf> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, self.page_width, self.page_height, "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let line_step = Mm(self.font_size * 0.3528 * 1.8);

        for (index, lines) in self.pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(self.page_width, self.page_height, "Layer 1")
            };
            let current_layer = doc.get_page(page).get_layer(layer);

            let mut y = Mm(270.0);
            for line in lines {
                current_layer.use_text(line.as_str(), self.font_size, Mm(20.0), y, &font);
                y = Mm(y.0 - line_step.0);
            }
        }

        doc.save(&mut BufWriter::new(fs::File::create(output_path)?))?;
        Ok(output_path.to_path_buf())
    }

    /// Builds the PDF in a scratch directory and returns its bytes.
    pub fn to_bytes(self) -> Result<Vec<u8>> {
        let dir = tempfile::TempDir::new()?;
        let path = self.build(&dir.path().join("fixture.pdf"))?;
        Ok(fs::read(path)?)
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One-page PDF with the contact line used across the end-to-end tests.
pub fn create_contact_pdf(path: &Path) -> Result<PathBuf> {
    TestPdfBuilder::new()
        .with_title("Cadastro")
        .with_line(CONTACT_LINE)
        .build(path)
}

/// One-page PDF that only mentions an amount of money.
pub fn create_receipt_pdf(path: &Path) -> Result<PathBuf> {
    TestPdfBuilder::new()
        .with_title("Recibo")
        .with_line(RECEIPT_LINE)
        .build(path)
}

pub const CONTACT_LINE: &str = "Contato: joao@email.com, CPF 123.456.789-01";
pub const RECEIPT_LINE: &str = "Total: R$ 50,00";

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder_pattern() {
        let builder = TestPdfBuilder::new()
            .with_title("Test")
            .with_line("first")
            .new_page()
            .with_lines(&["second", "third"]);

        assert_eq!(builder.title, "Test");
        assert_eq!(builder.pages.len(), 2);
        assert_eq!(builder.pages[1].len(), 2);
    }

    #[test]
    fn test_create_contact_pdf() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("test.pdf");

        create_contact_pdf(&pdf_path)?;

        assert!(pdf_path.exists());
        Ok(())
    }
}
