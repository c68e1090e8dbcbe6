//! MuPDF-backed implementation of the PDF backend traits.
//!
//! Marks are PDF `Redact` annotations; committing them runs MuPDF's page
//! redaction, which removes the glyphs, image pixels and vector content
//! under each mark and paints it black. The removed text cannot be
//! recovered by copy-paste or re-extraction.

use super::backend::{
    reading_order, Color, DocumentHandle, PageHandle, PdfBackend, Point, Quad, Rect, SaveOptions,
    TextLine,
};
use crate::error::{AnonymizerError, AnonymizerResult, BoxError};

use mupdf::pdf::{PdfAnnotationType, PdfDocument, PdfPage, PdfWriteOptions};
use mupdf::{Page, TextPageOptions};

const BACKEND: &str = "MuPDF";

fn backend_error(message: String, source: mupdf::Error) -> AnonymizerError {
    AnonymizerError::Backend {
        backend: BACKEND.to_string(),
        message,
        source: Some(Box::new(source)),
    }
}

fn from_mu_rect(r: mupdf::Rect) -> Rect {
    Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn from_mu_quad(q: mupdf::Quad) -> Quad {
    let point = |p: mupdf::Point| Point::new(p.x, p.y);
    Quad::new(point(q.ul), point(q.ur), point(q.ll), point(q.lr))
}

/// Opens PDFs from memory with MuPDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    type Document = MupdfDocument;

    fn open(&self, bytes: &[u8]) -> AnonymizerResult<MupdfDocument> {
        let inner =
            PdfDocument::from_bytes(bytes).map_err(|e| AnonymizerError::MalformedDocument {
                message: "Failed to open PDF with MuPDF".to_string(),
                source: Some(Box::new(e)),
            })?;
        Ok(MupdfDocument { inner })
    }

    fn name(&self) -> &str {
        BACKEND
    }
}

/// An open MuPDF document; MuPDF resources are freed on drop.
pub struct MupdfDocument {
    inner: PdfDocument,
}

impl DocumentHandle for MupdfDocument {
    type Page = MupdfPage;

    fn page_count(&self) -> AnonymizerResult<usize> {
        let count = self
            .inner
            .page_count()
            .map_err(|e| backend_error("Failed to get page count".to_string(), e))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn load_page(&self, index: usize) -> AnonymizerResult<MupdfPage> {
        let number = index + 1;
        let processing = |message: String| AnonymizerError::PdfProcessing {
            message,
            page: number,
            source: None,
        };

        let idx = i32::try_from(index)
            .map_err(|_| processing(format!("Page index {} out of range", index)))?;
        let page = self
            .inner
            .load_page(idx)
            .map_err(|e| AnonymizerError::PdfProcessing {
                message: format!("Failed to load page {}", number),
                page: number,
                source: Some(Box::new(e)),
            })?;
        let pdf_page = PdfPage::try_from(page.clone())
            .map_err(|_| processing("Page is not a PDF page".to_string()))?;

        Ok(MupdfPage {
            page,
            pdf_page,
            number,
        })
    }

    fn serialize(&self, options: &SaveOptions) -> AnonymizerResult<Vec<u8>> {
        let serialization = |message: &str, source: Option<BoxError>| {
            AnonymizerError::Serialization {
                message: message.to_string(),
                source,
            }
        };

        let mut write_options = PdfWriteOptions::default();
        write_options.set_compress(options.compress);
        write_options.set_garbage_level(options.garbage_level);

        // MuPDF writes to a path; stage through a private temp file
        let staging = tempfile::NamedTempFile::new()
            .map_err(|e| serialization("Failed to create staging file", Some(Box::new(e))))?;
        let staging_path = staging
            .path()
            .to_str()
            .ok_or_else(|| serialization("Staging path contains invalid UTF-8", None))?;

        self.inner
            .save_with_options(staging_path, write_options)
            .map_err(|e| serialization("Failed to save redacted PDF", Some(Box::new(e))))?;

        std::fs::read(staging.path())
            .map_err(|e| serialization("Failed to read back redacted PDF", Some(Box::new(e))))
    }
}

/// One loaded page, with PDF annotation access for redaction marks.
pub struct MupdfPage {
    page: Page,
    pdf_page: PdfPage,
    number: usize,
}

impl PageHandle for MupdfPage {
    fn extract_text(&self) -> AnonymizerResult<String> {
        let text_page = self
            .page
            .to_text_page(TextPageOptions::empty())
            .map_err(|e| AnonymizerError::PdfProcessing {
                message: "Failed to extract text".to_string(),
                page: self.number,
                source: Some(Box::new(e)),
            })?;

        let mut lines = Vec::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                lines.push(TextLine {
                    bounds: from_mu_rect(line.bounds()),
                    text: line.chars().filter_map(|c| c.char()).collect(),
                });
            }
        }
        Ok(reading_order(lines))
    }

    fn find_occurrences(&self, needle: &str, max_hits: u32) -> AnonymizerResult<Vec<Quad>> {
        let hits = self.page.search(needle, max_hits).map_err(|e| {
            backend_error(format!("Search failed on page {}", self.number), e)
        })?;
        Ok(hits.into_iter().map(from_mu_quad).collect())
    }

    fn add_mark(&mut self, rect: Rect, fill: Color) -> AnonymizerResult<()> {
        let annot = self
            .pdf_page
            .create_annotation(PdfAnnotationType::Redact)
            .map_err(|e| AnonymizerError::PdfProcessing {
                message: "Failed to create redaction annotation".to_string(),
                page: self.number,
                source: Some(Box::new(e)),
            })?;

        unsafe {
            ffi::set_redaction_area(&annot, rect, fill);
        }
        Ok(())
    }

    fn apply_marks(&mut self) -> AnonymizerResult<()> {
        self.pdf_page
            .redact()
            .map_err(|e| AnonymizerError::PdfProcessing {
                message: format!("Failed to apply redactions on page {}", self.number),
                page: self.number,
                source: Some(Box::new(e)),
            })?;
        Ok(())
    }
}

/// FFI helpers for MuPDF annotation operations.
mod ffi {
    use super::{Color, Rect};
    use mupdf::pdf::PdfAnnotation;

    /// Sets the rectangle and interior (fill) colour of a redaction annotation.
    ///
    /// # Safety
    /// This function uses unsafe FFI calls to access MuPDF's C API.
    /// The annotation must be valid and the context properly initialized.
    pub unsafe fn set_redaction_area(annot: &PdfAnnotation, rect: Rect, fill: Color) {
        #[repr(C)]
        struct PdfAnnotRaw {
            inner: *mut mupdf_sys::pdf_annot,
        }

        let annot_raw = std::mem::transmute::<&PdfAnnotation, &PdfAnnotRaw>(annot);
        let ctx = mupdf_sys::mupdf_new_base_context();

        if !ctx.is_null() {
            let fz_rect = mupdf_sys::fz_rect {
                x0: rect.x0,
                y0: rect.y0,
                x1: rect.x1,
                y1: rect.y1,
            };
            let color = fill.components();

            mupdf_sys::pdf_set_annot_rect(ctx, annot_raw.inner, fz_rect);
            mupdf_sys::pdf_set_annot_interior_color(
                ctx,
                annot_raw.inner,
                color.len() as i32,
                color.as_ptr(),
            );
            mupdf_sys::mupdf_drop_base_context(ctx);
        }
    }
}
