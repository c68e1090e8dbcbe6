//! In-memory PDF backend for pipeline tests.
//!
//! A "document" is JSON: a list of pages, each a list of text lines. Lines
//! are laid out on a fixed grid (every character 6 units wide, every line
//! 12 units tall, one line every 20 units), so search hits and marks can be
//! checked exactly without a PDF engine.

use anonymizer::error::{AnonymizerError, AnonymizerResult};
use anonymizer::redaction::{
    Color, DocumentHandle, PageHandle, PdfBackend, Point, Quad, Rect, SaveOptions,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

pub const CHAR_WIDTH: f32 = 6.0;
pub const LINE_HEIGHT: f32 = 12.0;
pub const LINE_STEP: f32 = 20.0;

/// Serialized form of an in-memory document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocumentModel {
    pub pages: Vec<Vec<String>>,

    /// Searches for these needles fail
    #[serde(default)]
    pub failing_needles: Vec<String>,

    /// Serialization fails
    #[serde(default)]
    pub fail_serialize: bool,
}

impl MemoryDocumentModel {
    pub fn new(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|lines| lines.iter().map(|l| l.to_string()).collect())
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_failing_needle(mut self, needle: &str) -> Self {
        self.failing_needles.push(needle.to_string());
        self
    }

    pub fn with_failing_serialize(mut self) -> Self {
        self.fail_serialize = true;
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("model serializes")
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).expect("model deserializes")
    }
}

/// Backend over [`MemoryDocumentModel`] bytes.
#[derive(Debug, Default)]
pub struct MemoryBackend;

impl PdfBackend for MemoryBackend {
    type Document = MemoryDocument;

    fn open(&self, bytes: &[u8]) -> AnonymizerResult<MemoryDocument> {
        let model: MemoryDocumentModel =
            serde_json::from_slice(bytes).map_err(|e| AnonymizerError::MalformedDocument {
                message: "not a memory document".to_string(),
                source: Some(Box::new(e)),
            })?;
        Ok(MemoryDocument {
            model: Rc::new(RefCell::new(model)),
        })
    }

    fn name(&self) -> &str {
        "memory"
    }
}

pub struct MemoryDocument {
    model: Rc<RefCell<MemoryDocumentModel>>,
}

impl DocumentHandle for MemoryDocument {
    type Page = MemoryPage;

    fn page_count(&self) -> AnonymizerResult<usize> {
        Ok(self.model.borrow().pages.len())
    }

    fn load_page(&self, index: usize) -> AnonymizerResult<MemoryPage> {
        if index >= self.model.borrow().pages.len() {
            return Err(AnonymizerError::PdfProcessing {
                message: "page out of range".to_string(),
                page: index + 1,
                source: None,
            });
        }
        Ok(MemoryPage {
            model: Rc::clone(&self.model),
            index,
            marks: Vec::new(),
        })
    }

    fn serialize(&self, _options: &SaveOptions) -> AnonymizerResult<Vec<u8>> {
        let model = self.model.borrow();
        if model.fail_serialize {
            return Err(AnonymizerError::Serialization {
                message: "disk full".to_string(),
                source: None,
            });
        }
        serde_json::to_vec(&*model).map_err(|e| AnonymizerError::Serialization {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })
    }
}

fn covers(rect: &Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

pub struct MemoryPage {
    model: Rc<RefCell<MemoryDocumentModel>>,
    index: usize,
    marks: Vec<(Rect, Color)>,
}

impl MemoryPage {
    fn line_rect(line: usize, first_col: usize, chars: usize) -> Rect {
        let y0 = LINE_STEP * line as f32;
        Rect::new(
            CHAR_WIDTH * first_col as f32,
            y0,
            CHAR_WIDTH * (first_col + chars) as f32,
            y0 + LINE_HEIGHT,
        )
    }
}

impl PageHandle for MemoryPage {
    fn extract_text(&self) -> AnonymizerResult<String> {
        let model = self.model.borrow();
        let mut text = String::new();
        for line in &model.pages[self.index] {
            if !line.is_empty() {
                text.push_str(line);
                text.push('\n');
            }
        }
        Ok(text)
    }

    fn find_occurrences(&self, needle: &str, max_hits: u32) -> AnonymizerResult<Vec<Quad>> {
        let model = self.model.borrow();
        if model.failing_needles.iter().any(|n| n == needle) {
            return Err(AnonymizerError::Backend {
                backend: "memory".to_string(),
                message: "search failed".to_string(),
                source: None,
            });
        }

        let needle_chars = needle.chars().count();
        let mut hits = Vec::new();
        for (row, line) in model.pages[self.index].iter().enumerate() {
            for (offset, _) in line.match_indices(needle) {
                let col = line[..offset].chars().count();
                hits.push(Quad::from(Self::line_rect(row, col, needle_chars)));
            }
        }
        hits.truncate(max_hits as usize);
        Ok(hits)
    }

    fn add_mark(&mut self, rect: Rect, fill: Color) -> AnonymizerResult<()> {
        self.marks.push((rect, fill));
        Ok(())
    }

    fn apply_marks(&mut self) -> AnonymizerResult<()> {
        let mut model = self.model.borrow_mut();
        for (row, line) in model.pages[self.index].iter_mut().enumerate() {
            let y = LINE_STEP * row as f32 + LINE_HEIGHT / 2.0;
            *line = line
                .chars()
                .enumerate()
                .map(|(col, c)| {
                    let center = Point::new(CHAR_WIDTH * col as f32 + CHAR_WIDTH / 2.0, y);
                    if self.marks.iter().any(|(rect, _)| covers(rect, center)) {
                        ' '
                    } else {
                        c
                    }
                })
                .collect();
        }
        self.marks.clear();
        Ok(())
    }
}
