//! PDF backend abstraction and page geometry.
//!
//! The pipeline talks to PDF engines only through these traits, which keeps
//! detection and mark placement independent of MuPDF and testable against
//! an in-memory page model.

use crate::error::AnonymizerResult;

/// Point in page space (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Quadrilateral covering one text hit; rotated or skewed text yields a
/// non-rectangular quad.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quad {
    pub ul: Point,
    pub ur: Point,
    pub ll: Point,
    pub lr: Point,
}

impl Quad {
    pub fn new(ul: Point, ur: Point, ll: Point, lr: Point) -> Self {
        Self { ul, ur, ll, lr }
    }

    /// Axis-aligned bounding rectangle of the four corners.
    pub fn bounds(&self) -> Rect {
        let corners = [self.ul, self.ur, self.ll, self.lr];
        let (mut x0, mut y0) = (f32::INFINITY, f32::INFINITY);
        let (mut x1, mut y1) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in corners {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Rect { x0, y0, x1, y1 }
    }
}

impl From<Rect> for Quad {
    fn from(r: Rect) -> Self {
        Self {
            ul: Point::new(r.x0, r.y0),
            ur: Point::new(r.x1, r.y0),
            ll: Point::new(r.x0, r.y1),
            lr: Point::new(r.x1, r.y1),
        }
    }
}

/// Axis-aligned rectangle, `(x0, y0)` top-left and `(x1, y1)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// True when the rectangle has no positive area.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Moves the top and bottom edges inward by `factor × height` each.
    pub fn inset_vertical(&self, factor: f32) -> Self {
        let delta = self.height() * factor;
        Self {
            y0: self.y0 + delta,
            y1: self.y1 - delta,
            ..*self
        }
    }
}

/// RGB fill colour, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn components(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Serialization settings for the redacted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub compress: bool,
    pub garbage_level: i32,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            compress: true,
            garbage_level: 4,
        }
    }
}

/// Opens documents from raw bytes.
pub trait PdfBackend: Send + Sync {
    type Document: DocumentHandle;

    /// Parses `bytes`; fails with `MalformedDocument` when they are not a
    /// readable PDF.
    fn open(&self, bytes: &[u8]) -> AnonymizerResult<Self::Document>;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &str;
}

/// An open document. Dropping it releases every backend resource.
pub trait DocumentHandle {
    type Page: PageHandle;

    fn page_count(&self) -> AnonymizerResult<usize>;

    /// Loads the page at zero-based `index`.
    fn load_page(&self, index: usize) -> AnonymizerResult<Self::Page>;

    /// Writes the whole document, including committed redactions.
    fn serialize(&self, options: &SaveOptions) -> AnonymizerResult<Vec<u8>>;
}

/// Text and geometry access for one page, plus destructive marking.
pub trait PageHandle {
    /// Plain text in reading order (top-to-bottom, then left-to-right).
    fn extract_text(&self) -> AnonymizerResult<String>;

    /// Every visual occurrence of `needle`, at most `max_hits` of them.
    fn find_occurrences(&self, needle: &str, max_hits: u32) -> AnonymizerResult<Vec<Quad>>;

    /// Registers a redaction mark over `rect`. Nothing changes until
    /// [`PageHandle::apply_marks`].
    fn add_mark(&mut self, rect: Rect, fill: Color) -> AnonymizerResult<()>;

    /// Paints every registered mark and removes the content underneath.
    fn apply_marks(&mut self) -> AnonymizerResult<()>;
}

/// One extracted text line with its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub bounds: Rect,
    pub text: String,
}

/// Joins lines in reading order: by bottom edge, then left edge.
///
/// Bottom edges are rounded to whole points first, so baseline jitter
/// between runs on the same row does not reorder them.
pub fn reading_order(mut lines: Vec<TextLine>) -> String {
    let row = |line: &TextLine| line.bounds.y1.round() as i64;
    lines.sort_by(|a, b| {
        row(a)
            .cmp(&row(b))
            .then_with(|| a.bounds.x0.total_cmp(&b.bounds.x0))
    });

    let mut text = String::new();
    for line in lines.iter().filter(|l| !l.text.is_empty()) {
        text.push_str(&line.text);
        text.push('\n');
    }
    text
}
