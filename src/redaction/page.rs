//! Mapping detected spans onto page geometry and redacting them.

use super::backend::{Color, PageHandle, Quad};
use crate::config::AnonymizerConfig;
use crate::domain::SensitiveSpan;
use crate::error::{AnonymizerError, AnonymizerResult};
use std::collections::HashMap;

/// Counters for one redacted page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRedaction {
    /// Marks registered and committed on the page
    pub marks_applied: usize,

    /// Spans that produced no mark (not found, or lookup failed)
    pub spans_unlocated: usize,
}

/// Places opaque redaction marks over every visual occurrence of each span.
///
/// Search hits are taller than the glyph ink, so each hit's top and bottom
/// edges are pulled in by `height_inset × height` before the mark is placed;
/// otherwise bars bleed into the neighbouring lines.
#[derive(Debug, Clone, Copy)]
pub struct PageRedactor {
    height_inset: f32,
    max_hits: u32,
    fill: Color,
}

impl PageRedactor {
    pub fn new(height_inset: f32, max_hits: u32) -> Self {
        Self {
            height_inset,
            max_hits,
            fill: Color::BLACK,
        }
    }

    pub fn from_config(config: &AnonymizerConfig) -> Self {
        Self::new(config.height_inset, config.max_hits_per_span)
    }

    /// Redacts `spans` on `page` and commits the marks.
    ///
    /// `page_text` must be the text the spans were detected in and
    /// `page_number` is 1-based, for diagnostics only. A span whose
    /// occurrences cannot be looked up is skipped; failing to register or
    /// commit a mark aborts the page. Each distinct literal is searched and
    /// marked once per page, however many spans repeat it.
    pub fn redact<P: PageHandle + ?Sized>(
        &self,
        page: &mut P,
        page_number: usize,
        spans: &[SensitiveSpan],
        page_text: &str,
    ) -> AnonymizerResult<PageRedaction> {
        let mut result = PageRedaction::default();
        // literal -> marks placed for it
        let mut located: HashMap<&str, usize> = HashMap::new();

        for span in spans {
            let Some(literal) = span.text(page_text) else {
                result.spans_unlocated += 1;
                continue;
            };

            if let Some(&marks) = located.get(literal) {
                if marks == 0 {
                    result.spans_unlocated += 1;
                }
                continue;
            }

            let hits = match self.find_all(page, literal) {
                Ok(hits) => hits,
                Err(e) => {
                    let err = AnonymizerError::SpanLocation {
                        page: page_number,
                        category: span.category().to_string(),
                        reason: e.to_string(),
                    };
                    log::warn!("{}", err);
                    result.spans_unlocated += 1;
                    continue;
                }
            };

            let mut span_marks = 0;
            for quad in hits {
                let rect = quad.bounds().inset_vertical(self.height_inset);
                if rect.is_degenerate() {
                    continue;
                }
                page.add_mark(rect, self.fill)?;
                span_marks += 1;
            }

            if span_marks == 0 {
                log::debug!(
                    "Page {}: {} span of {} chars not found on page",
                    page_number,
                    span.category(),
                    span.char_len()
                );
                result.spans_unlocated += 1;
            }
            located.insert(literal, span_marks);
            result.marks_applied += span_marks;
        }

        if result.marks_applied > 0 {
            page.apply_marks()?;
        }

        Ok(result)
    }

    /// Returns every occurrence of `literal`.
    ///
    /// Backends stop at the hit cap they are given, so a full result is
    /// retried with a doubled cap until it comes back short.
    fn find_all<P: PageHandle + ?Sized>(
        &self,
        page: &P,
        literal: &str,
    ) -> AnonymizerResult<Vec<Quad>> {
        let mut cap = self.max_hits.max(1);
        loop {
            let hits = page.find_occurrences(literal, cap)?;
            if hits.len() < cap as usize || cap == u32::MAX {
                return Ok(hits);
            }
            log::debug!("Search hit cap {} reached, retrying with a larger cap", cap);
            cap = cap.saturating_mul(2);
        }
    }
}

impl Default for PageRedactor {
    fn default() -> Self {
        Self::from_config(&AnonymizerConfig::default())
    }
}
