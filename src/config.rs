//! Pipeline configuration.
//!
//! The span length floor and the redaction bar inset were tuned by hand for
//! typical Latin fonts; both are exposed so they can be adjusted per corpus.
//! Values come from defaults, an optional TOML file, and builder overrides,
//! in that order.
//!
//! ```toml
//! min_span_chars = 8
//! height_inset = 0.15
//! max_hits_per_span = 100
//! compress = true
//! garbage_level = 4
//! ```

use crate::error::{AnonymizerError, AnonymizerResult};
use serde::Deserialize;
use std::path::Path;

/// Tunable parameters of the anonymization pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnonymizerConfig {
    /// Spans shorter than this many characters are not redacted.
    pub min_span_chars: usize,

    /// Fraction of a hit's height trimmed from both its top and bottom edge.
    pub height_inset: f32,

    /// Initial search hit cap per span text on one page; a search that
    /// fills the cap is repeated with a doubled cap, so every occurrence
    /// is still marked.
    pub max_hits_per_span: u32,

    /// Compress content streams when saving.
    pub compress: bool,

    /// Unused-object garbage collection level (0 disables, 4 also deduplicates).
    pub garbage_level: i32,
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            min_span_chars: 8,
            height_inset: 0.15,
            max_hits_per_span: 100,
            compress: true,
            garbage_level: 4,
        }
    }
}

impl AnonymizerConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates a TOML configuration file.
    pub fn from_file(path: &Path) -> AnonymizerResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AnonymizerError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|e| AnonymizerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate().map_err(|e| AnonymizerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Sets the minimum span length.
    pub fn with_min_span_chars(mut self, min_span_chars: usize) -> Self {
        self.min_span_chars = min_span_chars;
        self
    }

    /// Sets the vertical inset factor.
    pub fn with_height_inset(mut self, height_inset: f32) -> Self {
        self.height_inset = height_inset;
        self
    }

    /// Sets the maximum number of search hits per span text.
    pub fn with_max_hits(mut self, max_hits_per_span: u32) -> Self {
        self.max_hits_per_span = max_hits_per_span;
        self
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> AnonymizerResult<()> {
        if self.min_span_chars == 0 {
            return Err(invalid("min_span_chars", "must be at least 1"));
        }
        if !(0.0..0.5).contains(&self.height_inset) {
            return Err(invalid(
                "height_inset",
                &format!("{} is outside [0, 0.5)", self.height_inset),
            ));
        }
        if self.max_hits_per_span == 0 {
            return Err(invalid("max_hits_per_span", "must be at least 1"));
        }
        if !(0..=4).contains(&self.garbage_level) {
            return Err(invalid(
                "garbage_level",
                &format!("{} is outside 0..=4", self.garbage_level),
            ));
        }
        Ok(())
    }
}

fn invalid(parameter: &str, reason: &str) -> AnonymizerError {
    AnonymizerError::InvalidInput {
        parameter: parameter.to_string(),
        reason: reason.to_string(),
    }
}
