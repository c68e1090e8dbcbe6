//! Entity recognizers that plug into [`EntityDetector`].
//!
//! [`EntityDetector`]: crate::domain::EntityDetector

pub mod command;
pub mod lexicon;

pub use command::CommandRecognizer;
pub use lexicon::StreetLexiconRecognizer;
