//! Door hardware schedule extraction.

mod builder;
mod classifier;
mod context;
mod engine;
pub mod rules;

pub use builder::DatasetBuilder;
pub use classifier::{ClassifiedLine, classify};
pub use context::ExtractionContext;
pub use engine::{DialectEngine, ExtractionResult, ExtractionStats};

use crate::models::schedule::Dataset;

/// Trait for schedule extractors.
pub trait ScheduleExtractor {
    /// Extract rows from pages of lines.
    fn extract(&self, pages: &[Vec<String>]) -> Dataset;

    /// Extract rows from plain text, pages separated by form feeds.
    fn extract_from_text(&self, text: &str) -> Dataset;
}
