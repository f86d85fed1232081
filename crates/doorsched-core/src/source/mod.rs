//! Sources of page lines for extraction.

pub mod text;

pub use text::TextSource;

use crate::error::Result;

/// Supplies the ordered lines of each page of a document.
pub trait LineSource {
    /// Lines of every page, in page order.
    fn pages(&self) -> Result<Vec<Vec<String>>>;
}
