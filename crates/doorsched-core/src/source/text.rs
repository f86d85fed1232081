//! Plain-text line source.

use std::path::Path;

use super::LineSource;
use crate::error::Result;

/// Page separator in plain-text input.
pub const PAGE_BREAK: char = '\x0c';

/// Split text into pages of lines.
///
/// Pages are separated by form feeds. Lines keep their text apart from a
/// trailing carriage return; blank lines are kept.
pub fn split_pages(text: &str) -> Vec<Vec<String>> {
    text.split(PAGE_BREAK)
        .map(|page| {
            page.lines()
                .map(|l| l.trim_end_matches('\r').to_string())
                .collect()
        })
        .collect()
}

/// In-memory text document.
#[derive(Debug, Clone)]
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a UTF-8 text file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }
}

impl LineSource for TextSource {
    fn pages(&self) -> Result<Vec<Vec<String>>> {
        Ok(split_pages(&self.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("a\r\nb\n\x0cc\n\nd");
        assert_eq!(
            pages,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), String::new(), "d".to_string()],
            ]
        );
    }

    #[test]
    fn test_single_page() {
        let source = TextSource::new("D0.01 Office Timber");
        assert_eq!(source.pages().unwrap().len(), 1);
    }
}
