//! PDF page text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::{DoorschedError, PdfError};
use crate::source::LineSource;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    max_pages: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            max_pages: 0,
        }
    }

    /// Limit the number of pages read (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Number of pages that will be read.
    fn pages_to_read(&self) -> u32 {
        let count = self.page_count();
        if self.max_pages == 0 {
            count
        } else {
            count.min(self.max_pages as u32)
        }
    }

    /// Page text decoded by lopdf, or `None` when lopdf yields nothing.
    fn lopdf_page_text(&self, page: u32) -> Result<Option<String>> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        match doc.extract_text(&[page]) {
            Ok(text) if !text.trim().is_empty() => Ok(Some(text)),
            Ok(_) => {
                debug!("lopdf found no text on page {}, using pdf-extract", page);
                Ok(None)
            }
            Err(e) => {
                debug!("lopdf failed on page {}: {}, using pdf-extract", page, e);
                Ok(None)
            }
        }
    }

    /// Lines of each page, in page order.
    ///
    /// The pdf-extract fallback reads the whole document, so it runs at
    /// most once per call however many pages need it.
    pub fn page_lines(&self) -> Result<Vec<Vec<String>>> {
        let total = self.pages_to_read();
        if total == 0 {
            return Err(PdfError::NoPages);
        }

        let page_count = self.page_count();
        let mut full_text: Option<String> = None;
        let mut pages = Vec::with_capacity(total as usize);
        for page in 1..=total {
            let text = match self.lopdf_page_text(page)? {
                Some(text) => text,
                None => {
                    if full_text.is_none() {
                        full_text = Some(self.extract_text()?);
                    }
                    split_page(full_text.as_deref().unwrap_or_default(), page, page_count)
                }
            };
            pages.push(text.lines().map(|l| l.trim_end().to_string()).collect());
        }

        let chars: usize = pages
            .iter()
            .flat_map(|p: &Vec<String>| p.iter())
            .map(|l| l.trim().len())
            .sum();
        if chars == 0 {
            warn!("PDF has no extractable text; scanned schedules are not supported");
        }

        debug!("Read {} pages ({} chars of text)", pages.len(), chars);
        Ok(pages)
    }
}

/// Slice of whole-document text for one page (1-indexed), splitting the
/// lines evenly across `page_count` pages.
fn split_page(full_text: &str, page: u32, page_count: u32) -> String {
    if page_count == 0 || page == 0 {
        return String::new();
    }

    let lines: Vec<&str> = full_text.lines().collect();
    let lines_per_page = lines.len().div_ceil(page_count as usize);
    let start = ((page - 1) as usize) * lines_per_page;
    let end = (page as usize) * lines_per_page;

    lines[start.min(lines.len())..end.min(lines.len())].join("\n")
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        match self.lopdf_page_text(page)? {
            Some(text) => Ok(text),
            None => Ok(split_page(&self.extract_text()?, page, self.page_count())),
        }
    }
}

impl LineSource for PdfExtractor {
    fn pages(&self) -> crate::error::Result<Vec<Vec<String>>> {
        self.page_lines().map_err(DoorschedError::from)
    }
}
