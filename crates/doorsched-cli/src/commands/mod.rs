//! CLI subcommands and the input handling they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod output;

use std::path::Path;

use tracing::debug;

use doorsched_core::models::config::DoorschedConfig;
use doorsched_core::pdf::{PdfExtractor, PdfProcessor};
use doorsched_core::source::{LineSource, TextSource};

/// Load configuration from an explicit path, or use defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DoorschedConfig> {
    match config_path {
        Some(path) => Ok(DoorschedConfig::from_file(Path::new(path))?),
        None => Ok(DoorschedConfig::default()),
    }
}

/// Read the pages of a schedule file.
///
/// PDFs go through the PDF extractor; any other file is read as UTF-8 text
/// with form feeds separating pages.
pub fn read_pages(path: &Path, config: &DoorschedConfig) -> anyhow::Result<Vec<Vec<String>>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let pages = if extension == "pdf" {
        let data = std::fs::read(path)?;
        let mut extractor = PdfExtractor::new().with_max_pages(config.pdf.max_pages);
        extractor.load(&data)?;
        debug!("PDF has {} pages", extractor.page_count());
        extractor.pages()?
    } else {
        TextSource::from_file(path)?.pages()?
    };

    Ok(pages)
}
