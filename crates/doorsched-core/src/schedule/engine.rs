//! Shared extraction driver for all schedule dialects.

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::models::config::ExtractionConfig;
use crate::models::schedule::{Dataset, Dialect, Line};
use crate::source::text::split_pages;

use super::builder::DatasetBuilder;
use super::classifier::{ClassifiedLine, classify};
use super::context::ExtractionContext;
use super::rules::{DialectGrammar, grammar_for};
use super::ScheduleExtractor;

/// Counters collected during one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Pages scanned.
    pub pages: usize,
    /// Pages skipped because they lack the page marker.
    pub pages_skipped: usize,
    /// Lines scanned on non-skipped pages.
    pub lines: usize,
    pub door_headers: usize,
    pub section_headers: usize,
    pub notes: usize,
    /// Rows emitted.
    pub products: usize,
    /// Product lines seen before any door header.
    pub orphan_products: usize,
    pub noise: usize,
}

/// Result of a schedule extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted rows and metadata.
    pub dataset: Dataset,
    /// Line counters.
    pub stats: ExtractionStats,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Wall-clock timer for `processing_time_ms`.
///
/// `wasm32-unknown-unknown` has no std clock, so the timer reads zero there.
struct Timer {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Timer {
    fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    #[cfg(target_arch = "wasm32")]
    fn elapsed_ms(&self) -> u64 {
        0
    }
}

/// Drives a dialect grammar over the lines of one document.
///
/// The engine holds no scan state; every call builds a fresh
/// [`ExtractionContext`], so one engine can serve many documents, including
/// from several threads at once.
pub struct DialectEngine {
    grammar: Box<dyn DialectGrammar>,
    page_marker: Option<String>,
    job_scan_lines: usize,
}

impl DialectEngine {
    /// Create an engine for a dialect with default settings.
    pub fn new(dialect: Dialect) -> Self {
        Self::with_grammar(grammar_for(dialect))
    }

    /// Create an engine around a custom grammar.
    pub fn with_grammar(grammar: Box<dyn DialectGrammar>) -> Self {
        let defaults = ExtractionConfig::default();
        Self {
            grammar,
            page_marker: defaults.page_marker,
            job_scan_lines: defaults.job_scan_lines,
        }
    }

    /// Create an engine from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.dialect)
            .with_page_marker(config.page_marker.clone())
            .with_job_scan_lines(config.job_scan_lines)
    }

    /// Only scan pages containing this text.
    pub fn with_page_marker(mut self, marker: Option<String>) -> Self {
        self.set_page_marker(marker);
        self
    }

    /// Replace the page marker; blank markers select every page.
    pub fn set_page_marker(&mut self, marker: Option<String>) {
        self.page_marker = marker.filter(|m| !m.trim().is_empty());
    }

    /// Set how many leading first-page lines may hold the job header.
    pub fn with_job_scan_lines(mut self, lines: usize) -> Self {
        self.job_scan_lines = lines;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.grammar.dialect()
    }

    fn page_selected(&self, page: &[String]) -> bool {
        match &self.page_marker {
            Some(marker) => page.iter().any(|l| l.contains(marker.as_str())),
            None => true,
        }
    }

    /// Extract rows from pages of lines, collecting stats and warnings.
    pub fn run(&self, pages: &[Vec<String>]) -> ExtractionResult {
        let timer = Timer::start();
        let dialect = self.dialect();
        let grammar = &*self.grammar;

        let mut context = ExtractionContext::new();
        let mut builder = DatasetBuilder::new(dialect);
        let mut stats = ExtractionStats::default();

        for (page_index, page) in pages.iter().enumerate() {
            if !self.page_selected(page) {
                debug!("Skipping page {} without page marker", page_index + 1);
                stats.pages_skipped += 1;
                continue;
            }
            stats.pages += 1;

            for (position, text) in page.iter().enumerate() {
                let line = Line::new(text.as_str(), page_index, position);
                stats.lines += 1;

                if page_index == 0
                    && position < self.job_scan_lines
                    && !builder.has_job()
                    && !context.has_door()
                {
                    if let Some(job) = grammar.job_header(line.text.trim()) {
                        debug!("Found job {} ({})", job.number, job.name);
                        builder.set_job(job);
                        continue;
                    }
                }

                let classified = classify(&line.text, &context, grammar);
                trace!("{}:{} {:?}", line.page + 1, line.position + 1, classified);

                match classified {
                    ClassifiedLine::DoorHeader(header) => {
                        stats.door_headers += 1;
                        context.enter_door(header);
                    }
                    ClassifiedLine::SectionHeader(area) => {
                        stats.section_headers += 1;
                        context.enter_section(area);
                    }
                    ClassifiedLine::Product {
                        code,
                        description,
                        quantity,
                        finish,
                    } => match context.emit(code, description, quantity, finish) {
                        Some(row) => {
                            stats.products += 1;
                            builder.push(row);
                        }
                        None => {
                            debug!(
                                "Product line before any door on page {} line {}",
                                line.page + 1,
                                line.position + 1
                            );
                            stats.orphan_products += 1;
                        }
                    },
                    ClassifiedLine::Note(note) => {
                        if context.append_note(&note) {
                            stats.notes += 1;
                        }
                    }
                    ClassifiedLine::Noise => stats.noise += 1,
                }
            }
        }

        let dataset = builder.finish();

        let mut warnings = Vec::new();
        if dataset.is_empty() {
            warnings.push(format!(
                "No rows extracted; the document may not be a {} schedule",
                dialect
            ));
        }
        if stats.orphan_products > 0 {
            warnings.push(format!(
                "{} product lines appeared before any door header",
                stats.orphan_products
            ));
        }
        if stats.pages_skipped > 0 && stats.pages == 0 {
            warnings.push("No page contained the page marker".to_string());
        }

        info!(
            "Extracted {} rows for {} doors from {} lines ({} dialect)",
            dataset.len(),
            stats.door_headers,
            stats.lines,
            dialect
        );

        ExtractionResult {
            dataset,
            stats,
            warnings,
            processing_time_ms: timer.elapsed_ms(),
        }
    }
}

impl ScheduleExtractor for DialectEngine {
    fn extract(&self, pages: &[Vec<String>]) -> Dataset {
        self.run(pages).dataset
    }

    fn extract_from_text(&self, text: &str) -> Dataset {
        self.run(&split_pages(text)).dataset
    }
}
