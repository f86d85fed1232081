//! WASM bindings for door hardware schedule extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! PDF text extraction happens on the JavaScript side; these bindings take
//! the extracted text, with form feeds between pages.

use wasm_bindgen::prelude::*;

use doorsched_core::models::schedule::{Dataset, Dialect};
use doorsched_core::report::ScheduleSummary;
use doorsched_core::schedule::{DialectEngine, ExtractionStats};
use doorsched_core::source::text::split_pages;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_dialect(dialect: &str) -> Result<Dialect, JsValue> {
    dialect
        .parse()
        .map_err(|e: doorsched_core::ExtractionError| JsValue::from_str(&e.to_string()))
}

/// Extract schedule rows from text with the named dialect.
#[wasm_bindgen]
pub fn extract_schedule(dialect: &str, text: &str) -> Result<JsValue, JsValue> {
    let engine = DialectEngine::new(parse_dialect(dialect)?);
    let result = engine.run(&split_pages(text));

    serde_wasm_bindgen::to_value(&result.dataset)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract schedule rows from text and return them as a JSON string.
#[wasm_bindgen]
pub fn extract_schedule_json(dialect: &str, text: &str) -> Result<String, JsValue> {
    let engine = DialectEngine::new(parse_dialect(dialect)?);
    let result = engine.run(&split_pages(text));

    serde_json::to_string(&result.dataset).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Column headers of a dialect's output table.
#[wasm_bindgen]
pub fn dialect_headers(dialect: &str) -> Result<Vec<String>, JsValue> {
    Ok(parse_dialect(dialect)?
        .headers()
        .into_iter()
        .map(String::from)
        .collect())
}

/// Schedule extractor class for browser use.
#[wasm_bindgen]
pub struct ScheduleExtractor {
    engine: DialectEngine,
}

#[wasm_bindgen]
impl ScheduleExtractor {
    /// Create an extractor for the named dialect.
    #[wasm_bindgen(constructor)]
    pub fn new(dialect: &str) -> Result<ScheduleExtractor, JsValue> {
        Ok(Self {
            engine: DialectEngine::new(parse_dialect(dialect)?),
        })
    }

    /// Only scan pages containing this text; pass an empty string to scan all.
    #[wasm_bindgen]
    pub fn set_page_marker(&mut self, marker: &str) {
        self.engine.set_page_marker(Some(marker.to_string()));
    }

    /// Dialect name of this extractor.
    #[wasm_bindgen(getter)]
    pub fn dialect(&self) -> String {
        self.engine.dialect().to_string()
    }

    /// Extract schedule rows from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.engine.run(&split_pages(text));

        serde_wasm_bindgen::to_value(&result.dataset)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get extraction result with summary tables and metadata.
    #[wasm_bindgen]
    pub fn extract_with_summary(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.engine.run(&split_pages(text));

        #[derive(serde::Serialize)]
        struct ExtractResult {
            summary: ScheduleSummary,
            dataset: Dataset,
            stats: ExtractionStats,
            warnings: Vec<String>,
            processing_time_ms: u64,
        }

        let output = ExtractResult {
            summary: ScheduleSummary::new(&result.dataset),
            dataset: result.dataset,
            stats: result.stats,
            warnings: result.warnings,
            processing_time_ms: result.processing_time_ms,
        };

        serde_wasm_bindgen::to_value(&output)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_extract_schedule_json() {
        let json = extract_schedule_json(
            "standard",
            "D0.01 Accessible WC Timber\nMS2604PT 1 dormakaba Privacy latch SSS\n",
        )
        .unwrap();
        assert!(json.contains("\"door\":\"D0.01\""));
        assert!(json.contains("\"finish\":\"SSS\""));
    }

    #[wasm_bindgen_test]
    fn test_extractor_returns_rows() {
        let extractor = ScheduleExtractor::new("supreme").unwrap();
        let value = extractor
            .extract(
                "SLH2410025: Tauranga Intermediate School Block D\n\
                 Area: Ground Floor\n\
                 D0.01 Accessible WC Timber\n\
                 MS2604PT dormakaba Privacy latch 1 SSS\n",
            )
            .unwrap();

        let dataset: Dataset = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows[0].area, "Ground Floor");
        assert_eq!(dataset.job.unwrap().number, "SLH2410025");
    }

    #[wasm_bindgen_test]
    fn test_extract_with_summary_reports_counts() {
        let extractor = ScheduleExtractor::new("ara").unwrap();
        let value = extractor
            .extract_with_summary("D005A Level 01 Bathroom Aluminium\nHG-100 Hinge 3\nLS-200 Latch 1\n")
            .unwrap();

        let output: serde_json::Value = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(output["summary"]["rows"], 2);
        assert_eq!(output["stats"]["products"], 2);
        assert_eq!(output["processing_time_ms"], 0);
    }

    #[wasm_bindgen_test]
    fn test_dialect_headers() {
        let headers = dialect_headers("ara").unwrap();
        assert_eq!(headers[0], "Door");
        assert_eq!(headers.len(), 10);
    }

    #[wasm_bindgen_test]
    fn test_unknown_dialect() {
        assert!(ScheduleExtractor::new("acme").is_err());
    }

    #[wasm_bindgen_test]
    fn test_extractor_dialect() {
        let mut extractor = ScheduleExtractor::new("supreme").unwrap();
        extractor.set_page_marker("Doors with hardware");
        assert_eq!(extractor.dialect(), "supreme");
    }
}
