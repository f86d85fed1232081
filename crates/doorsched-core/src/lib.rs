//! Core library for door hardware schedule extraction.
//!
//! This crate provides:
//! - Line sources for plain text and PDF schedules
//! - Line grammars for the Standard, ARA and Supreme schedule dialects
//! - A shared extraction engine producing a flat schedule dataset
//! - Summary reports over extracted datasets

pub mod error;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod report;
pub mod schedule;
pub mod source;

pub use error::{DoorschedError, ExtractionError, PdfError, Result};
pub use models::config::DoorschedConfig;
pub use models::schedule::{Column, Dataset, Dialect, DoorRecord, JobInfo, ProductLine, ScheduleRow};
#[cfg(feature = "pdf")]
pub use pdf::{PdfExtractor, PdfProcessor};
pub use report::{DatasetFilter, ScheduleSummary};
pub use schedule::{DialectEngine, ExtractionResult, ScheduleExtractor};
pub use source::{LineSource, TextSource};
