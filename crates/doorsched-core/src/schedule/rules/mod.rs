//! Dialect grammars for hardware schedule lines.
//!
//! Each dialect supplies the same set of line rules behind
//! [`DialectGrammar`]; the classifier tries them in the order given by
//! [`DialectGrammar::precedence`].

pub mod ara;
pub mod patterns;
pub mod standard;
pub mod supreme;

pub use ara::AraGrammar;
pub use standard::StandardGrammar;
pub use supreme::SupremeGrammar;

use crate::models::schedule::{Dialect, JobInfo};

use patterns::SLIDING;

/// Kinds of line rules a grammar can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    DoorHeader,
    SectionHeader,
    ProductLine,
    Note,
}

/// Fields captured from a door header line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoorHeader {
    pub door: String,
    pub description: String,
    pub door_type: String,
    pub handing: String,
    pub rating: String,
    /// Area carried on the header itself (ARA); `None` keeps the section area.
    pub area: Option<String>,
}

impl DoorHeader {
    /// Build a header, moving any `Sliding` token from the door type into handing.
    pub fn new(door: &str, description: &str, door_type: &str) -> Self {
        let (door_type, handing) = split_handing(door_type);
        Self {
            door: door.to_string(),
            description: description.trim().to_string(),
            door_type,
            handing,
            rating: String::new(),
            area: None,
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }
}

/// A product-shaped line before its quantity is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCandidate {
    pub code: String,
    pub description: String,
    /// Raw quantity token.
    pub quantity: String,
    pub finish: Option<String>,
}

/// Line rules of one schedule dialect.
pub trait DialectGrammar: Send + Sync {
    /// The dialect this grammar reads.
    fn dialect(&self) -> Dialect;

    /// Rule kinds in the order they are tried.
    fn precedence(&self) -> &'static [RuleKind];

    /// Match a door header line.
    fn door_header(&self, line: &str) -> Option<DoorHeader>;

    /// Match a section header, returning the new area.
    fn section_header(&self, _line: &str) -> Option<String> {
        None
    }

    /// Match a product line.
    fn product_line(&self, line: &str) -> Option<ProductCandidate>;

    /// Match a note line. Only consulted while a door is active.
    fn note(&self, _line: &str) -> Option<String> {
        None
    }

    /// Match a `JOBCODE: Job Name` line at the top of the first page.
    fn job_header(&self, _line: &str) -> Option<JobInfo> {
        None
    }
}

/// Grammar for a dialect.
pub fn grammar_for(dialect: Dialect) -> Box<dyn DialectGrammar> {
    match dialect {
        Dialect::Standard => Box::new(StandardGrammar),
        Dialect::Ara => Box::new(AraGrammar),
        Dialect::Supreme => Box::new(SupremeGrammar),
    }
}

/// Split a door type into `(door_type, handing)`, extracting `Sliding`.
pub fn split_handing(door_type: &str) -> (String, String) {
    if SLIDING.is_match(door_type) {
        let stripped = SLIDING.replace_all(door_type, "");
        let door_type = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        (door_type, "Sliding".to_string())
    } else {
        (door_type.trim().to_string(), String::new())
    }
}
