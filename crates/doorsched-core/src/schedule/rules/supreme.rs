//! Supreme schedule grammar.
//!
//! ```text
//! SLH2410025: Tauranga Intermediate School Block D
//! Area: Ground Floor
//! D0.01 Accessible WC Timber
//! Grab rail supplied by builder
//! MS2604PT dormakaba Privacy latch 1 SSS
//! ```

use super::patterns::{
    AREA_SECTION, CODE_PREFIX, DOOR_HEADER, JOB_CODE, JOB_LINE, NOTE_VOCABULARY, SUPREME_PRODUCT,
};
use super::{DialectGrammar, DoorHeader, ProductCandidate, RuleKind};
use crate::models::schedule::{Dialect, JobInfo};

/// Grammar for Supreme Lock & Hardware schedules.
pub struct SupremeGrammar;

const PRECEDENCE: &[RuleKind] = &[
    RuleKind::SectionHeader,
    RuleKind::DoorHeader,
    RuleKind::ProductLine,
    RuleKind::Note,
];

impl DialectGrammar for SupremeGrammar {
    fn dialect(&self) -> Dialect {
        Dialect::Supreme
    }

    fn precedence(&self) -> &'static [RuleKind] {
        PRECEDENCE
    }

    fn door_header(&self, line: &str) -> Option<DoorHeader> {
        let caps = DOOR_HEADER.captures(line)?;
        Some(DoorHeader::new(&caps[1], &caps[2], &caps[3]))
    }

    fn section_header(&self, line: &str) -> Option<String> {
        let caps = AREA_SECTION.captures(line)?;
        Some(caps[1].trim().to_string())
    }

    fn product_line(&self, line: &str) -> Option<ProductCandidate> {
        let caps = SUPREME_PRODUCT.captures(line)?;
        Some(ProductCandidate {
            code: caps[1].to_string(),
            description: caps[2].trim().to_string(),
            quantity: caps[3].to_string(),
            finish: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }

    fn note(&self, line: &str) -> Option<String> {
        if CODE_PREFIX.is_match(line) || line.starts_with("Code") {
            return None;
        }

        NOTE_VOCABULARY
            .is_match(line)
            .then(|| line.to_string())
    }

    fn job_header(&self, line: &str) -> Option<JobInfo> {
        let caps = JOB_LINE.captures(line)?;
        if !JOB_CODE.is_match(&caps[1]) {
            return None;
        }

        Some(JobInfo {
            number: caps[1].to_string(),
            name: caps[2].trim().to_string(),
        })
    }
}
