//! Standard schedule grammar.
//!
//! ```text
//! D0.01 Accessible WC Timber
//! MS2604PT 1 dormakaba Privacy latch SSS
//! ```

use super::patterns::{DOOR_HEADER, STANDARD_PRODUCT};
use super::{DialectGrammar, DoorHeader, ProductCandidate, RuleKind};
use crate::models::schedule::Dialect;

/// Grammar for "Doors with hardware" schedules.
pub struct StandardGrammar;

const PRECEDENCE: &[RuleKind] = &[RuleKind::DoorHeader, RuleKind::ProductLine];

impl DialectGrammar for StandardGrammar {
    fn dialect(&self) -> Dialect {
        Dialect::Standard
    }

    fn precedence(&self) -> &'static [RuleKind] {
        PRECEDENCE
    }

    fn door_header(&self, line: &str) -> Option<DoorHeader> {
        let caps = DOOR_HEADER.captures(line)?;
        Some(DoorHeader::new(&caps[1], &caps[2], &caps[3]))
    }

    fn product_line(&self, line: &str) -> Option<ProductCandidate> {
        let caps = STANDARD_PRODUCT.captures(line)?;
        Some(ProductCandidate {
            code: caps[1].to_string(),
            quantity: caps[2].to_string(),
            description: caps[3].trim().to_string(),
            finish: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }
}
