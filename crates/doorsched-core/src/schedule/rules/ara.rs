//! ARA schedule grammar.
//!
//! Door headers carry the door code, an area (block/villa or level), a
//! room description and an optional door type:
//!
//! ```text
//! 8.C.ED-02 Block C - 2B-T08-S Entry Alum-Ext
//! 16.B.ID-03 Block E - 3B-ALT-N Study Sliding Aluminium
//! 001.D001A Level 00 Entry Timber
//! ```

use super::patterns::{
    ARA_BLOCK_AREA, ARA_DOOR_HEADER, ARA_DOOR_TYPE_SUFFIX, ARA_LEVEL_AREA, ARA_NOTES,
    BLOCK_SECTION, TRAILING_QTY_PRODUCT,
};
use super::{DialectGrammar, DoorHeader, ProductCandidate, RuleKind};
use crate::models::schedule::Dialect;

/// Grammar for ARA hardware schedules.
pub struct AraGrammar;

const PRECEDENCE: &[RuleKind] = &[
    RuleKind::DoorHeader,
    RuleKind::SectionHeader,
    RuleKind::ProductLine,
    RuleKind::Note,
];

/// Split the text after the door code into `(rest, door_type)`.
///
/// The door type is optional; `rest` keeps everything before it.
pub fn split_door_type(rest: &str) -> (&str, &str) {
    match ARA_DOOR_TYPE_SUFFIX.captures(rest) {
        Some(caps) => {
            let head = caps.get(1).map_or("", |m| m.as_str());
            let door_type = caps.get(2).map_or("", |m| m.as_str());
            (head.trim(), door_type)
        }
        None => (rest.trim(), ""),
    }
}

/// Split `Block C - 2B-T08-S Bathroom` style text into `(area, description)`.
pub fn split_area(rest: &str) -> (String, String) {
    if let Some(caps) = ARA_BLOCK_AREA.captures(rest) {
        return (caps[1].to_string(), caps[2].trim().to_string());
    }

    if let Some(caps) = ARA_LEVEL_AREA.captures(rest) {
        return (caps[1].to_string(), caps[2].trim().to_string());
    }

    (rest.to_string(), String::new())
}

impl DialectGrammar for AraGrammar {
    fn dialect(&self) -> Dialect {
        Dialect::Ara
    }

    fn precedence(&self) -> &'static [RuleKind] {
        PRECEDENCE
    }

    fn door_header(&self, line: &str) -> Option<DoorHeader> {
        let caps = ARA_DOOR_HEADER.captures(line)?;
        let (rest, door_type) = split_door_type(&caps[2]);
        let (area, description) = split_area(rest);

        Some(DoorHeader::new(&caps[1], &description, door_type).with_area(area))
    }

    fn section_header(&self, line: &str) -> Option<String> {
        BLOCK_SECTION
            .is_match(line)
            .then(|| line.to_string())
    }

    fn product_line(&self, line: &str) -> Option<ProductCandidate> {
        let caps = TRAILING_QTY_PRODUCT.captures(line)?;
        Some(ProductCandidate {
            code: caps[1].to_string(),
            description: caps[2].trim().to_string(),
            quantity: caps[3].to_string(),
            finish: None,
        })
    }

    fn note(&self, line: &str) -> Option<String> {
        let caps = ARA_NOTES.captures(line)?;
        let note = caps[1].trim();
        (!note.is_empty()).then(|| note.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_door_header() {
        let header = AraGrammar
            .door_header("8.C.ID-04 Block C - 2B-T08-S Bathroom Timber")
            .unwrap();

        assert_eq!(header.door, "8.C.ID-04");
        assert_eq!(header.area.as_deref(), Some("Block C - 2B-T08-S"));
        assert_eq!(header.description, "Bathroom");
        assert_eq!(header.door_type, "Timber");
        assert_eq!(header.handing, "");
    }

    #[test]
    fn test_sliding_door_type_sets_handing() {
        let header = AraGrammar
            .door_header("16.B.ID-03 Block E - 3B-ALT-N Study Sliding Aluminium")
            .unwrap();

        assert_eq!(header.description, "Study");
        assert_eq!(header.door_type, "Aluminium");
        assert_eq!(header.handing, "Sliding");
    }

    #[test]
    fn test_level_and_numeric_areas() {
        let header = AraGrammar.door_header("001.D001A Level 00 Entry Timber").unwrap();
        assert_eq!(header.area.as_deref(), Some("Level 00"));
        assert_eq!(header.description, "Entry");

        let header = AraGrammar.door_header("D005A 101 Bathroom Aluminium").unwrap();
        assert_eq!(header.area.as_deref(), Some("101"));
        assert_eq!(header.description, "Bathroom");
    }

    #[test]
    fn test_missing_door_type_is_tolerated() {
        let header = AraGrammar.door_header("14.E.ID-01 Block E - 2B-T07-N Garage").unwrap();
        assert_eq!(header.door_type, "");
        assert_eq!(header.area.as_deref(), Some("Block E - 2B-T07-N"));
        assert_eq!(header.description, "Garage");

        let header = AraGrammar.door_header("D005A Plant").unwrap();
        assert_eq!(header.area.as_deref(), Some("Plant"));
        assert_eq!(header.description, "");
    }

    #[test]
    fn test_alum_ext_is_one_door_type() {
        let (rest, door_type) = split_door_type("Block C - 2B-T08-S Entry Alum-Ext");
        assert_eq!(rest, "Block C - 2B-T08-S Entry");
        assert_eq!(door_type, "Alum-Ext");
    }

    #[test]
    fn test_product_quantity_last() {
        let product = AraGrammar
            .product_line("8456-MSB NIDO Privacy Set 57mm Backset Linear Knurl MSB 1")
            .unwrap();

        assert_eq!(product.code, "8456-MSB");
        assert_eq!(product.description, "NIDO Privacy Set 57mm Backset Linear Knurl MSB");
        assert_eq!(product.quantity, "1");
        assert_eq!(product.finish, None);
    }

    #[test]
    fn test_block_section_and_notes() {
        assert_eq!(
            AraGrammar.section_header("Block C - 2B-T08-S"),
            Some("Block C - 2B-T08-S".to_string())
        );
        assert_eq!(AraGrammar.section_header("Block C Bathroom"), None);

        assert_eq!(
            AraGrammar.note("Notes: Door supplied by builder"),
            Some("Door supplied by builder".to_string())
        );
        assert_eq!(AraGrammar.note("Notes:"), None);
        assert_eq!(AraGrammar.note("Door supplied by builder"), None);
    }
}
