//! Common regex patterns for hardware schedule line grammars.

use lazy_static::lazy_static;
use regex::Regex;

/// Column header lines repeated at the top of schedule pages.
pub const COLUMN_HEADERS: &[&str] = &[
    "Code Description Product",
    "Door Area Description Rating Handing Door Type",
    "Code Description Finish",
    "Quantity Product",
];

lazy_static! {
    // Door headers shared by Standard and Supreme: "D0.01 Accessible WC Timber"
    pub static ref DOOR_HEADER: Regex = Regex::new(
        r"^(D\d+\.\d+)\s+(.+?)\s+(Timber|Alum|INAL|Aluminium|Cavity Slider|Sliding\s+\w+)\s*$"
    ).unwrap();

    // Standard products: "MS2604PT 1 dormakaba Privacy latch SSS"
    pub static ref STANDARD_PRODUCT: Regex = Regex::new(
        r"^([A-Z0-9/-]+)\s+(\d+)\s+(.+?)(?:\s+(SSS|SCP|SIL|PF))?\s*$"
    ).unwrap();

    // ARA door codes: 8.C.ED-02, 001.D001A, D005A
    pub static ref ARA_DOOR_HEADER: Regex = Regex::new(
        r"^(\d+\.[A-Z]\.[EI]D-\d+|\d+\.D\d+[A-Z]?|D\d+[A-Z]{1,2})\s+(.+)$"
    ).unwrap();

    pub static ref ARA_DOOR_TYPE_SUFFIX: Regex = Regex::new(
        r"^(.*?)\s*\b((?:Sliding\s+)?(?:Timber|Alum-Ext|Cavity Slider|Aluminium|INAL))$"
    ).unwrap();

    // "Block C - 2B-T08-S Bathroom"
    pub static ref ARA_BLOCK_AREA: Regex = Regex::new(
        r"^(Block [A-Z] - [\w-]+)\s+(.+)$"
    ).unwrap();

    // "Level 00 Entry" or "001 Entry"
    pub static ref ARA_LEVEL_AREA: Regex = Regex::new(
        r"^(Level\s+\d+|\d+)\s+(.+)$"
    ).unwrap();

    pub static ref BLOCK_SECTION: Regex = Regex::new(
        r"^Block [A-Z] - [\w-]+$"
    ).unwrap();

    pub static ref ARA_NOTES: Regex = Regex::new(
        r"^Notes:\s*(.*)$"
    ).unwrap();

    // Products with the quantity as last token; Supreme allows a finish after it
    pub static ref TRAILING_QTY_PRODUCT: Regex = Regex::new(
        r"^([A-Z0-9\-/\.]+)\s+(.+?)\s+(\d+)$"
    ).unwrap();

    pub static ref SUPREME_PRODUCT: Regex = Regex::new(
        r"^([A-Z0-9\-/\.]+)\s+(.+?)\s+(\d+)\s*([A-Z]{2,})?$"
    ).unwrap();

    pub static ref AREA_SECTION: Regex = Regex::new(
        r"^Area:\s*(.+)$"
    ).unwrap();

    // "SLH2410025: Tauranga Intermediate School Block D"
    pub static ref JOB_LINE: Regex = Regex::new(
        r"^([A-Z0-9]+)\s*:\s*(.+)$"
    ).unwrap();

    pub static ref JOB_CODE: Regex = Regex::new(
        r"^[A-Z]{2,}[0-9]+"
    ).unwrap();

    pub static ref CODE_PREFIX: Regex = Regex::new(
        r"^[A-Z0-9\-/\.]+\s+"
    ).unwrap();

    pub static ref NOTE_VOCABULARY: Regex = Regex::new(
        r"(?i)(supplied|manufacturer|grab rail|mm|track|gear|lock)"
    ).unwrap();

    pub static ref SLIDING: Regex = Regex::new(
        r"\bSliding\b"
    ).unwrap();
}

/// Whether a trimmed line is one of the literal column header lines.
pub fn is_column_header(line: &str) -> bool {
    COLUMN_HEADERS.contains(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_header_alternatives() {
        for line in [
            "D0.01 Accessible WC Timber",
            "D1.12 Plant Room Alum",
            "D0.07 Foyer Aluminium",
            "D2.01 Linen Cavity Slider",
            "D2.02 Study Sliding Timber",
        ] {
            assert!(DOOR_HEADER.is_match(line), "{line}");
        }
        assert!(!DOOR_HEADER.is_match("D0.01 Accessible WC"));
    }

    #[test]
    fn test_ara_door_codes() {
        assert!(ARA_DOOR_HEADER.is_match("8.C.ED-02 Block C - 2B-T08-S Entry Alum-Ext"));
        assert!(ARA_DOOR_HEADER.is_match("001.D001A Level 00 Entry Timber"));
        assert!(ARA_DOOR_HEADER.is_match("D005A Level 01 Bathroom Aluminium"));
        assert!(!ARA_DOOR_HEADER.is_match("8456-MSB NIDO Privacy Set 1"));
    }

    #[test]
    fn test_column_headers() {
        assert!(is_column_header("Code Description Product"));
        assert!(is_column_header("Door Area Description Rating Handing Door Type"));
        assert!(!is_column_header("Code"));
    }

    #[test]
    fn test_note_vocabulary_is_case_insensitive() {
        assert!(NOTE_VOCABULARY.is_match("Door SUPPLIED by others"));
        assert!(NOTE_VOCABULARY.is_match("Fit Grab Rail at 900"));
        assert!(!NOTE_VOCABULARY.is_match("Paint both faces"));
    }
}
