//! Line classification against a dialect grammar.

use tracing::debug;

use super::context::ExtractionContext;
use super::rules::patterns::is_column_header;
use super::rules::{DialectGrammar, DoorHeader, RuleKind};

/// Structural role of a line, with the fields captured for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// Introduces a new door.
    DoorHeader(DoorHeader),
    /// Switches the current area.
    SectionHeader(String),
    /// A hardware item with a parsed quantity.
    Product {
        code: String,
        description: String,
        quantity: u32,
        finish: Option<String>,
    },
    /// Free text attached to the active door.
    Note(String),
    /// Anything else, including column headers and dropped candidates.
    Noise,
}

/// Classify one line.
///
/// Blank lines and column headers are always noise. Otherwise the
/// grammar's rules are tried in precedence order and the first match wins.
/// Notes are only recognised while the context has an active door.
pub fn classify(
    line: &str,
    context: &ExtractionContext,
    grammar: &dyn DialectGrammar,
) -> ClassifiedLine {
    let line = line.trim();
    if line.is_empty() || is_column_header(line) {
        return ClassifiedLine::Noise;
    }

    for rule in grammar.precedence() {
        match rule {
            RuleKind::DoorHeader => {
                if let Some(header) = grammar.door_header(line) {
                    return ClassifiedLine::DoorHeader(header);
                }
            }
            RuleKind::SectionHeader => {
                if let Some(area) = grammar.section_header(line) {
                    return ClassifiedLine::SectionHeader(area);
                }
            }
            RuleKind::ProductLine => {
                if let Some(candidate) = grammar.product_line(line) {
                    return match candidate.quantity.parse::<u32>() {
                        Ok(quantity) => ClassifiedLine::Product {
                            code: candidate.code,
                            description: candidate.description,
                            quantity,
                            finish: candidate.finish,
                        },
                        Err(e) => {
                            debug!(
                                "Dropping product {} with quantity {:?}: {}",
                                candidate.code, candidate.quantity, e
                            );
                            ClassifiedLine::Noise
                        }
                    };
                }
            }
            RuleKind::Note => {
                if context.has_door() {
                    if let Some(note) = grammar.note(line) {
                        return ClassifiedLine::Note(note);
                    }
                }
            }
        }
    }

    ClassifiedLine::Noise
}
