//! Scan state carried across the lines of one document.

use crate::models::schedule::{DoorRecord, ProductLine, ScheduleRow};

use super::rules::DoorHeader;

/// Current door, area and notes while scanning a document.
///
/// One context belongs to exactly one extraction call.
#[derive(Debug, Clone, Default)]
pub struct ExtractionContext {
    door: Option<DoorRecord>,
    area: String,
}

impl ExtractionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The door product lines are currently attributed to.
    pub fn active_door(&self) -> Option<&DoorRecord> {
        self.door.as_ref()
    }

    pub fn has_door(&self) -> bool {
        self.door.is_some()
    }

    /// Area set by the most recent section or door header.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Replace the active door. Notes start empty.
    pub fn enter_door(&mut self, header: DoorHeader) {
        if let Some(area) = header.area {
            self.area = area;
        }

        self.door = Some(DoorRecord {
            door: header.door,
            area: self.area.clone(),
            description: header.description,
            door_type: header.door_type,
            handing: header.handing,
            rating: header.rating,
            notes: String::new(),
        });
    }

    /// Switch area without touching the door identity.
    pub fn enter_section(&mut self, area: String) {
        if let Some(door) = self.door.as_mut() {
            door.area = area.clone();
        }
        self.area = area;
    }

    /// Append a note to the active door, space separated.
    ///
    /// Returns `false` when no door is active.
    pub fn append_note(&mut self, note: &str) -> bool {
        let Some(door) = self.door.as_mut() else {
            return false;
        };

        if !door.notes.is_empty() {
            door.notes.push(' ');
        }
        door.notes.push_str(note);
        true
    }

    /// Join a product with a snapshot of the active door.
    ///
    /// Returns `None` when no door is active.
    pub fn emit(
        &self,
        code: String,
        description: String,
        quantity: u32,
        finish: Option<String>,
    ) -> Option<ScheduleRow> {
        let door = self.door.as_ref()?;
        let product = ProductLine {
            door: door.door.clone(),
            code,
            description,
            quantity,
            finish,
        };
        Some(ScheduleRow::join(door, product))
    }
}
