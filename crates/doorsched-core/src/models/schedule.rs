//! Door hardware schedule data models.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Layout convention of a hardware schedule document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `D0.01 Description Timber` door headers, `CODE QTY Description FINISH` products.
    #[default]
    Standard,
    /// Block/villa door codes with area, handing and notes columns.
    Ara,
    /// `Area:` sections, job header on the first page, finish after quantity.
    Supreme,
}

impl Dialect {
    /// All supported dialects.
    pub const ALL: [Dialect; 3] = [Dialect::Standard, Dialect::Ara, Dialect::Supreme];

    /// Lowercase name used in configs and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Standard => "standard",
            Dialect::Ara => "ara",
            Dialect::Supreme => "supreme",
        }
    }

    /// Output columns for this dialect, in order.
    pub fn columns(&self) -> &'static [Column] {
        match self {
            Dialect::Standard => &[
                Column::Door,
                Column::Description,
                Column::DoorType,
                Column::Code,
                Column::Quantity,
                Column::ProductDescription,
                Column::Finish,
            ],
            Dialect::Ara => &[
                Column::Door,
                Column::Area,
                Column::Description,
                Column::Rating,
                Column::Handing,
                Column::DoorType,
                Column::Notes,
                Column::Code,
                Column::ProductDescription,
                Column::Quantity,
            ],
            Dialect::Supreme => &[
                Column::Door,
                Column::Area,
                Column::Description,
                Column::DoorType,
                Column::Notes,
                Column::Code,
                Column::ProductDescription,
                Column::Quantity,
                Column::Finish,
            ],
        }
    }

    /// Header names for this dialect's columns.
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.header(*self)).collect()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "std" => Ok(Dialect::Standard),
            "ara" => Ok(Dialect::Ara),
            "supreme" => Ok(Dialect::Supreme),
            other => Err(ExtractionError::UnknownDialect(other.to_string())),
        }
    }
}

/// A column of the denormalized output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Door,
    Area,
    Description,
    Rating,
    Handing,
    DoorType,
    Notes,
    Code,
    ProductDescription,
    Quantity,
    Finish,
}

impl Column {
    /// Header text as it appears in the given dialect's schedules.
    pub fn header(&self, dialect: Dialect) -> &'static str {
        match (self, dialect) {
            (Column::Door, _) => "Door",
            (Column::Area, _) => "Area",
            (Column::Description, _) => "Description",
            (Column::Rating, _) => "Rating",
            (Column::Handing, _) => "Handing",
            (Column::DoorType, Dialect::Standard) => "Dr type",
            (Column::DoorType, _) => "Door Type",
            (Column::Notes, _) => "Notes",
            (Column::Code, _) => "Code",
            (Column::ProductDescription, Dialect::Standard) => "Description Product",
            (Column::ProductDescription, _) => "Product Description",
            (Column::Quantity, Dialect::Standard) => "Quantity Product",
            (Column::Quantity, _) => "Quantity",
            (Column::Finish, _) => "Finish",
        }
    }
}

/// A single source line with its location in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Raw line text.
    pub text: String,
    /// Page index (0-based).
    pub page: usize,
    /// Line position within the page (0-based).
    pub position: usize,
}

impl Line {
    pub fn new(text: impl Into<String>, page: usize, position: usize) -> Self {
        Self {
            text: text.into(),
            page,
            position,
        }
    }
}

/// Document-level job metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    /// Job code, e.g. `SLH2410025`.
    pub number: String,
    /// Free-text job name.
    pub name: String,
}

/// A door and its attributes as declared by a door header line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorRecord {
    /// Door code, e.g. `D0.01` or `8.C.ID-04`.
    pub door: String,
    pub area: String,
    pub description: String,
    pub door_type: String,
    pub handing: String,
    pub rating: String,
    pub notes: String,
}

/// One hardware item attributed to a door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    /// Code of the door this product belongs to (join key).
    pub door: String,
    pub code: String,
    pub description: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
}

/// A product line joined with the door attributes current when it was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub door: String,
    pub area: String,
    pub description: String,
    pub rating: String,
    pub handing: String,
    pub door_type: String,
    pub notes: String,
    pub code: String,
    pub product_description: String,
    pub quantity: u32,
    pub finish: String,
}

impl ScheduleRow {
    /// Join a product with a snapshot of its door.
    pub fn join(door: &DoorRecord, product: ProductLine) -> Self {
        Self {
            door: door.door.clone(),
            area: door.area.clone(),
            description: door.description.clone(),
            rating: door.rating.clone(),
            handing: door.handing.clone(),
            door_type: door.door_type.clone(),
            notes: door.notes.clone(),
            code: product.code,
            product_description: product.description,
            quantity: product.quantity,
            finish: product.finish.unwrap_or_default(),
        }
    }

    /// Cell value for a column.
    pub fn value(&self, column: Column) -> String {
        match column {
            Column::Door => self.door.clone(),
            Column::Area => self.area.clone(),
            Column::Description => self.description.clone(),
            Column::Rating => self.rating.clone(),
            Column::Handing => self.handing.clone(),
            Column::DoorType => self.door_type.clone(),
            Column::Notes => self.notes.clone(),
            Column::Code => self.code.clone(),
            Column::ProductDescription => self.product_description.clone(),
            Column::Quantity => self.quantity.to_string(),
            Column::Finish => self.finish.clone(),
        }
    }
}

/// Ordered rows extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dialect the document was read with.
    pub dialect: Dialect,

    /// Job metadata, if the dialect carries it and it was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<JobInfo>,

    /// Rows in order of encounter.
    pub rows: Vec<ScheduleRow>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn empty(dialect: Dialect) -> Self {
        Self {
            dialect,
            job: None,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct door codes.
    pub fn door_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.door.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Columns of this dataset's dialect.
    pub fn columns(&self) -> &'static [Column] {
        self.dialect.columns()
    }

    /// Rows rendered as string cells in column order.
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        let columns = self.columns();
        self.rows
            .iter()
            .map(move |row| columns.iter().map(|c| row.value(*c)).collect())
    }

    /// Fail with [`ExtractionError::NoData`] when nothing was extracted.
    pub fn require_rows(&self) -> Result<&Self, ExtractionError> {
        if self.is_empty() {
            Err(ExtractionError::NoData)
        } else {
            Ok(self)
        }
    }
}
