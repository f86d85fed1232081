//! Read-only summaries over an extracted [`Dataset`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::schedule::{Dataset, Dialect, ScheduleRow};

/// Number of distinct doors sharing one attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoorCount {
    pub key: String,
    pub doors: usize,
}

/// Number of product rows recorded against a door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductsPerDoor {
    pub door: String,
    pub products: usize,
}

/// Total quantity of one product across the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductTotal {
    pub code: String,
    pub description: String,
    pub finish: String,
    pub total_quantity: u64,
}

/// Usage of one product within a door type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoorTypeItem {
    pub door_type: String,
    pub code: String,
    pub description: String,
    pub total_quantity: u64,
    /// Rows (door assignments) using the item.
    pub rows: usize,
}

/// All summary tables for a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSummary {
    pub rows: usize,
    pub doors: usize,
    pub doors_by_type: Vec<DoorCount>,
    pub doors_by_area: Vec<DoorCount>,
    pub doors_by_description: Vec<DoorCount>,
    pub products_per_door: Vec<ProductsPerDoor>,
    pub product_totals: Vec<ProductTotal>,
    pub items_by_door_type: Vec<DoorTypeItem>,
}

impl ScheduleSummary {
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            rows: dataset.len(),
            doors: dataset.door_count(),
            doors_by_type: doors_by(dataset, |r| &r.door_type),
            doors_by_area: doors_by(dataset, |r| &r.area),
            doors_by_description: doors_by(dataset, |r| &r.description),
            products_per_door: products_per_door(dataset),
            product_totals: product_totals(dataset),
            items_by_door_type: items_by_door_type(dataset),
        }
    }
}

/// Count distinct doors per attribute value, largest groups first.
pub fn doors_by<F>(dataset: &Dataset, key: F) -> Vec<DoorCount>
where
    F: Fn(&ScheduleRow) -> &String,
{
    let mut groups: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for row in &dataset.rows {
        groups
            .entry(key(row).as_str())
            .or_default()
            .insert(row.door.as_str());
    }

    let mut counts: Vec<DoorCount> = groups
        .into_iter()
        .map(|(k, doors)| DoorCount {
            key: k.to_string(),
            doors: doors.len(),
        })
        .collect();
    counts.sort_by(|a, b| b.doors.cmp(&a.doors).then_with(|| a.key.cmp(&b.key)));
    counts
}

/// Product rows per door, in door order.
pub fn products_per_door(dataset: &Dataset) -> Vec<ProductsPerDoor> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in &dataset.rows {
        *counts.entry(row.door.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(door, products)| ProductsPerDoor {
            door: door.to_string(),
            products,
        })
        .collect()
}

/// Quantity totals per (code, description, finish), largest first.
pub fn product_totals(dataset: &Dataset) -> Vec<ProductTotal> {
    let mut totals: BTreeMap<(&str, &str, &str), u64> = BTreeMap::new();
    for row in &dataset.rows {
        let key = (
            row.code.as_str(),
            row.product_description.as_str(),
            row.finish.as_str(),
        );
        *totals.entry(key).or_default() += u64::from(row.quantity);
    }

    let mut totals: Vec<ProductTotal> = totals
        .into_iter()
        .map(|((code, description, finish), total_quantity)| ProductTotal {
            code: code.to_string(),
            description: description.to_string(),
            finish: finish.to_string(),
            total_quantity,
        })
        .collect();
    totals.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    totals
}

/// Item usage grouped by door type; within a type, largest totals first.
pub fn items_by_door_type(dataset: &Dataset) -> Vec<DoorTypeItem> {
    let mut groups: BTreeMap<(&str, &str, &str), (u64, usize)> = BTreeMap::new();
    for row in &dataset.rows {
        let key = (
            row.door_type.as_str(),
            row.code.as_str(),
            row.product_description.as_str(),
        );
        let entry = groups.entry(key).or_default();
        entry.0 += u64::from(row.quantity);
        entry.1 += 1;
    }

    let mut items: Vec<DoorTypeItem> = groups
        .into_iter()
        .map(|((door_type, code, description), (total_quantity, rows))| DoorTypeItem {
            door_type: door_type.to_string(),
            code: code.to_string(),
            description: description.to_string(),
            total_quantity,
            rows,
        })
        .collect();
    items.sort_by(|a, b| {
        a.door_type
            .cmp(&b.door_type)
            .then_with(|| b.total_quantity.cmp(&a.total_quantity))
    });
    items
}

/// Rows whose code or product description contains `term`, ignoring case.
pub fn search<'a>(dataset: &'a Dataset, term: &str) -> Vec<&'a ScheduleRow> {
    let term = term.to_lowercase();
    dataset
        .rows
        .iter()
        .filter(|r| {
            r.code.to_lowercase().contains(&term)
                || r.product_description.to_lowercase().contains(&term)
        })
        .collect()
}

/// Exact-match row filter; unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct DatasetFilter {
    pub door: Option<String>,
    pub area: Option<String>,
    pub door_type: Option<String>,
    pub description: Option<String>,
}

impl DatasetFilter {
    pub fn is_empty(&self) -> bool {
        self.door.is_none()
            && self.area.is_none()
            && self.door_type.is_none()
            && self.description.is_none()
    }

    pub fn matches(&self, row: &ScheduleRow) -> bool {
        fn check(want: &Option<String>, have: &str) -> bool {
            want.as_deref().is_none_or(|w| w == have)
        }

        check(&self.door, &row.door)
            && check(&self.area, &row.area)
            && check(&self.door_type, &row.door_type)
            && check(&self.description, &row.description)
    }

    /// Copy of the dataset keeping only matching rows.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        Dataset {
            dialect: dataset.dialect,
            job: dataset.job.clone(),
            rows: dataset
                .rows
                .iter()
                .filter(|r| self.matches(r))
                .cloned()
                .collect(),
        }
    }
}

/// File stem for exports, derived from job metadata when present.
///
/// Job text comes from the document, so anything outside `[A-Za-z0-9_.-]`
/// becomes `_` and the stem never leaves the output directory.
pub fn export_stem(dataset: &Dataset) -> String {
    match &dataset.job {
        Some(job) if !job.name.is_empty() => {
            sanitize_stem(&format!("{}_{}", job.number, job.name))
        }
        Some(job) => sanitize_stem(&job.number),
        None => match dataset.dialect {
            Dialect::Standard => "door_hardware_schedule".to_string(),
            Dialect::Ara => "ara_hardware_schedule".to_string(),
            Dialect::Supreme => "supreme_hardware_schedule".to_string(),
        },
    }
}

fn sanitize_stem(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::JobInfo;
    use crate::schedule::{DialectEngine, ScheduleExtractor};
    use pretty_assertions::assert_eq;

    fn sample() -> Dataset {
        DialectEngine::new(Dialect::Supreme).extract_from_text(
            "Area: Ground Floor\n\
             D0.01 Accessible WC Timber\n\
             HG100 Hinge 3 SSS\n\
             LS200 Privacy latch 1 SSS\n\
             D0.02 Store Timber\n\
             HG100 Hinge 3 SSS\n\
             Area: Level 1\n\
             D1.01 Office Alum\n\
             HG100 Hinge 4 SSS\n",
        )
    }

    #[test]
    fn test_doors_by_type() {
        let counts = doors_by(&sample(), |r| &r.door_type);
        assert_eq!(
            counts,
            vec![
                DoorCount { key: "Timber".to_string(), doors: 2 },
                DoorCount { key: "Alum".to_string(), doors: 1 },
            ]
        );
    }

    #[test]
    fn test_product_totals() {
        let totals = product_totals(&sample());
        assert_eq!(totals[0].code, "HG100");
        assert_eq!(totals[0].total_quantity, 10);
        assert_eq!(totals[1].code, "LS200");
        assert_eq!(totals[1].total_quantity, 1);
    }

    #[test]
    fn test_items_by_door_type() {
        let items = items_by_door_type(&sample());
        let first = &items[0];
        assert_eq!(first.door_type, "Alum");
        assert_eq!(first.total_quantity, 4);

        let timber_hinge = items
            .iter()
            .find(|i| i.door_type == "Timber" && i.code == "HG100")
            .unwrap();
        assert_eq!(timber_hinge.total_quantity, 6);
        assert_eq!(timber_hinge.rows, 2);
    }

    #[test]
    fn test_products_per_door() {
        let per_door = products_per_door(&sample());
        assert_eq!(per_door.len(), 3);
        assert_eq!(per_door[0].door, "D0.01");
        assert_eq!(per_door[0].products, 2);
    }

    #[test]
    fn test_search_ignores_case() {
        let dataset = sample();
        assert_eq!(search(&dataset, "hinge").len(), 3);
        assert_eq!(search(&dataset, "ls2").len(), 1);
        assert!(search(&dataset, "closer").is_empty());
    }

    #[test]
    fn test_filter() {
        let dataset = sample();
        let filter = DatasetFilter {
            area: Some("Ground Floor".to_string()),
            ..Default::default()
        };
        let filtered = filter.apply(&dataset);
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered.door_count(), 2);
        assert!(DatasetFilter::default().is_empty());
        assert_eq!(DatasetFilter::default().apply(&dataset), dataset);
    }

    #[test]
    fn test_export_stem() {
        let mut dataset = Dataset::empty(Dialect::Supreme);
        assert_eq!(export_stem(&dataset), "supreme_hardware_schedule");

        dataset.job = Some(JobInfo {
            number: "SLH2410025".to_string(),
            name: "Tauranga Intermediate School".to_string(),
        });
        assert_eq!(export_stem(&dataset), "SLH2410025_Tauranga_Intermediate_School");
    }

    #[test]
    fn test_export_stem_strips_path_separators() {
        let mut dataset = Dataset::empty(Dialect::Supreme);
        dataset.job = Some(JobInfo {
            number: "SLH2410025".to_string(),
            name: "Block D/E Upgrade: Stage\\2".to_string(),
        });
        assert_eq!(export_stem(&dataset), "SLH2410025_Block_D_E_Upgrade__Stage_2");

        dataset.job = Some(JobInfo {
            number: "../SLH1".to_string(),
            name: String::new(),
        });
        assert_eq!(export_stem(&dataset), ".._SLH1");
    }

    #[test]
    fn test_summary_counts() {
        let summary = ScheduleSummary::new(&sample());
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.doors, 3);
        assert_eq!(summary.doors_by_area[0].key, "Ground Floor");
    }
}
