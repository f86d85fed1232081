//! Rendering of extracted datasets.

use serde::Serialize;

use doorsched_core::models::schedule::Dataset;
use doorsched_core::report::ScheduleSummary;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output with the dialect's column headers
    Csv,
    /// Plain text listing
    Text,
}

impl OutputFormat {
    /// Resolve the configured default, falling back to JSON.
    pub fn from_config(name: &str) -> Self {
        <Self as clap::ValueEnum>::from_str(name, true).unwrap_or(Self::Json)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    dataset: &'a Dataset,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ScheduleSummary>,
}

pub fn format_dataset(
    dataset: &Dataset,
    format: OutputFormat,
    include_summary: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let output = JsonOutput {
                dataset,
                summary: include_summary.then(|| ScheduleSummary::new(dataset)),
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Csv => format_csv(dataset),
        OutputFormat::Text => Ok(format_text(dataset, include_summary)),
    }
}

fn format_csv(dataset: &Dataset) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(dataset.dialect.headers())?;
    for record in dataset.records() {
        wtr.write_record(&record)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(dataset: &Dataset, include_summary: bool) -> String {
    let mut output = String::new();

    if let Some(job) = &dataset.job {
        output.push_str(&format!("Job: {} {}\n", job.number, job.name));
    }
    output.push_str(&format!("Dialect: {}\n", dataset.dialect));
    output.push_str(&format!(
        "Rows: {} ({} doors)\n",
        dataset.len(),
        dataset.door_count()
    ));
    output.push('\n');

    let mut current_door: Option<&str> = None;
    for row in &dataset.rows {
        if current_door != Some(row.door.as_str()) {
            output.push_str(&format!(
                "{} {} [{}] {}\n",
                row.door, row.description, row.area, row.door_type
            ));
            if !row.notes.is_empty() {
                output.push_str(&format!("  Notes: {}\n", row.notes));
            }
            current_door = Some(row.door.as_str());
        }
        output.push_str(&format!(
            "  {:>4} x {} {} {}\n",
            row.quantity, row.code, row.product_description, row.finish
        ));
    }

    if include_summary {
        output.push('\n');
        output.push_str(&format_summary(&ScheduleSummary::new(dataset)));
    }

    output
}

fn format_summary(summary: &ScheduleSummary) -> String {
    let mut output = String::new();

    output.push_str("Doors by type:\n");
    for count in &summary.doors_by_type {
        output.push_str(&format!("  {:<24} {}\n", count.key, count.doors));
    }

    output.push_str("Doors by area:\n");
    for count in &summary.doors_by_area {
        output.push_str(&format!("  {:<24} {}\n", count.key, count.doors));
    }

    output.push_str("Product totals:\n");
    for total in &summary.product_totals {
        output.push_str(&format!(
            "  {:>5} x {} {} {}\n",
            total.total_quantity, total.code, total.description, total.finish
        ));
    }

    output
}
