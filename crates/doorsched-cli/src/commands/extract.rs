//! Extract command - read a single schedule file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use doorsched_core::models::schedule::Dialect;
use doorsched_core::report::{DatasetFilter, search};
use doorsched_core::schedule::DialectEngine;

use super::output::{OutputFormat, format_dataset};
use super::{load_config, read_pages};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Schedule dialect (standard, ara, supreme)
    #[arg(short, long)]
    dialect: Option<Dialect>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Only keep rows for this door
    #[arg(long)]
    door: Option<String>,

    /// Only keep rows in this area
    #[arg(long)]
    area: Option<String>,

    /// Only keep rows with this door type
    #[arg(long)]
    door_type: Option<String>,

    /// Only keep rows with this door description
    #[arg(long)]
    description: Option<String>,

    /// Only keep products whose code or description contains this text
    #[arg(long)]
    search: Option<String>,

    /// Only scan pages containing this text
    #[arg(long)]
    page_marker: Option<String>,

    /// Include summary tables
    #[arg(long)]
    summary: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(dialect) = args.dialect {
        config.extraction.dialect = dialect;
    }
    if args.page_marker.is_some() {
        config.extraction.page_marker = args.page_marker.clone();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!(
        "Extracting {} ({} dialect)",
        args.input.display(),
        config.extraction.dialect
    );

    let pages = read_pages(&args.input, &config)?;
    let engine = DialectEngine::from_config(&config.extraction);
    let result = engine.run(&pages);

    for warning in &result.warnings {
        warn!("{}", warning);
    }
    debug!("Extraction stats: {:?}", result.stats);

    let filter = DatasetFilter {
        door: args.door.clone(),
        area: args.area.clone(),
        door_type: args.door_type.clone(),
        description: args.description.clone(),
    };
    let mut dataset = if filter.is_empty() {
        result.dataset
    } else {
        filter.apply(&result.dataset)
    };

    if let Some(term) = &args.search {
        let rows = search(&dataset, term).into_iter().cloned().collect();
        dataset.rows = rows;
    }

    if dataset.is_empty() {
        anyhow::bail!("No data extracted from {}", args.input.display());
    }

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));
    let include_summary = args.summary || config.output.include_summary;
    let output = format_dataset(&dataset, format, include_summary)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Wrote {} rows for {} doors to {}",
            style("✓").green(),
            dataset.len(),
            dataset.door_count(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
