//! Batch extraction command for multiple schedule files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use doorsched_core::models::config::DoorschedConfig;
use doorsched_core::models::schedule::{Dataset, Dialect};
use doorsched_core::report::export_stem;
use doorsched_core::schedule::DialectEngine;

use super::output::{OutputFormat, format_dataset};
use super::{load_config, read_pages};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Schedule dialect (standard, ara, supreme)
    #[arg(short, long)]
    dialect: Option<Dialect>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of extracting a single file.
struct FileResult {
    path: PathBuf,
    dataset: Option<Dataset>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(dialect) = args.dialect {
        config.extraction.dialect = dialect;
    }
    let config = Arc::new(config);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to extract",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Each file gets its own engine on a blocking worker, at most `jobs` at once
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let permit = semaphore.clone().acquire_owned().await?;
        let config = Arc::clone(&config);
        handles.push(tokio::task::spawn_blocking(move || {
            let file_start = Instant::now();
            let result = extract_file(&path, &config);
            drop(permit);

            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            match result {
                Ok(dataset) => FileResult {
                    path,
                    dataset: Some(dataset),
                    error: None,
                    processing_time_ms,
                },
                Err(e) => FileResult {
                    path,
                    dataset: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                },
            }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await?;
        overall_pb.inc(1);

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to extract {}: {}", result.path.display(), error_msg);
            } else {
                overall_pb.abandon();
                error!("Failed to extract {}: {}", result.path.display(), error_msg);
                anyhow::bail!("Extraction failed: {}", error_msg);
            }
        }
        debug!(
            "Extracted {} in {}ms",
            result.path.display(),
            result.processing_time_ms
        );
        results.push(result);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.dataset.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    // Write outputs
    if let Some(output_dir) = &args.output_dir {
        let format = args
            .format
            .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));
        let mut used_stems = HashSet::new();

        for result in &successful {
            if let Some(dataset) = &result.dataset {
                let stem = output_stem(dataset, &result.path, &mut used_stems);
                let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));
                let content = format_dataset(dataset, format, config.output.include_summary)?;

                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Extracted {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn extract_file(path: &Path, config: &DoorschedConfig) -> anyhow::Result<Dataset> {
    let pages = read_pages(path, config)?;
    let engine = DialectEngine::from_config(&config.extraction);
    let result = engine.run(&pages);

    for warning in &result.warnings {
        debug!("{}: {}", path.display(), warning);
    }

    result.dataset.require_rows()?;
    Ok(result.dataset)
}

/// Output file stem, unique within one batch run.
///
/// Documents without distinct job metadata fall back to the input file
/// name, then to a numeric suffix.
fn output_stem(dataset: &Dataset, path: &Path, used: &mut HashSet<String>) -> String {
    let stem = export_stem(dataset);
    if used.insert(stem.clone()) {
        return stem;
    }

    let file_stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("schedule");
    let base = format!("{}_{}", stem, file_stem);

    let mut candidate = base.clone();
    let mut suffix = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}_{}", base, suffix);
        suffix += 1;
    }
    candidate
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "rows", "doors", "job", "error"])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(dataset) = &result.dataset {
            let job = dataset
                .job
                .as_ref()
                .map(|j| j.number.clone())
                .unwrap_or_default();
            wtr.write_record([
                filename,
                "success",
                &dataset.len().to_string(),
                &dataset.door_count().to_string(),
                &job,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_stem_never_repeats() {
        let dataset = Dataset::empty(Dialect::Standard);
        let mut used = HashSet::new();

        let stems: Vec<String> = ["a/x.txt", "b/x.txt", "c/x.txt", "d/x.txt"]
            .iter()
            .map(|p| output_stem(&dataset, Path::new(p), &mut used))
            .collect();

        assert_eq!(
            stems,
            vec![
                "door_hardware_schedule",
                "door_hardware_schedule_x",
                "door_hardware_schedule_x_2",
                "door_hardware_schedule_x_3",
            ]
        );
    }
}
