//! Process command: load, rename and filter every export

use crate::app::services::eis_reader::LoadStats;
use crate::app::services::pipeline::{PipelineStats, PreprocessResult, Preprocessor};
use crate::app::services::renamer::RenameRecord;
use crate::app::services::spectral_filter::FilterReport;
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::cli::commands::shared::{
    load_configuration, load_dataset, log_configuration, setup_logging,
};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use indicatif::HumanDuration;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Machine-readable outcome of a process run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub load: LoadStats,
    pub pipeline: PipelineStats,
    pub processing_time_seconds: f64,
    pub renames: Vec<RenameRecord>,
    pub filters: Vec<FilterReport>,
    pub series: Vec<SeriesRow>,
    pub output_path: Option<PathBuf>,
}

/// Per-series point accounting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub label: String,
    pub points_before: usize,
    pub removed_negative_real: usize,
    pub removed_outliers: usize,
    pub points_after: usize,
}

impl ProcessReport {
    /// Build the report for a finished run
    pub fn new(load: LoadStats, result: &PreprocessResult, output_path: Option<PathBuf>) -> Self {
        let removed = |filter: &str, label: &str| {
            result
                .filter_reports
                .iter()
                .filter(|report| report.filter == filter)
                .filter_map(|report| report.for_label(label))
                .map(|entry| entry.removed)
                .sum::<usize>()
        };

        let series = result
            .dataset
            .iter()
            .map(|(label, series)| {
                let removed_negative_real = removed("negative-real", label);
                let removed_outliers = removed("single-point-outlier", label);
                SeriesRow {
                    label: label.to_string(),
                    points_before: series.len() + removed_negative_real + removed_outliers,
                    removed_negative_real,
                    removed_outliers,
                    points_after: series.len(),
                }
            })
            .collect();

        Self {
            load,
            pipeline: result.stats.clone(),
            processing_time_seconds: result.stats.processing_time.as_secs_f64(),
            renames: result.renames.clone(),
            filters: result.filter_reports.clone(),
            series,
            output_path,
        }
    }
}

/// Run the process command
pub async fn run_process(args: ProcessArgs) -> Result<ProcessReport> {
    args.validate()?;

    let mut config = load_configuration(&args.input)?;
    apply_filter_overrides(&mut config, &args);
    config.validate()?;

    setup_logging(&args.verbosity, &config)?;
    log_configuration(&args.input, &config);

    let show_progress =
        args.verbosity.show_progress() && args.output_format == OutputFormat::Human;
    let loaded = load_dataset(&config, show_progress).await?;

    let result = Preprocessor::from_config(&config).process(loaded.dataset)?;

    if let Some(path) = &args.output_path {
        write_dataset(path, &result)?;
        info!("Wrote processed dataset to {}", path.display());
    }

    let report = ProcessReport::new(loaded.stats, &result, args.output_path.clone());
    generate_final_report(args.output_format, &report)?;
    Ok(report)
}

/// Apply filter flags from the command line
pub fn apply_filter_overrides(config: &mut Config, args: &ProcessArgs) {
    if let Some(tolerance) = args.outlier_tolerance {
        config.filtering.outlier_tolerance = tolerance;
    }
    if args.keep_negative_real {
        config.filtering.drop_negative_real = false;
    }
    if args.keep_outliers {
        config.filtering.drop_outliers = false;
    }
}

/// Write the processed dataset as pretty JSON keyed by canonical label
fn write_dataset(path: &Path, result: &PreprocessResult) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &result.dataset).map_err(|e| {
        Error::serialization(format!("Failed to write {}", path.display()), e)
    })
}

/// Generate final processing report
fn generate_final_report(format: OutputFormat, report: &ProcessReport) -> Result<()> {
    match format {
        OutputFormat::Human => generate_human_report(report),
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Csv => generate_csv_report(report),
    }
}

/// Generate human-readable report
fn generate_human_report(report: &ProcessReport) -> Result<()> {
    let stats = &report.pipeline;

    println!("\n{}", "EIS Preprocessing Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(stats.processing_time).to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files loaded:".bright_cyan(),
        report.load.files_loaded.to_string().bright_white()
    );
    if report.load.parse.rows_skipped > 0 {
        println!(
            "  {} {}",
            "Rows skipped:".bright_red(),
            report.load.parse.rows_skipped.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {} ({} renamed)",
        "Series:".bright_cyan(),
        stats.series.to_string().bright_white().bold(),
        stats.labels_changed
    );
    println!(
        "  {} {} -> {} ({:.1}% kept)",
        "Points:".bright_cyan(),
        stats.points_in.to_string().bright_white(),
        stats.points_out.to_string().bright_white().bold(),
        stats.retention_rate()
    );
    println!(
        "  {} {} non-positive real, {} outliers",
        "Removed:".bright_cyan(),
        stats.removed_negative_real,
        stats.removed_outliers
    );

    let renamed: Vec<&RenameRecord> = report.renames.iter().filter(|r| !r.is_unchanged()).collect();
    if !renamed.is_empty() {
        println!("\n{}", "Renamed labels".bright_green().bold());
        for record in renamed {
            println!("  {} -> {}", record.old.bright_yellow(), record.new.bright_white());
        }
    }

    let filtered: Vec<&SeriesRow> = report
        .series
        .iter()
        .filter(|row| row.points_after < row.points_before)
        .collect();
    if !filtered.is_empty() {
        println!("\n{}", "Filtered series".bright_green().bold());
        for row in filtered {
            println!(
                "  {}: {} -> {} points",
                row.label,
                row.points_before,
                row.points_after.to_string().bright_white()
            );
        }
    }

    if let Some(path) = &report.output_path {
        println!("\n  {} {}", "Output:".bright_cyan(), path.display());
    }

    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(report: &ProcessReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| Error::serialization("Failed to render JSON report", e))?;
    println!("{}", json);
    Ok(())
}

/// Generate CSV report with one row per series
fn generate_csv_report(report: &ProcessReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in &report.series {
        writer
            .serialize(row)
            .map_err(|e| Error::io("Failed to write CSV report", e.into()))?;
    }
    writer
        .flush()
        .map_err(|e| Error::io("Failed to write CSV report", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Dataset, EisPoint, MeasurementSeries};

    fn processed() -> PreprocessResult {
        let points = [(-1.0, 0.0), (1.0, 0.0), (2.0, 0.0), (50.0, 50.0), (4.0, 0.0), (5.0, 0.0)]
            .iter()
            .enumerate()
            .map(|(i, &(re, im))| EisPoint::new(1000.0 / (i as f64 + 1.0), re, im))
            .collect();
        let dataset: Dataset = [(
            "A01_RT".to_string(),
            MeasurementSeries::new(points, Default::default()),
        )]
        .into_iter()
        .collect();
        Preprocessor::default().process(dataset).unwrap()
    }

    #[test]
    fn test_report_series_rows() {
        let report = ProcessReport::new(LoadStats::default(), &processed(), None);

        assert_eq!(
            report.series,
            vec![SeriesRow {
                label: "UCT_AST9AH_A01_RT1".to_string(),
                points_before: 6,
                removed_negative_real: 1,
                removed_outliers: 1,
                points_after: 4,
            }]
        );
        assert_eq!(report.renames.len(), 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = ProcessReport::new(LoadStats::default(), &processed(), None);

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["pipeline"]["points_out"], 4);
        assert_eq!(json["renames"][0]["new"], "UCT_AST9AH_A01_RT1");
        assert_eq!(json["filters"][1]["filter"], "single-point-outlier");
    }

    #[test]
    fn test_apply_filter_overrides() {
        use clap::Parser;
        let args = crate::cli::args::Args::try_parse_from([
            "eis-preprocessor",
            "process",
            "--keep-outliers",
            "--outlier-tolerance",
            "4",
        ])
        .unwrap();
        let Some(crate::cli::args::Commands::Process(args)) = args.command else {
            panic!("expected process command");
        };

        let mut config = Config::default();
        apply_filter_overrides(&mut config, &args);

        assert!(config.filtering.drop_negative_real);
        assert!(!config.filtering.drop_outliers);
        assert_eq!(config.filtering.outlier_tolerance, 4.0);
    }

    #[test]
    fn test_write_dataset() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        write_dataset(&path, &processed()).unwrap();

        let written: Dataset =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.get("UCT_AST9AH_A01_RT1").unwrap().len(), 4);
    }
}
