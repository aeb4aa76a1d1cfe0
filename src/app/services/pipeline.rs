//! Preprocessing pipeline orchestration
//!
//! Runs the stages in a fixed order on a resident dataset:
//!
//! 1. **Rename**: raw labels to canonical labels, failing on collisions
//! 2. **Negative-real filter**: drop points with `z_real <= 0`
//! 3. **Outlier filter**: drop single-sample glitches
//!
//! Filter stages can be switched off in [`FilteringConfig`]. Renaming always
//! runs, since every later consumer keys on canonical labels.

use crate::Result;
use crate::app::models::Dataset;
use crate::app::services::renamer::{RenameRecord, rename_all};
use crate::app::services::spectral_filter::{
    FilterReport, NegativeRealFilter, OutlierFilter, SpectralFilter,
};
use crate::config::{Config, FilteringConfig, LabelingConfig};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

/// Counts collected across one pipeline run
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    /// Series in the dataset
    pub series: usize,
    /// Labels that changed when renamed
    pub labels_changed: usize,
    pub points_in: usize,
    pub points_out: usize,
    pub removed_negative_real: usize,
    pub removed_outliers: usize,
    #[serde(skip)]
    pub processing_time: Duration,
}

impl PipelineStats {
    /// Share of input points kept, in percent
    pub fn retention_rate(&self) -> f64 {
        if self.points_in == 0 {
            0.0
        } else {
            (self.points_out as f64 / self.points_in as f64) * 100.0
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Preprocessed {} series ({} renamed): {} -> {} points ({:.1}% kept; {} non-positive real, {} outliers)",
            self.series,
            self.labels_changed,
            self.points_in,
            self.points_out,
            self.retention_rate(),
            self.removed_negative_real,
            self.removed_outliers
        )
    }
}

/// Output of one pipeline run
#[derive(Debug, Clone)]
pub struct PreprocessResult {
    /// Renamed and filtered dataset
    pub dataset: Dataset,
    /// One record per renamed entry
    pub renames: Vec<RenameRecord>,
    /// One report per filter that ran, in run order
    pub filter_reports: Vec<FilterReport>,
    pub stats: PipelineStats,
}

/// Runs rename and spectral filtering over a dataset
#[derive(Debug, Clone)]
pub struct Preprocessor {
    labeling: LabelingConfig,
    filtering: FilteringConfig,
}

impl Preprocessor {
    /// Create a preprocessor from label and filter settings
    pub fn new(labeling: LabelingConfig, filtering: FilteringConfig) -> Self {
        Self {
            labeling,
            filtering,
        }
    }

    /// Create a preprocessor from a full configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.labeling.clone(), config.filtering.clone())
    }

    /// Run every enabled stage
    pub fn process(&self, dataset: Dataset) -> Result<PreprocessResult> {
        let start = Instant::now();
        let mut stats = PipelineStats {
            series: dataset.len(),
            points_in: dataset.total_points(),
            ..Default::default()
        };

        info!(
            "Starting preprocessing of {} series ({} points)",
            stats.series, stats.points_in
        );

        let (mut dataset, renames) = rename_all(dataset, &self.labeling.canonical_prefix)?;
        stats.labels_changed = renames.iter().filter(|r| !r.is_unchanged()).count();

        let mut filter_reports = Vec::new();

        if self.filtering.drop_negative_real {
            let (filtered, report) = NegativeRealFilter.apply(&dataset);
            stats.removed_negative_real = report.total_removed();
            info!("{}", report.summary());
            filter_reports.push(report);
            dataset = filtered;
        }

        if self.filtering.drop_outliers {
            let (filtered, report) =
                OutlierFilter::new(self.filtering.outlier_tolerance).apply(&dataset);
            stats.removed_outliers = report.total_removed();
            info!("{}", report.summary());
            filter_reports.push(report);
            dataset = filtered;
        }

        stats.points_out = dataset.total_points();
        stats.processing_time = start.elapsed();
        info!("{}", stats.summary());

        Ok(PreprocessResult {
            dataset,
            renames,
            filter_reports,
            stats,
        })
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
