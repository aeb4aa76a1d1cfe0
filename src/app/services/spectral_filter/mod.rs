//! Spectral filtering for EIS sweeps
//!
//! This module removes points that cannot belong to a valid sweep. Every filter
//! borrows its input dataset and builds a new one, so the caller's series are
//! never modified and the raw data stays available for comparison plots.
//!
//! # Filters
//!
//! - [`negative_real`] - drops points whose real impedance is not positive
//! - [`outlier`] - drops single-sample glitches by comparing one-step and
//!   two-step distances in the complex plane
//!
//! Filters share the [`SpectralFilter`] trait: a filter only decides which
//! points of a series to keep, and the trait applies that decision across a
//! dataset while recording what was removed.

pub mod negative_real;
pub mod outlier;
pub mod report;

#[cfg(test)]
pub mod tests;

pub use negative_real::{NegativeRealFilter, filter_negative_real};
pub use outlier::{OutlierFilter, filter_outliers, outlier_keep_mask};
pub use report::{FilterReport, SeriesFilterReport};

use crate::app::models::{Dataset, MeasurementSeries};

/// Order-preserving point filter over a single sweep
pub trait SpectralFilter {
    /// Name used in reports and logs
    fn name(&self) -> &'static str;

    /// One flag per point, `true` to keep the point
    fn keep_mask(&self, series: &MeasurementSeries) -> Vec<bool>;

    /// Filter one series, returning the new series and its removal record
    fn apply_series(
        &self,
        label: &str,
        series: &MeasurementSeries,
    ) -> (MeasurementSeries, SeriesFilterReport) {
        let mask = self.keep_mask(series);
        debug_assert_eq!(mask.len(), series.len());

        let mut kept = Vec::with_capacity(series.len());
        let mut removed_frequencies = Vec::new();
        for (point, keep) in series.points.iter().zip(mask) {
            if keep {
                kept.push(point.clone());
            } else {
                removed_frequencies.push(point.frequency);
            }
        }

        let report = SeriesFilterReport {
            label: label.to_string(),
            points_before: series.len(),
            removed: removed_frequencies.len(),
            removed_frequencies,
        };
        (series.with_points(kept), report)
    }

    /// Filter every series of a dataset
    fn apply(&self, dataset: &Dataset) -> (Dataset, FilterReport) {
        let mut report = FilterReport::new(self.name());
        let mut filtered = Dataset::new();

        for (label, series) in dataset.iter() {
            let (series, entry) = self.apply_series(label, series);
            report.series.push(entry);
            filtered.insert(label, series);
        }

        report.log();
        (filtered, report)
    }
}
