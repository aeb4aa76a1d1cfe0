//! Removal of points with non-positive real impedance
//!
//! A cell's real impedance is strictly positive in this measurement regime;
//! zero or negative readings come from inductive cabling artefacts at the high
//! frequency end of the sweep.

use super::{FilterReport, SpectralFilter};
use crate::app::models::{Dataset, MeasurementSeries};

/// Keeps points with `z_real > 0`
#[derive(Debug, Clone, Copy, Default)]
pub struct NegativeRealFilter;

impl SpectralFilter for NegativeRealFilter {
    fn name(&self) -> &'static str {
        "negative-real"
    }

    fn keep_mask(&self, series: &MeasurementSeries) -> Vec<bool> {
        // NaN compares false and is dropped with the non-positive readings
        series.points.iter().map(|p| p.z_real > 0.0).collect()
    }
}

/// Drop points with non-positive real impedance from every series
pub fn filter_negative_real(dataset: &Dataset) -> (Dataset, FilterReport) {
    NegativeRealFilter.apply(dataset)
}
