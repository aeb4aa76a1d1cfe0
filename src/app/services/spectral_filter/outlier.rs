//! Single-point outlier removal
//!
//! A sensor glitch shows up as one sample far away from an otherwise smooth
//! Nyquist curve. With `Z[i] = z_real[i] + j*z_imag[i]`:
//!
//! ```text
//! d1[i] = |Z[i] - Z[i+1]|      one-step distance
//! d2[i] = |Z[i] - Z[i+2]|      two-step distance
//! ```
//!
//! Point `i+1` is kept when `d1[i] < tolerance * d2[i]`. A glitch at `i+1` has a
//! large `d1[i]` while `d2[i]` still follows the curve. The first point and the
//! last two points are boundary points and are always kept, as is any point
//! whose distances are undefined (NaN).

use super::{FilterReport, SpectralFilter};
use crate::app::models::{Dataset, MeasurementSeries};
use crate::constants::DEFAULT_OUTLIER_TOLERANCE;
use num_complex::Complex64;
use tracing::debug;

/// Keeps every point that is not a single-sample jump
#[derive(Debug, Clone, Copy)]
pub struct OutlierFilter {
    /// Ratio `d1 / d2` at or above which a point is dropped
    pub tolerance: f64,
}

impl OutlierFilter {
    /// Create a filter with a custom tolerance
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTLIER_TOLERANCE)
    }
}

impl SpectralFilter for OutlierFilter {
    fn name(&self) -> &'static str {
        "single-point-outlier"
    }

    fn keep_mask(&self, series: &MeasurementSeries) -> Vec<bool> {
        outlier_keep_mask(&series.impedances(), self.tolerance)
    }
}

/// Keep flags for a sequence of impedances in log order
pub fn outlier_keep_mask(impedances: &[Complex64], tolerance: f64) -> Vec<bool> {
    let n = impedances.len();
    let mut keep = vec![true; n];

    // Judge points 1..=n-3 from their predecessor
    for i in 0..n.saturating_sub(3) {
        let d1 = (impedances[i] - impedances[i + 1]).norm();
        let d2 = (impedances[i] - impedances[i + 2]).norm();
        if d1.is_nan() || d2.is_nan() {
            continue;
        }

        if d1 >= tolerance * d2 {
            debug!(
                "Outlier at index {}: d1={:.4} d2={:.4} tolerance={}",
                i + 1,
                d1,
                d2,
                tolerance
            );
            keep[i + 1] = false;
        }
    }

    keep
}

/// Drop single-sample glitches from every series with the default tolerance
pub fn filter_outliers(dataset: &Dataset) -> (Dataset, FilterReport) {
    OutlierFilter::default().apply(dataset)
}
