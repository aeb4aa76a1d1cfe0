//! Tests for spectral filtering
//!
//! Fixtures are small hand-built sweeps so every removed index can be checked
//! by hand.


use crate::app::models::{Dataset, EisPoint, MeasurementSeries};
use std::collections::BTreeMap;

/// Build a series from `(z_real, z_imag)` pairs; frequencies count down from 1 kHz
pub fn create_test_series(values: &[(f64, f64)]) -> MeasurementSeries {
    let points = values
        .iter()
        .enumerate()
        .map(|(i, &(re, im))| EisPoint::new(1000.0 / (i as f64 + 1.0), re, im))
        .collect();
    let mut metadata = BTreeMap::new();
    metadata.insert("Comment".to_string(), "fixture".to_string());
    MeasurementSeries::new(points, metadata)
}

/// A smooth sweep along the real axis with a glitch at index 2
pub fn create_spiked_series() -> MeasurementSeries {
    create_test_series(&[(1.0, 0.0), (2.0, 0.0), (50.0, 50.0), (4.0, 0.0), (5.0, 0.0)])
}

/// Dataset with one entry per `(label, series)` pair
pub fn create_test_dataset(entries: Vec<(&str, MeasurementSeries)>) -> Dataset {
    entries
        .into_iter()
        .map(|(label, series)| (label.to_string(), series))
        .collect()
}
