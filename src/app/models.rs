//! Data models for EIS preprocessing
//!
//! This module contains the core data structures for representing impedance sweeps
//! and labelled collections of sweeps.

use crate::constants::{LABEL_METADATA_KEY, METADATA_TIME_FORMATS};
use chrono::NaiveDateTime;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Measurement Point
// =============================================================================

/// One row of an EIS sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EisPoint {
    /// Measured excitation frequency in Hz
    pub frequency: f64,

    /// Real impedance component in mΩ
    pub z_real: f64,

    /// Imaginary impedance component in mΩ
    pub z_imag: f64,

    /// Auxiliary instrument channels, aligned with `MeasurementSeries::channel_names`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<f64>,
}

impl EisPoint {
    /// Create a point without auxiliary channels
    pub fn new(frequency: f64, z_real: f64, z_imag: f64) -> Self {
        Self {
            frequency,
            z_real,
            z_imag,
            channels: Vec::new(),
        }
    }

    /// Complex impedance `z_real + j*z_imag`
    pub fn impedance(&self) -> Complex64 {
        Complex64::new(self.z_real, self.z_imag)
    }
}

// =============================================================================
// Measurement Series
// =============================================================================

/// One EIS sweep in instrument log order, with its export metadata
///
/// Points are kept in the order the instrument logged them, which is not
/// necessarily monotonic in frequency.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementSeries {
    /// Sweep points in log order
    pub points: Vec<EisPoint>,

    /// Names of the auxiliary channels carried by each point
    #[serde(default)]
    pub channel_names: Vec<String>,

    /// Flat key/value metadata from the export header
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl MeasurementSeries {
    /// Create a series from points and metadata
    pub fn new(points: Vec<EisPoint>, metadata: BTreeMap<String, String>) -> Self {
        Self {
            points,
            channel_names: Vec::new(),
            metadata,
        }
    }

    /// Build a new series carrying this series' metadata and channel layout
    pub fn with_points(&self, points: Vec<EisPoint>) -> Self {
        Self {
            points,
            channel_names: self.channel_names.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Number of points in the sweep
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the sweep has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Operator label stored in the `Comment` metadata field
    pub fn raw_label(&self) -> Option<&str> {
        self.metadata.get(LABEL_METADATA_KEY).map(|s| s.trim())
    }

    /// Metadata value by key
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Sweep start time, if the `Start Time` field uses a known layout
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        let raw = self.metadata_value("Start Time")?.trim();
        METADATA_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    }

    /// Frequencies in log order
    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.frequency).collect()
    }

    /// Complex impedances in log order
    pub fn impedances(&self) -> Vec<Complex64> {
        self.points.iter().map(EisPoint::impedance).collect()
    }

    /// Lowest and highest measured frequency
    pub fn frequency_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.frequency).fold(None, |acc, f| {
            Some(match acc {
                None => (f, f),
                Some((lo, hi)) => (lo.min(f), hi.max(f)),
            })
        })
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Collection of sweeps keyed by unique label
///
/// Iteration order is the sorted label order, so every derived dataset iterates
/// its entries in the same relative order as its source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    entries: BTreeMap<String, MeasurementSeries>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a series, returning any series previously stored under the label
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        series: MeasurementSeries,
    ) -> Option<MeasurementSeries> {
        self.entries.insert(label.into(), series)
    }

    /// Series by label
    pub fn get(&self, label: &str) -> Option<&MeasurementSeries> {
        self.entries.get(label)
    }

    /// Check if a label is present
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the dataset has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in iteration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in iteration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MeasurementSeries)> {
        self.entries.iter().map(|(label, series)| (label.as_str(), series))
    }

    /// Total number of points across all series
    pub fn total_points(&self) -> usize {
        self.entries.values().map(MeasurementSeries::len).sum()
    }
}

impl IntoIterator for Dataset {
    type Item = (String, MeasurementSeries);
    type IntoIter = std::collections::btree_map::IntoIter<String, MeasurementSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, MeasurementSeries)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, MeasurementSeries)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Grouped Dataset
// =============================================================================

/// Partition of a dataset keyed by a derived identity attribute
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct GroupedDataset {
    groups: BTreeMap<String, Dataset>,
}

impl GroupedDataset {
    /// Create an empty grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an entry in the group for `key`, creating the group on first use
    pub fn insert(&mut self, key: impl Into<String>, label: String, series: MeasurementSeries) {
        self.groups
            .entry(key.into())
            .or_default()
            .insert(label, series);
    }

    /// Group by key
    pub fn get(&self, key: &str) -> Option<&Dataset> {
        self.groups.get(key)
    }

    /// Group keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Groups in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dataset)> {
        self.groups.iter().map(|(key, group)| (key.as_str(), group))
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of entries across all groups
    pub fn total_entries(&self) -> usize {
        self.groups.values().map(Dataset::len).sum()
    }

    /// Merge all groups back into a single dataset
    pub fn flatten(self) -> Dataset {
        self.groups.into_values().flatten().collect()
    }
}

impl IntoIterator for GroupedDataset {
    type Item = (String, Dataset);
    type IntoIter = std::collections::btree_map::IntoIter<String, Dataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
