//! Audit records for spectral filtering
//!
//! Reports are observability only: they describe what a filter removed so the
//! removal can be checked against the raw export, and never drive control flow.

use serde::Serialize;
use tracing::info;

/// Points removed from one series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesFilterReport {
    /// Label of the series
    pub label: String,
    /// Number of points before filtering
    pub points_before: usize,
    /// Number of points removed
    pub removed: usize,
    /// Frequencies of the removed points, in log order
    pub removed_frequencies: Vec<f64>,
}

impl SeriesFilterReport {
    /// Number of points left after filtering
    pub fn points_after(&self) -> usize {
        self.points_before - self.removed
    }
}

/// Points removed by one filter across a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterReport {
    /// Filter name
    pub filter: &'static str,
    /// One entry per series, in dataset order
    pub series: Vec<SeriesFilterReport>,
}

impl FilterReport {
    /// Create an empty report for a filter
    pub fn new(filter: &'static str) -> Self {
        Self {
            filter,
            series: Vec::new(),
        }
    }

    /// Total number of removed points
    pub fn total_removed(&self) -> usize {
        self.series.iter().map(|s| s.removed).sum()
    }

    /// Series that lost at least one point
    pub fn affected(&self) -> impl Iterator<Item = &SeriesFilterReport> {
        self.series.iter().filter(|s| s.removed > 0)
    }

    /// Removal record for a series
    pub fn for_label(&self, label: &str) -> Option<&SeriesFilterReport> {
        self.series.iter().find(|s| s.label == label)
    }

    /// Log one line per affected series; unaffected series stay silent
    pub fn log(&self) {
        for entry in self.affected() {
            info!(
                "{}: removed {} of {} points from '{}' (frequencies: {:?})",
                self.filter, entry.removed, entry.points_before, entry.label, entry.removed_frequencies
            );
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "{}: {} points removed from {} of {} series",
            self.filter,
            self.total_removed(),
            self.affected().count(),
            self.series.len()
        )
    }
}
