//! Parsing statistics for EIS exports

use crate::app::models::MeasurementSeries;
use serde::Serialize;

/// One parsed export with its statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub series: MeasurementSeries,
    pub stats: ParseStats,
}

/// Row counts for one export file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseStats {
    /// Data rows encountered after the header block
    pub total_rows: usize,

    /// Rows that became sweep points
    pub points_parsed: usize,

    /// Rows dropped because a required impedance field was not numeric
    pub rows_skipped: usize,

    /// Per-row problems, for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of data rows that became points, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.points_parsed as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Fold another file's statistics into this one
    pub fn merge(&mut self, other: &ParseStats) {
        self.total_rows += other.total_rows;
        self.points_parsed += other.points_parsed;
        self.rows_skipped += other.rows_skipped;
        self.errors.extend(other.errors.iter().cloned());
    }
}
