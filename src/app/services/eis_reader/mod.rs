//! Reader for battery cycler EIS exports
//!
//! ## Architecture
//!
//! - [`discovery`] - Finding `*_EIS00001.csv` exports for the main or `All` runs
//! - [`parser`] - Parsing one export into a [`MeasurementSeries`]
//! - [`column_mapping`] - Locating impedance columns and auxiliary channels
//! - [`loader`] - Concurrent loading of many exports into a [`Dataset`]
//! - [`stats`] - Row and file statistics
//!
//! ## Export layout
//!
//! ```text
//! line 0-1    instrument banner (ignored)
//! line 2-24   key,value metadata (Comment, Start Time, ...)
//! line 29     column header
//! line 30-33  units and annotations (ignored)
//! line 34-    data rows
//! ```
//!
//! [`MeasurementSeries`]: crate::app::models::MeasurementSeries
//! [`Dataset`]: crate::app::models::Dataset

pub mod column_mapping;
pub mod discovery;
pub mod loader;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use column_mapping::ColumnMapping;
pub use discovery::{RunSelection, discover_eis_files};
pub use loader::{EisLoader, LoadResult, LoadStats};
pub use parser::{parse_file, parse_str};
pub use stats::{ParseResult, ParseStats};
