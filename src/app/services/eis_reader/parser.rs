//! Parser for single EIS export files
//!
//! The cycler writes one CSV per sweep. The first lines hold `key,value`
//! metadata, the column header sits at a fixed line, followed by a few unit
//! rows and then the data table. Line positions are taken from the CSV
//! reader, so blank lines do not shift the layout.

use super::column_mapping::ColumnMapping;
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{EisPoint, MeasurementSeries};
use crate::constants::{HEADER_LINE, HEADER_TRAILER_LINES, METADATA_FIRST_LINE, METADATA_LINE_COUNT};
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Parse an export file from disk
pub fn parse_file(path: &Path) -> Result<ParseResult> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;

    let result = parse_str(&content, &path.display().to_string())?;
    info!(
        "Parsed {} points from {} ({} rows skipped)",
        result.stats.points_parsed,
        path.display(),
        result.stats.rows_skipped
    );
    Ok(result)
}

/// Parse export content; `file` is only used in error messages
pub fn parse_str(content: &str, file: &str) -> Result<ParseResult> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let metadata_end = METADATA_FIRST_LINE + METADATA_LINE_COUNT;
    let data_start = HEADER_LINE + HEADER_TRAILER_LINES + 1;

    let mut metadata = BTreeMap::new();
    let mut mapping: Option<ColumnMapping> = None;
    let mut points = Vec::new();
    let mut stats = ParseStats::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| Error::csv_parsing(file, "malformed CSV record", Some(e)))?;
        let line = record
            .position()
            .map_or(0, |p| p.line().saturating_sub(1) as usize);

        if (METADATA_FIRST_LINE..metadata_end).contains(&line) {
            let key = record.get(0).unwrap_or("").trim();
            if !key.is_empty() {
                let value = record.get(1).unwrap_or("").trim();
                metadata.insert(key.to_string(), value.to_string());
            }
        } else if line == HEADER_LINE {
            mapping = Some(ColumnMapping::analyze(&record, file)?);
        } else if line >= data_start {
            let Some(mapping) = mapping.as_ref() else {
                return Err(Error::eis_format(
                    file,
                    format!("data before column header (expected at line {})", HEADER_LINE + 1),
                ));
            };

            stats.total_rows += 1;
            match parse_row(&record, mapping) {
                Some(point) => {
                    points.push(point);
                    stats.points_parsed += 1;
                }
                None => {
                    stats.rows_skipped += 1;
                    stats
                        .errors
                        .push(format!("line {}: non-numeric impedance field", line + 1));
                    debug!("Skipped row at line {} of {}", line + 1, file);
                }
            }
        }
    }

    let mapping = mapping.ok_or_else(|| {
        Error::eis_format(
            file,
            format!("no column header row at line {}", HEADER_LINE + 1),
        )
    })?;
    debug!(
        "{}: {} metadata fields, {} channels, {} discarded columns",
        file,
        metadata.len(),
        mapping.channels.len(),
        mapping.discarded.len()
    );

    let mut series = MeasurementSeries::new(points, metadata);
    series.channel_names = mapping.channel_names();
    Ok(ParseResult { series, stats })
}

fn parse_field(record: &StringRecord, index: usize) -> Option<f64> {
    record.get(index)?.trim().parse::<f64>().ok()
}

/// Convert one data row; `None` when a required field is not numeric
fn parse_row(record: &StringRecord, mapping: &ColumnMapping) -> Option<EisPoint> {
    let mut point = EisPoint::new(
        parse_field(record, mapping.frequency)?,
        parse_field(record, mapping.z_real)?,
        parse_field(record, mapping.z_imag)?,
    );
    point.channels = mapping
        .channels
        .iter()
        .map(|(_, index)| parse_field(record, *index).unwrap_or(f64::NAN))
        .collect();
    Some(point)
}
