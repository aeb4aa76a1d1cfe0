//! Column layout of an EIS export data table
//!
//! The cycler writes a fixed set of impedance columns next to a varying number
//! of instrument channels. Impedance columns are required; known housekeeping
//! channels and unnamed trailing columns are dropped; everything else is kept
//! as an auxiliary channel.

use crate::constants::columns;
use crate::{Error, Result};
use csv::StringRecord;

/// Column indices for one export table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub frequency: usize,
    pub z_real: usize,
    pub z_imag: usize,

    /// Auxiliary channels as `(name, index)` in file order
    pub channels: Vec<(String, usize)>,

    /// Columns present in the file but dropped
    pub discarded: Vec<String>,
}

impl ColumnMapping {
    /// Analyze the header row of an export table
    pub fn analyze(headers: &StringRecord, file: &str) -> Result<Self> {
        let mut frequency = None;
        let mut z_real = None;
        let mut z_imag = None;
        let mut channels = Vec::new();
        let mut discarded = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            let name = header.trim();
            match name {
                columns::FREQUENCY => frequency = Some(index),
                columns::Z_REAL => z_real = Some(index),
                columns::Z_IMAG => z_imag = Some(index),
                // Trailing comma on every row yields an unnamed column
                "" => discarded.push(format!("<unnamed {}>", index)),
                _ if columns::DISCARDED.contains(&name) => discarded.push(name.to_string()),
                _ => channels.push((name.to_string(), index)),
            }
        }

        let require = |index: Option<usize>, name: &str| {
            index.ok_or_else(|| Error::eis_format(file, format!("missing required column '{}'", name)))
        };

        Ok(Self {
            frequency: require(frequency, columns::FREQUENCY)?,
            z_real: require(z_real, columns::Z_REAL)?,
            z_imag: require(z_imag, columns::Z_IMAG)?,
            channels,
            discarded,
        })
    }

    /// Auxiliary channel names in file order
    pub fn channel_names(&self) -> Vec<String> {
        self.channels.iter().map(|(name, _)| name.clone()).collect()
    }
}
