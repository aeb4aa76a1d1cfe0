//! Derived quantities resolved from a battery identity
//!
//! State of charge comes from a lookup table keyed by battery (`A01`..`B10`);
//! test temperature is converted from the label code to Kelvin.

use crate::app::services::label_disambiguator::{BatteryNumber, Identity, TemperatureCode};
use crate::constants::{ABSOLUTE_ZERO_CELSIUS, ROOM_TEMPERATURE_CELSIUS, SOC_TABLE};
use crate::{Error, Result};
use std::collections::BTreeMap;

/// State of charge per battery key, in whole percent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocTable {
    entries: BTreeMap<String, u8>,
}

impl SocTable {
    /// Build a table from `(battery key, percent)` pairs
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u8)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    fn percent(&self, key: &str) -> Result<u8> {
        self.entries
            .get(key)
            .copied()
            .ok_or_else(|| Error::unknown_battery(key))
    }

    /// State of charge as a fraction in `[0, 1]`
    pub fn state_of_charge(&self, identity: &Identity) -> Result<f64> {
        Ok(f64::from(self.percent(&identity.battery_key())?) / 100.0)
    }

    /// State of charge as printed on the test sheet (`"60%"`)
    pub fn soc_label(&self, identity: &Identity) -> Result<String> {
        Ok(format!("{}%", self.percent(&identity.battery_key())?))
    }

    /// State of charge label by battery number alone, looked up in batch A
    ///
    /// Both batches share one charge schedule.
    pub fn by_number(&self, number: BatteryNumber) -> Result<String> {
        Ok(format!("{}%", self.percent(&format!("A{}", number))?))
    }

    /// Label used in figures and publications (`"B07 (60%)"`)
    pub fn paper_label(&self, identity: &Identity) -> Result<String> {
        Ok(format!(
            "{} ({})",
            identity.battery_key(),
            self.soc_label(identity)?
        ))
    }

    /// Number of batteries in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SocTable {
    fn default() -> Self {
        Self::from_entries(SOC_TABLE.iter().copied())
    }
}

/// Test temperature in Kelvin; room-temperature runs count as 25 °C
pub fn temperature_kelvin(identity: &Identity) -> f64 {
    let celsius = match identity.temperature {
        TemperatureCode::Room(_) => ROOM_TEMPERATURE_CELSIUS,
        TemperatureCode::Celsius(value) => f64::from(value),
    };
    celsius + ABSOLUTE_ZERO_CELSIUS
}
