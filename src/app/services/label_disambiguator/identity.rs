//! Structured battery identity decoded from an experiment label

use crate::{Error, LabelField, Result};
use std::fmt;
use std::str::FromStr;

/// Manufacturing/test batch of a battery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Batch {
    A,
    B,
}

impl Batch {
    /// Batch for a label letter
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Batch::A),
            'B' => Some(Batch::B),
            _ => None,
        }
    }

    /// Single-letter code
    pub fn as_str(self) -> &'static str {
        match self {
            Batch::A => "A",
            Batch::B => "B",
        }
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Battery number within a batch, rendered zero-padded to two digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatteryNumber(u8);

impl BatteryNumber {
    /// Create a battery number (0..=99)
    pub fn new(value: u8) -> Option<Self> {
        (value < 100).then_some(Self(value))
    }

    /// Numeric value
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for BatteryNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Test temperature code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemperatureCode {
    /// Room temperature run, with its instance index (`RT1`, `RT2`)
    Room(u8),
    /// Chamber set point in whole degrees Celsius (`-40` .. `00`)
    Celsius(i8),
}

impl TemperatureCode {
    /// True for room-temperature runs
    pub fn is_room_temperature(self) -> bool {
        matches!(self, TemperatureCode::Room(_))
    }

    /// Chamber set point, `None` for room temperature
    pub fn celsius(self) -> Option<i8> {
        match self {
            TemperatureCode::Celsius(value) => Some(value),
            TemperatureCode::Room(_) => None,
        }
    }
}

impl fmt::Display for TemperatureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureCode::Room(index) => write!(f, "RT{}", index),
            TemperatureCode::Celsius(0) => f.write_str("00"),
            TemperatureCode::Celsius(value) => write!(f, "{}", value),
        }
    }
}

impl FromStr for TemperatureCode {
    type Err = Error;

    /// Parse a canonical code (`RT1`, `RT2`, `-40`, `-30`, `-20`, `-10`, `00`)
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RT1" => Ok(TemperatureCode::Room(1)),
            "RT2" => Ok(TemperatureCode::Room(2)),
            "-40" => Ok(TemperatureCode::Celsius(-40)),
            "-30" => Ok(TemperatureCode::Celsius(-30)),
            "-20" => Ok(TemperatureCode::Celsius(-20)),
            "-10" => Ok(TemperatureCode::Celsius(-10)),
            "00" => Ok(TemperatureCode::Celsius(0)),
            other => Err(Error::missing_label_field(other, LabelField::Temperature)),
        }
    }
}

/// Structured decomposition of an experiment label
///
/// Identity is a pure function of the label: it is recomputed whenever needed
/// and never stored alongside the series it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    pub batch: Batch,
    pub number: BatteryNumber,
    pub temperature: TemperatureCode,
    /// Trailing run index; `None` for the first (or only) run
    pub run_repetition: Option<u8>,
}

impl Identity {
    /// Battery key used by lookup tables (`A01`)
    pub fn battery_key(&self) -> String {
        format!("{}{}", self.batch, self.number)
    }

    /// Label suffix for the run repetition (`" 2"`), empty for the first run
    pub fn repetition_suffix(&self) -> String {
        match self.run_repetition {
            Some(run) => format!(" {}", run),
            None => String::new(),
        }
    }

    /// Canonical label `<prefix>_<batch><number>_<temperature>[ <repetition>]`
    pub fn canonical_label(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}_{}{}",
            self.batch,
            self.number,
            self.temperature,
            self.repetition_suffix()
        )
    }
}

impl FromStr for Identity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        super::disambiguate(s)
    }
}
