//! EIS Preprocessor Library
//!
//! Normalizes electrochemical impedance spectroscopy (EIS) measurements exported
//! by a battery cycler, where every sweep is identified only by a free-text
//! experiment label typed by the operator.
//!
//! This library provides tools for:
//! - Disambiguating labels into structured battery identities (batch, number,
//!   test temperature, run repetition)
//! - Renaming measurements to collision-checked canonical labels
//! - Removing physically impossible points and single-sample glitches from sweeps
//! - Partitioning datasets by batch, temperature or battery number
//! - Resolving derived quantities (state of charge, temperature in Kelvin)
//! - Reading instrument CSV exports and discovering them on disk

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod derived;
        pub mod eis_reader;
        pub mod grouping;
        pub mod label_disambiguator;
        pub mod pipeline;
        pub mod renamer;
        pub mod spectral_filter;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Dataset, EisPoint, GroupedDataset, MeasurementSeries};
pub use app::services::label_disambiguator::{Identity, disambiguate};
pub use config::Config;

/// Result type alias for the EIS preprocessor
pub type Result<T> = std::result::Result<T, Error>;

/// Label field that failed to disambiguate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    Batch,
    Number,
    Temperature,
}

impl std::fmt::Display for LabelField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LabelField::Batch => "battery batch",
            LabelField::Number => "battery number",
            LabelField::Temperature => "temperature",
        };
        write!(f, "{}", name)
    }
}

/// Error types for EIS preprocessing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required label field matched no candidate
    #[error("Invalid label '{label}': no {field} found")]
    MissingLabelField { label: String, field: LabelField },

    /// A required label field matched several distinct candidates at the same position
    ///
    /// Only reachable with a vocabulary whose spellings overlap.
    #[error("Invalid label '{label}': ambiguous {field} ({candidates})")]
    AmbiguousLabelField {
        label: String,
        field: LabelField,
        candidates: String,
    },

    /// Two raw labels normalize to the same canonical label
    #[error("Duplicate canonical label '{canonical}' produced by '{first}' and '{second}'")]
    DuplicateCanonicalLabel {
        canonical: String,
        first: String,
        second: String,
    },

    /// Two export files carry the same raw label
    #[error("Duplicate raw label '{label}' in '{first}' and '{second}'")]
    DuplicateRawLabel {
        label: String,
        first: String,
        second: String,
    },

    /// State-of-charge lookup has no entry for the battery
    #[error("Unknown battery '{key}': no state of charge entry")]
    UnknownBattery { key: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Instrument export layout error
    #[error("EIS export format error in file '{file}': {message}")]
    EisFormat { file: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Report or dataset serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a missing label field error
    pub fn missing_label_field(label: impl Into<String>, field: LabelField) -> Self {
        Self::MissingLabelField {
            label: label.into(),
            field,
        }
    }

    /// Create an ambiguous label field error
    pub fn ambiguous_label_field(
        label: impl Into<String>,
        field: LabelField,
        candidates: &[&str],
    ) -> Self {
        Self::AmbiguousLabelField {
            label: label.into(),
            field,
            candidates: candidates.join(", "),
        }
    }

    /// Create a duplicate canonical label error
    pub fn duplicate_canonical_label(
        canonical: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::DuplicateCanonicalLabel {
            canonical: canonical.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create a duplicate raw label error
    pub fn duplicate_raw_label(
        label: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::DuplicateRawLabel {
            label: label.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create an unknown battery error
    pub fn unknown_battery(key: impl Into<String>) -> Self {
        Self::UnknownBattery { key: key.into() }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an export format error
    pub fn eis_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EisFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for errors raised by label disambiguation
    pub fn is_invalid_label(&self) -> bool {
        matches!(
            self,
            Error::MissingLabelField { .. } | Error::AmbiguousLabelField { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
