//! Application constants for the EIS preprocessor
//!
//! This module contains the closed vocabularies used by label disambiguation,
//! the instrument export layout, and default values used throughout the crate.

// =============================================================================
// Label Vocabulary
// =============================================================================

/// Canonical label prefix for the ageing study the labels belong to
pub const DEFAULT_CANONICAL_PREFIX: &str = "UCT_AST9AH";

/// Temperature spellings in priority order, paired with the canonical code
///
/// A bare `RT` is the first room-temperature run. `+00` and `0` are legacy
/// spellings of `00` found in older labels (`_+00`, `_0`).
pub const TEMPERATURE_CANDIDATES: &[(&str, &str)] = &[
    ("RT1", "RT1"),
    ("RT2", "RT2"),
    ("RT", "RT1"),
    ("-40", "-40"),
    ("-30", "-30"),
    ("-20", "-20"),
    ("-10", "-10"),
    ("+00", "00"),
    ("00", "00"),
    ("0", "00"),
];

/// Canonical temperature codes in test order
pub const TEMPERATURE_CODES: &[&str] = &["RT1", "-40", "-30", "-20", "-10", "00", "RT2"];

// =============================================================================
// Derived Quantities
// =============================================================================

/// Offset between Celsius and Kelvin
pub const ABSOLUTE_ZERO_CELSIUS: f64 = 273.15;

/// Temperature assumed for room-temperature runs, in Celsius
pub const ROOM_TEMPERATURE_CELSIUS: f64 = 25.0;

/// State of charge per battery in percent, as recorded on the test sheet
pub const SOC_TABLE: &[(&str, u8)] = &[
    ("A01", 100),
    ("A02", 93),
    ("A03", 87),
    ("A04", 80),
    ("A05", 73),
    ("A06", 67),
    ("A07", 60),
    ("A08", 53),
    ("A09", 47),
    ("A10", 40),
    ("B01", 100),
    ("B02", 93),
    ("B03", 87),
    ("B04", 80),
    ("B05", 73),
    ("B06", 67),
    ("B07", 60),
    ("B08", 53),
    ("B09", 47),
    ("B10", 40),
];

// =============================================================================
// Spectral Filtering
// =============================================================================

/// Default ratio between the one-step and two-step distances above which a
/// point is treated as a single-sample glitch
pub const DEFAULT_OUTLIER_TOLERANCE: f64 = 2.0;

// =============================================================================
// Instrument Export Layout
// =============================================================================

/// File name suffix of the first EIS export of a test step
pub const EIS_FILE_PATTERN: &str = "*_EIS00001.csv";

/// Suffix of directories holding the auxiliary "all runs" exports
pub const ALL_RUNS_DIR_SUFFIX: &str = "All";

/// First metadata line (0-based)
pub const METADATA_FIRST_LINE: usize = 2;

/// Number of `key,value` metadata lines
pub const METADATA_LINE_COUNT: usize = 23;

/// Line holding the column headers (0-based)
pub const HEADER_LINE: usize = 29;

/// Unit/annotation lines following the header
pub const HEADER_TRAILER_LINES: usize = 4;

/// Metadata key holding the operator label
pub const LABEL_METADATA_KEY: &str = "Comment";

/// Column names consumed from the export
pub mod columns {
    /// Measured excitation frequency (Hz)
    pub const FREQUENCY: &str = "ActFreq";

    /// Real impedance component (mΩ)
    pub const Z_REAL: &str = "Zreal1";

    /// Imaginary impedance component (mΩ)
    pub const Z_IMAG: &str = "Zimg1";

    /// Instrument channels that carry no information for impedance analysis
    pub const DISCARDED: &[&str] = &[
        "Voltage",
        "Current",
        "Cycle",
        "Cycle Level",
        "EisStart",
        "EisFinish",
        "AAcMax",
    ];
}

/// Timestamp layouts seen in the `Start Time` / `End Time` metadata
pub const METADATA_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%d.%m.%Y %H:%M:%S",
];

// =============================================================================
// Processing Defaults
// =============================================================================

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "EIS_";

/// Directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "eis-preprocessor";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
