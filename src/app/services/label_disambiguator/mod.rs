//! Label disambiguation for operator-authored experiment labels
//!
//! Labels are typed by hand on the cycler (`UCT_AST9AH_A01_RT1 2`,
//! `AST B07_-20`, ...). Separators and surrounding text vary between operators,
//! but the vocabulary is closed: a battery token (`A01`..`B99`), a temperature
//! code and an optional trailing run index.
//!
//! # Matching rules
//!
//! - **Battery**: batch letter `A`/`B` immediately followed by exactly two digits,
//!   not glued to a preceding letter or digit.
//! - **Temperature**: the left-most entry of [`TEMPERATURE_CANDIDATES`] that
//!   is not followed by a digit; signed codes may follow anything (`B07-20`),
//!   others not a letter or digit. `RT` normalizes to `RT1`, `+00` and `0` to
//!   `00`.
//! - **Run repetition**: a single digit after whitespace at the very end.
//!
//! The left-most match is authoritative. A missing battery or temperature is an
//! error, as is a position where distinct canonical values fit equally well.

pub mod identity;
pub mod matcher;

#[cfg(test)]
pub mod tests;

pub use identity::{Batch, BatteryNumber, Identity, TemperatureCode};

use crate::constants::TEMPERATURE_CANDIDATES;
use crate::{Error, LabelField, Result};
use matcher::{MatchOutcome, first_match};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static BATTERY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9])([AB])(\d{2})(?:$|\D)").expect("battery token pattern")
});

static RUN_REPETITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(\d)$").expect("run repetition pattern"));

/// Disambiguate an experiment label into its battery identity
///
/// # Errors
///
/// Returns [`Error::MissingLabelField`] when the battery token or temperature
/// code is absent, and [`Error::AmbiguousLabelField`] when the temperature
/// position admits more than one canonical code.
pub fn disambiguate(label: &str) -> Result<Identity> {
    let (body, run_repetition) = split_run_repetition(label);

    let (batch, number) = find_battery(label, body)?;
    let temperature = find_temperature(label, body)?;

    let identity = Identity {
        batch,
        number,
        temperature,
        run_repetition,
    };
    debug!("Disambiguated '{}' as {}", label, identity);
    Ok(identity)
}

/// Split the optional trailing run index off the label
fn split_run_repetition(label: &str) -> (&str, Option<u8>) {
    match RUN_REPETITION.captures(label) {
        Some(caps) => {
            let whole = caps.get(0).map_or(label.len(), |m| m.start());
            let run = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<u8>().ok());
            (&label[..whole], run)
        }
        None => (label, None),
    }
}

fn find_battery(label: &str, body: &str) -> Result<(Batch, BatteryNumber)> {
    let caps = BATTERY_TOKEN
        .captures(body)
        .ok_or_else(|| Error::missing_label_field(label, LabelField::Batch))?;

    let batch = caps
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Batch::from_letter)
        .ok_or_else(|| Error::missing_label_field(label, LabelField::Batch))?;

    let number = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .and_then(BatteryNumber::new)
        .ok_or_else(|| Error::missing_label_field(label, LabelField::Number))?;

    Ok((batch, number))
}

fn find_temperature(label: &str, body: &str) -> Result<TemperatureCode> {
    match first_match(body, TEMPERATURE_CANDIDATES) {
        MatchOutcome::Found { canonical, .. } => canonical.parse(),
        MatchOutcome::Missing => Err(Error::missing_label_field(label, LabelField::Temperature)),
        MatchOutcome::Ambiguous(values) => Err(Error::ambiguous_label_field(
            label,
            LabelField::Temperature,
            &values,
        )),
    }
}

/// True if `text` holds a battery token or a temperature code
///
/// Text placed in front of a label must not, or it is read instead of the
/// fields that follow it.
pub fn contains_label_token(text: &str) -> bool {
    BATTERY_TOKEN.is_match(text)
        || !matches!(first_match(text, TEMPERATURE_CANDIDATES), MatchOutcome::Missing)
}

/// Disambiguate every label, keeping failures alongside successes
///
/// One invalid label does not affect the others.
pub fn disambiguate_all<'a, I>(labels: I) -> Vec<(&'a str, Result<Identity>)>
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .map(|label| (label, disambiguate(label)))
        .collect()
}
