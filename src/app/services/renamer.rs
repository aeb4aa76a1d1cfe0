//! Canonical label renaming
//!
//! Operators type labels with inconsistent separators, spellings and noise.
//! Renaming maps every raw label through [`disambiguate`] to
//! `<prefix>_<batch><number>_<temperature>[ <repetition>]` and refuses any
//! mapping where two raw labels land on the same canonical label.

use crate::app::models::Dataset;
use crate::app::services::label_disambiguator::{contains_label_token, disambiguate};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// One applied rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRecord {
    pub old: String,
    pub new: String,
}

impl RenameRecord {
    /// True when the label was already canonical
    pub fn is_unchanged(&self) -> bool {
        self.old == self.new
    }
}

/// Check that `prefix` can start canonical labels
///
/// The prefix must be non-empty, hold no whitespace and carry no battery or
/// temperature token, so every canonical label disambiguates back to the
/// identity it was built from.
pub fn check_canonical_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
        return Err(Error::configuration(format!(
            "Canonical prefix must be non-empty without whitespace, got '{}'",
            prefix
        )));
    }
    if contains_label_token(prefix) {
        return Err(Error::configuration(format!(
            "Canonical prefix '{}' contains a battery or temperature code",
            prefix
        )));
    }
    Ok(())
}

/// Compute the canonical label of every raw label without touching any series
///
/// Fails on an unusable prefix, on the first label that does not disambiguate,
/// or when two raw labels produce the same canonical label.
pub fn plan_renames<'a, I>(labels: I, prefix: &str) -> Result<Vec<RenameRecord>>
where
    I: IntoIterator<Item = &'a str>,
{
    check_canonical_prefix(prefix)?;

    let mut seen: HashMap<String, &'a str> = HashMap::new();
    let mut records = Vec::new();

    for old in labels {
        let new = disambiguate(old)?.canonical_label(prefix);
        if let Some(first) = seen.get(&new) {
            return Err(Error::duplicate_canonical_label(new, *first, old));
        }
        seen.insert(new.clone(), old);
        records.push(RenameRecord {
            old: old.to_string(),
            new,
        });
    }

    Ok(records)
}

/// Rename every entry of a dataset to its canonical label
///
/// The dataset is consumed; on error nothing is returned and no entry has been
/// overwritten.
pub fn rename_all(dataset: Dataset, prefix: &str) -> Result<(Dataset, Vec<RenameRecord>)> {
    let records = plan_renames(dataset.labels(), prefix)?;

    let mut renamed = Dataset::new();
    for ((_, series), record) in dataset.into_iter().zip(&records) {
        info!("{} -> {}", record.old, record.new);
        renamed.insert(record.new.clone(), series);
    }

    Ok((renamed, records))
}
