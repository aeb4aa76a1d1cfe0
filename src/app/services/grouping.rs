//! Partitioning of datasets by identity attributes
//!
//! Every grouping is all-or-nothing: if any label fails to disambiguate the
//! whole call fails and no partial grouping is returned. A successful grouping
//! is a partition of its input: every entry lands in exactly one group under
//! its original label, and group keys are the canonical attribute codes.

use crate::app::models::{Dataset, GroupedDataset};
use crate::app::services::label_disambiguator::{Identity, disambiguate};
use crate::Result;
use std::collections::BTreeMap;
use tracing::debug;

/// Identity attribute used as a group key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Batch,
    Temperature,
    BatteryNumber,
}

impl GroupKey {
    /// Group key of an identity
    pub fn key_of(self, identity: &Identity) -> String {
        match self {
            GroupKey::Batch => identity.batch.to_string(),
            GroupKey::Temperature => identity.temperature.to_string(),
            GroupKey::BatteryNumber => identity.number.to_string(),
        }
    }
}

/// Partition a dataset by one identity attribute
pub fn group_by(dataset: Dataset, key: GroupKey) -> Result<GroupedDataset> {
    // Resolve every label before moving any series
    let keys = dataset
        .labels()
        .map(|label| disambiguate(label).map(|identity| key.key_of(&identity)))
        .collect::<Result<Vec<_>>>()?;

    let mut grouped = GroupedDataset::new();
    for ((label, series), group) in dataset.into_iter().zip(keys) {
        grouped.insert(group, label, series);
    }

    debug!("Grouped by {:?} into {} groups", key, grouped.len());
    Ok(grouped)
}

/// Partition by batch (`A`, `B`)
pub fn group_by_batch(dataset: Dataset) -> Result<GroupedDataset> {
    group_by(dataset, GroupKey::Batch)
}

/// Partition by temperature code (`RT1`, `-20`, ...)
pub fn group_by_temperature(dataset: Dataset) -> Result<GroupedDataset> {
    group_by(dataset, GroupKey::Temperature)
}

/// Partition by two-digit battery number (`01`, `07`, ...)
pub fn group_by_battery_number(dataset: Dataset) -> Result<GroupedDataset> {
    group_by(dataset, GroupKey::BatteryNumber)
}

/// Two-level partition: `outer` first, then `inner` within each outer group
pub fn group_nested(
    dataset: Dataset,
    outer: GroupKey,
    inner: GroupKey,
) -> Result<BTreeMap<String, GroupedDataset>> {
    group_by(dataset, outer)?
        .into_iter()
        .map(|(key, group)| group_by(group, inner).map(|grouped| (key, grouped)))
        .collect()
}
