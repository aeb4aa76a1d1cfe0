//! Groups command: show how exports partition by identity attributes

use crate::app::models::{Dataset, GroupedDataset};
use crate::app::services::grouping::{GroupKey, group_by, group_nested};
use crate::cli::args::{GroupsArgs, OutputFormat};
use crate::cli::commands::shared::{
    load_configuration, load_dataset, log_configuration, setup_logging,
};
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Labels per group, one or two levels deep
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupListing {
    Flat(BTreeMap<String, Vec<String>>),
    Nested(BTreeMap<String, BTreeMap<String, Vec<String>>>),
}

fn labels_of(grouped: &GroupedDataset) -> BTreeMap<String, Vec<String>> {
    grouped
        .iter()
        .map(|(key, group)| (key.to_string(), group.labels().map(str::to_string).collect()))
        .collect()
}

/// Partition a dataset and keep only the labels of each group
pub fn list_groups(dataset: Dataset, by: GroupKey, then: Option<GroupKey>) -> Result<GroupListing> {
    match then {
        None => Ok(GroupListing::Flat(labels_of(&group_by(dataset, by)?))),
        Some(inner) => Ok(GroupListing::Nested(
            group_nested(dataset, by, inner)?
                .iter()
                .map(|(key, grouped)| (key.clone(), labels_of(grouped)))
                .collect(),
        )),
    }
}

impl GroupListing {
    /// `(outer, inner, label)` rows; `inner` is empty for a flat listing
    pub fn rows(&self) -> Vec<(String, String, String)> {
        match self {
            GroupListing::Flat(groups) => groups
                .iter()
                .flat_map(|(key, labels)| {
                    labels
                        .iter()
                        .map(move |label| (key.clone(), String::new(), label.clone()))
                })
                .collect(),
            GroupListing::Nested(groups) => groups
                .iter()
                .flat_map(|(outer, inner_groups)| {
                    inner_groups.iter().flat_map(move |(inner, labels)| {
                        labels
                            .iter()
                            .map(move |label| (outer.clone(), inner.clone(), label.clone()))
                    })
                })
                .collect(),
        }
    }
}

/// Run the groups command
pub async fn run_groups(args: GroupsArgs) -> Result<GroupListing> {
    args.validate()?;

    let config = load_configuration(&args.input)?;
    setup_logging(&args.verbosity, &config)?;
    log_configuration(&args.input, &config);

    let show_progress =
        args.verbosity.show_progress() && args.output_format == OutputFormat::Human;
    let loaded = load_dataset(&config, show_progress).await?;

    let listing = list_groups(loaded.dataset, args.by.into(), args.then.map(GroupKey::from))?;

    match args.output_format {
        OutputFormat::Human => generate_human_report(&listing),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&listing)
                .map_err(|e| Error::serialization("Failed to render JSON report", e))?;
            println!("{}", json);
        }
        OutputFormat::Csv => generate_csv_report(&listing)?,
    }

    Ok(listing)
}

fn print_group(indent: &str, key: &str, labels: &[String]) {
    println!(
        "{}{} ({})",
        indent,
        key.bright_cyan().bold(),
        labels.len().to_string().bright_white()
    );
    for label in labels {
        println!("{}  {}", indent, label);
    }
}

fn generate_human_report(listing: &GroupListing) {
    println!("\n{}", "Groups".bright_green().bold());
    match listing {
        GroupListing::Flat(groups) => {
            for (key, labels) in groups {
                print_group("  ", key, labels);
            }
        }
        GroupListing::Nested(groups) => {
            for (outer, inner_groups) in groups {
                println!("  {}", outer.bright_green().bold());
                for (inner, labels) in inner_groups {
                    print_group("    ", inner, labels);
                }
            }
        }
    }
    println!();
}

fn generate_csv_report(listing: &GroupListing) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    let write_err = |e: csv::Error| Error::io("Failed to write CSV report", e.into());

    writer.write_record(["group", "subgroup", "label"]).map_err(write_err)?;
    for (outer, inner, label) in listing.rows() {
        writer.write_record([outer, inner, label]).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|e| Error::io("Failed to write CSV report", e))
}
