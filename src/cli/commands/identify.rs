//! Identify command: decode labels into battery identities

use crate::app::services::derived::{SocTable, temperature_kelvin};
use crate::app::services::label_disambiguator::{Identity, disambiguate_all};
use crate::cli::args::{IdentifyArgs, OutputFormat};
use crate::cli::commands::shared::{
    load_configuration, load_dataset, log_configuration, setup_logging,
};
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use tracing::warn;

/// Decoded label, or the reason it could not be decoded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifyRow {
    pub label: String,
    pub canonical: Option<String>,
    pub batch: Option<String>,
    pub number: Option<String>,
    pub temperature: Option<String>,
    pub run_repetition: Option<u8>,
    pub temperature_kelvin: Option<f64>,
    pub state_of_charge: Option<f64>,
    pub paper_label: Option<String>,
    pub error: Option<String>,
}

impl IdentifyRow {
    fn decoded(label: &str, identity: &Identity, prefix: &str, soc: &SocTable) -> Self {
        Self {
            label: label.to_string(),
            canonical: Some(identity.canonical_label(prefix)),
            batch: Some(identity.batch.to_string()),
            number: Some(identity.number.to_string()),
            temperature: Some(identity.temperature.to_string()),
            run_repetition: identity.run_repetition,
            temperature_kelvin: Some(temperature_kelvin(identity)),
            state_of_charge: soc.state_of_charge(identity).ok(),
            paper_label: soc.paper_label(identity).ok(),
            error: None,
        }
    }

    fn failed(label: &str, error: &Error) -> Self {
        Self {
            label: label.to_string(),
            canonical: None,
            batch: None,
            number: None,
            temperature: None,
            run_repetition: None,
            temperature_kelvin: None,
            state_of_charge: None,
            paper_label: None,
            error: Some(error.to_string()),
        }
    }
}

/// Decode every label; failures are reported per row
pub fn identify_labels<'a, I>(labels: I, prefix: &str, soc: &SocTable) -> Vec<IdentifyRow>
where
    I: IntoIterator<Item = &'a str>,
{
    disambiguate_all(labels)
        .into_iter()
        .map(|(label, result)| match result {
            Ok(identity) => IdentifyRow::decoded(label, &identity, prefix, soc),
            Err(error) => {
                warn!("{}", error);
                IdentifyRow::failed(label, &error)
            }
        })
        .collect()
}

/// Run the identify command
pub async fn run_identify(args: IdentifyArgs) -> Result<Vec<IdentifyRow>> {
    let config = load_configuration(&args.input)?;
    setup_logging(&args.verbosity, &config)?;
    log_configuration(&args.input, &config);

    let labels: Vec<String> = if args.labels.is_empty() {
        let show_progress =
            args.verbosity.show_progress() && args.output_format == OutputFormat::Human;
        let loaded = load_dataset(&config, show_progress).await?;
        loaded.dataset.labels().map(str::to_string).collect()
    } else {
        args.labels.clone()
    };

    let rows = identify_labels(
        labels.iter().map(String::as_str),
        &config.labeling.canonical_prefix,
        &SocTable::default(),
    );

    match args.output_format {
        OutputFormat::Human => generate_human_report(&rows),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| Error::serialization("Failed to render JSON report", e))?;
            println!("{}", json);
        }
        OutputFormat::Csv => generate_csv_report(&rows)?,
    }

    Ok(rows)
}

fn generate_human_report(rows: &[IdentifyRow]) {
    println!("\n{}", "Label Identities".bright_green().bold());
    for row in rows {
        match (&row.canonical, &row.error) {
            (Some(canonical), _) => {
                let kelvin = row
                    .temperature_kelvin
                    .map(|k| format!("{:.2} K", k))
                    .unwrap_or_default();
                let paper = row.paper_label.as_deref().unwrap_or("no SoC entry");
                println!(
                    "  {} -> {}  [{}, {}]",
                    row.label.bright_yellow(),
                    canonical.bright_white().bold(),
                    kelvin,
                    paper
                );
            }
            (None, error) => {
                println!(
                    "  {} -> {}",
                    row.label.bright_yellow(),
                    error.as_deref().unwrap_or("invalid").bright_red()
                );
            }
        }
    }

    let failed = rows.iter().filter(|row| row.error.is_some()).count();
    if failed > 0 {
        println!(
            "\n  {} {}",
            "Invalid labels:".bright_red(),
            failed.to_string().bright_red().bold()
        );
    }
    println!();
}

fn generate_csv_report(rows: &[IdentifyRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| Error::io("Failed to write CSV report", e.into()))?;
    }
    writer
        .flush()
        .map_err(|e| Error::io("Failed to write CSV report", e))
}
