//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and dataset loading used by
//! every subcommand.

use crate::Result;
use crate::app::services::eis_reader::{EisLoader, LoadResult};
use crate::cli::args::{InputArgs, VerbosityArgs};
use crate::config::Config;
use std::path::PathBuf;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// The command-line verbosity wins over the configured level; `RUST_LOG`
/// wins over both.
pub fn setup_logging(verbosity: &VerbosityArgs, config: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = verbosity
        .log_level_override()
        .unwrap_or(config.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("eis_preprocessor={}", log_level)));

    if verbosity.quiet {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Resolve the config file: explicit path, else the default location if present
fn resolve_config_file(explicit: Option<&PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.clone()),
        None => Config::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    }
}

/// Load layered configuration and apply command-line overrides
pub fn load_configuration(input: &InputArgs) -> Result<Config> {
    let config_file = resolve_config_file(input.config_file.as_ref());
    let mut config = Config::load_layered(input.input_path.clone(), config_file.as_deref())?;
    apply_input_overrides(&mut config, input);
    config.validate()?;
    Ok(config)
}

/// Apply command-line overrides to configuration
pub fn apply_input_overrides(config: &mut Config, input: &InputArgs) {
    if let Some(selection) = input.selection {
        config.processing.selection = selection;
    }
    if let Some(pattern) = &input.file_pattern {
        config.processing.file_pattern = pattern.clone();
    }
    if let Some(workers) = input.workers {
        config.processing.workers = workers;
    }
    if let Some(prefix) = &input.canonical_prefix {
        config.labeling.canonical_prefix = prefix.clone();
    }
}

/// Log where the configuration came from; call after logging is set up
pub fn log_configuration(input: &InputArgs, config: &Config) {
    match resolve_config_file(input.config_file.as_ref()) {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults and environment variables"),
    }
    debug!("Effective configuration: {:?}", config);
}

/// Load every export selected by the configuration
pub async fn load_dataset(config: &Config, show_progress: bool) -> Result<LoadResult> {
    EisLoader::new(config.processing.workers)
        .with_progress(show_progress)
        .load_directory(
            &config.processing.input_path,
            &config.processing.file_pattern,
            config.processing.selection,
        )
        .await
}
