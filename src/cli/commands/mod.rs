//! Command implementations for the EIS preprocessor CLI
//!
//! Each subcommand lives in its own module; `shared` holds the logging,
//! configuration and loading steps they have in common.

pub mod groups;
pub mod identify;
pub mod process;
pub mod shared;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch to the handler of the parsed subcommand
///
/// Reports are printed by the handlers themselves.
pub async fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        return Err(Error::configuration("no subcommand given"));
    };

    match command {
        Commands::Process(process_args) => process::run_process(process_args).await.map(|_| ()),
        Commands::Identify(identify_args) => {
            identify::run_identify(identify_args).await.map(|_| ())
        }
        Commands::Groups(groups_args) => groups::run_groups(groups_args).await.map(|_| ()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_without_subcommand_is_an_error() {
        let result = run(Args { command: None }).await;
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
