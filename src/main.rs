use anyhow::Context;
use clap::Parser;
use eis_preprocessor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<()> = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => {
                result.context("EIS preprocessing failed")
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to install CTRL+C signal handler")?;
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(eis_preprocessor::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
                .context("EIS preprocessing failed")
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("EIS Preprocessor - Battery Impedance Export Cleaner");
    println!("===================================================");
    println!();
    println!("Disambiguate free-text experiment labels into battery identities, rename");
    println!("sweeps to canonical labels and remove non-physical points from EIS spectra.");
    println!();
    println!("USAGE:");
    println!("    eis-preprocessor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Load, rename and filter every export (main command)");
    println!("    identify    Decode labels into batch, number and temperature");
    println!("    groups      Show how exports partition by batch, temperature or number");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Clean every main-run export under a directory:");
    println!("    eis-preprocessor process --input /path/to/exports --output cleaned.json");
    println!();
    println!("    # Decode labels without reading any files:");
    println!("    eis-preprocessor identify \"UCT_AST9AH_B07_-20\" \"A01_RT1 2\"");
    println!();
    println!("    # Group exports by batch, then by temperature:");
    println!("    eis-preprocessor groups --input /path/to/exports --by batch --then temperature");
    println!();
    println!("For detailed help on any command, use:");
    println!("    eis-preprocessor <COMMAND> --help");
}
