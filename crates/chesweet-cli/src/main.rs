mod cli;
mod commands;
mod config;
mod data;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!(
        "🚀 CheSweet CLI v{} starting up.",
        env!("CARGO_PKG_VERSION")
    );
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let command_result = match cli.command {
        Commands::Estimate(args) => {
            info!("Dispatching to 'estimate' command.");
            commands::estimate::run(args)
        }
        Commands::Recover(args) => {
            info!("Dispatching to 'recover' command.");
            commands::recover::run(args)
        }
        Commands::Batch(args) => {
            info!("Dispatching to 'batch' command.");
            commands::batch::run(args)
        }
        Commands::List(args) => {
            info!("Dispatching to 'list' command.");
            commands::list::run(args)
        }
        Commands::Data(args) => {
            info!("Dispatching to 'data' command.");
            commands::data::run(args)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
