mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

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
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!(
        "🧬 dnafold CLI v{} starting up.",
        env!("CARGO_PKG_VERSION")
    );
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(threads) = cli.threads {
        configure_threads(threads)?;
    }

    let command_result = match cli.command {
        Commands::Fold(args) => {
            info!("Dispatching to 'fold' command.");
            commands::fold::run(args)
        }
        Commands::Anneal(args) => {
            info!("Dispatching to 'anneal' command.");
            commands::anneal::run(args)
        }
        Commands::Evolve(args) => {
            info!("Dispatching to 'evolve' command.");
            commands::evolve::run(args)
        }
        Commands::Survey(args) => {
            info!("Dispatching to 'survey' command.");
            commands::survey::run(args)
        }
        Commands::Clean(args) => {
            info!("Dispatching to 'clean' command.");
            commands::clean::run(args)
        }
    };

    match &command_result {
        Ok(_) => {
            info!("✅ Command completed successfully.");
            println!("✅ Command completed successfully.");
        }
        Err(e) => {
            error!("❌ Command failed: {}", e);
        }
    }

    command_result
}

fn configure_threads(threads: usize) -> Result<()> {
    if threads == 0 {
        return Err(CliError::Argument("--threads must be at least 1".to_string()));
    }
    info!("Scoring with {} rayon worker thread(s).", threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e)))
}
