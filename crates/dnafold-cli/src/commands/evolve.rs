use super::{load_sequence, load_table};
use crate::cli::EvolveArgs;
use crate::config::{self, defaults::DefaultsConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use dnafold::core::io::table::next_available_path;
use dnafold::engine::progress::ProgressReporter;
use dnafold::workflows;
use tracing::{info, warn};

pub fn run(args: EvolveArgs) -> Result<()> {
    let config = config::build_genetic_config(&args.genetic, args.population_size)?;
    let sequence = load_sequence(&args.sequence)?;
    let reference = load_table(args.table.table.as_deref())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Evolving a population of {} with {} selection...",
        config.population_size, config.strategy
    );
    let result = workflows::evolve::run(&sequence, &reference, &config, &reporter)?;

    println!(
        "Converged after {} generation(s). {}",
        result.generations, result.best
    );
    if !result.within_reference {
        warn!("The best table leaves the reference windows.");
        println!("Warning: the best table leaves the reference windows.");
    }

    let prefix = args
        .output
        .unwrap_or_else(|| DefaultsConfig::default().genetic_output_prefix);
    let output_path = next_available_path(&prefix);
    info!("Saving best table to {:?}", output_path);
    result.best.table().save(&output_path)?;
    println!("✓ Table written to: {}", output_path.display());
    Ok(())
}
