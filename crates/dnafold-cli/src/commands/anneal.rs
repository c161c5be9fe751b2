use super::{load_sequence, load_table};
use crate::cli::AnnealArgs;
use crate::config::{self, defaults::DefaultsConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use dnafold::core::io::table::next_available_path;
use dnafold::engine::progress::ProgressReporter;
use dnafold::workflows;
use tracing::info;

pub fn run(args: AnnealArgs) -> Result<()> {
    let config = config::build_annealing_config(&args)?;
    let sequences = args
        .sequences
        .iter()
        .map(|path| load_sequence(path))
        .collect::<Result<Vec<_>>>()?;
    let table = load_table(args.table.table.as_deref())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Annealing over {} sequence(s) for at most {} iterations...",
        sequences.len(),
        config.max_iterations
    );
    let result = workflows::anneal::run(&sequences, &table, &config, &reporter)?;

    for (path, distance) in args.sequences.iter().zip(&result.distances) {
        println!("  {}: end-to-end distance {:.4} Å", path.display(), distance);
    }
    println!(
        "Final energy {:.4} after {} iteration(s).",
        result.energy, result.iterations
    );

    let prefix = args
        .output
        .unwrap_or_else(|| DefaultsConfig::default().anneal_output_prefix);
    let output_path = next_available_path(&prefix);
    info!("Saving annealed table to {:?}", output_path);
    result.table.save(&output_path)?;
    println!("✓ Table written to: {}", output_path.display());
    Ok(())
}
