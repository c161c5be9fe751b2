use super::{load_sequence, load_table};
use crate::cli::FoldArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use dnafold::core::io::points::write_points_to_path;
use dnafold::engine::error::EngineError;
use dnafold::engine::progress::ProgressReporter;
use dnafold::workflows;
use tracing::info;

pub fn run(args: FoldArgs) -> Result<()> {
    let sequence = load_sequence(&args.sequence)?;
    let table = load_table(args.table.table.as_deref())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let result = workflows::fold::run(&sequence, &table, &reporter);

    if let Some(path) = &args.points {
        info!("Writing {} points to {:?}", result.trajectory.len(), path);
        write_points_to_path(&result.trajectory, path)
            .map_err(|e| CliError::Core(EngineError::from(e)))?;
        println!("Points written to: {}", path.display());
    }

    if let (Some(first), Some(last)) = (result.trajectory.first_point(), result.trajectory.last_point()) {
        println!(
            "First point: ({:.4}, {:.4}, {:.4})  Last point: ({:.4}, {:.4}, {:.4})",
            first.x, first.y, first.z, last.x, last.y, last.z
        );
    }
    println!("End-to-end distance: {:.4} Å", result.distance);
    Ok(())
}
