pub mod anneal;
pub mod clean;
pub mod evolve;
pub mod fold;
pub mod survey;

use crate::error::{CliError, Result};
use dnafold::core::io::sequence::read_sequence;
use dnafold::core::models::nucleotide::Sequence;
use dnafold::core::models::rotation_table::RotationTable;
use dnafold::engine::error::EngineError;
use std::path::Path;
use tracing::info;

/// Loads the table at `path`, or the bundled default table.
pub(crate) fn load_table(path: Option<&Path>) -> Result<RotationTable> {
    match path {
        Some(path) => {
            info!("Loading rotation table from {:?}", path);
            Ok(RotationTable::load(path)?)
        }
        None => {
            info!("Using the bundled rotation table.");
            Ok(RotationTable::default())
        }
    }
}

pub(crate) fn load_sequence(path: &Path) -> Result<Sequence> {
    info!("Loading sequence from {:?}", path);
    let sequence = read_sequence(path).map_err(|e| CliError::Core(EngineError::from(e)))?;
    if sequence.is_empty() {
        return Err(CliError::Argument(format!(
            "Sequence file {:?} contains no nucleotides.",
            path
        )));
    }
    info!("Read {} nucleotides.", sequence.len());
    Ok(sequence)
}
