use super::load_table;
use crate::cli::CleanArgs;
use crate::error::{CliError, Result};
use dnafold::core::io::clean::clean_table;
use dnafold::core::models::rotation_table::RotationTable;
use dnafold::engine::error::EngineError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: CleanArgs) -> Result<()> {
    let reference = load_table(args.reference.as_deref())?;
    info!("Loading table to clean from {:?}", args.input);
    let table = RotationTable::load(&args.input)?;

    let report =
        clean_table(&reference, &table).map_err(|e| CliError::Core(EngineError::from(e)))?;
    for code in &report.corrected {
        warn!("Margins of {} disagreed with the reference and were rewritten.", code);
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| cleaned_path(&args.input));
    report.table.save(&output_path)?;
    println!(
        "✓ {} entr{} corrected, table written to: {}",
        report.corrected.len(),
        if report.corrected.len() == 1 { "y" } else { "ies" },
        output_path.display()
    );
    Ok(())
}

/// `cleaned_<name>` next to the input.
fn cleaned_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table.json".to_string());
    input.with_file_name(format!("cleaned_{}", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use tempfile::tempdir;

    fn clean_args(argv: &[&str]) -> CleanArgs {
        match Cli::parse_from(argv).command {
            Commands::Clean(args) => args,
            other => panic!("Expected 'clean' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn consistent_table_is_written_to_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.json");
        let output = dir.path().join("cleaned.json");
        RotationTable::default().save(&input).unwrap();

        run(clean_args(&[
            "dnafold",
            "clean",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]))
        .unwrap();

        let cleaned = RotationTable::load(&output).unwrap();
        assert!(cleaned.is_within(&RotationTable::default()));
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent.json");
        assert!(run(clean_args(&["dnafold", "clean", "-i", input.to_str().unwrap()])).is_err());
    }

    #[test]
    fn default_output_leaves_the_input_untouched() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("genetic_result1.json");
        RotationTable::default().save(&input).unwrap();
        let before = std::fs::read_to_string(&input).unwrap();

        run(clean_args(&["dnafold", "clean", "-i", input.to_str().unwrap()])).unwrap();

        assert_eq!(std::fs::read_to_string(&input).unwrap(), before);
        let cleaned = dir.path().join("cleaned_genetic_result1.json");
        assert_eq!(cleaned_path(&input), cleaned);
        assert!(RotationTable::load(&cleaned).unwrap().is_within(&RotationTable::default()));
    }
}
