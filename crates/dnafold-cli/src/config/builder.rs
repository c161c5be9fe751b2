use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{AnnealArgs, GeneticOverrides};
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use dnafold::engine::config::{
    AnnealingConfig, AnnealingConfigBuilder, GeneticConfig, GeneticConfigBuilder,
    SelectionStrategy,
};

pub fn build_annealing_config(args: &AnnealArgs) -> Result<AnnealingConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::load_optional(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    let file = file_config.annealing.take().unwrap_or_default();

    let mut builder = AnnealingConfigBuilder::new()
        .max_iterations(
            args.max_iterations
                .or(file.max_iterations)
                .unwrap_or(defaults.max_iterations),
        )
        .energy_threshold(
            args.energy_threshold
                .or(file.energy_threshold)
                .unwrap_or(defaults.energy_threshold),
        )
        .seed(args.seed.or(file.seed));
    if let Some(temperature) = file.initial_temperature {
        builder = builder.initial_temperature(temperature);
    }
    if let Some(factor) = file.cooling_factor {
        builder = builder.cooling_factor(factor);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Resolves the genetic parameters. `population_size` is the command's own flag,
/// which outranks the file and the `-S` overrides.
pub fn build_genetic_config(
    overrides: &GeneticOverrides,
    population_size: Option<usize>,
) -> Result<GeneticConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::load_optional(overrides.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &overrides.set_values)?;
    let file = file_config.genetic.take().unwrap_or_default();

    let strategy = match (overrides.strategy, file.strategy.as_deref()) {
        (Some(strategy), _) => strategy,
        (None, Some(name)) => name
            .parse::<SelectionStrategy>()
            .map_err(|e| CliError::Config(e.to_string()))?,
        (None, None) => SelectionStrategy::default(),
    };

    let mut builder = GeneticConfigBuilder::new()
        .population_size(
            population_size
                .or(file.population_size)
                .unwrap_or(defaults.population_size),
        )
        .strategy(strategy)
        .seed(overrides.seed.or(file.seed));
    if let Some(rate) = overrides.selection_rate.or(file.selection_rate) {
        builder = builder.selection_rate(rate);
    }
    if let Some(points) = overrides.crossover_points.or(file.crossover_points) {
        builder = builder.crossover_points(points);
    }
    if let Some(rate) = file.mutation_rate {
        builder = builder.mutation_rate(rate);
    }
    if let Some(threshold) = file.mutation_threshold {
        builder = builder.mutation_threshold(threshold);
    }
    if let Some(step) = file.threshold_step {
        builder = builder.threshold_step(step);
    }
    if let Some(period) = file.threshold_period {
        builder = builder.threshold_period(period);
    }
    if let Some(limit) = file.stagnation_limit {
        builder = builder.stagnation_limit(limit);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) = parser::parse_key_value(kv_pair).map_err(config_error)?;

        match key {
            "annealing.max-iterations" => {
                config.annealing.get_or_insert_with(Default::default).max_iterations =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "annealing.energy-threshold" => {
                config.annealing.get_or_insert_with(Default::default).energy_threshold =
                    Some(parser::parse_value(key, value, "float").map_err(config_error)?);
            }
            "annealing.initial-temperature" => {
                config
                    .annealing
                    .get_or_insert_with(Default::default)
                    .initial_temperature =
                    Some(parser::parse_value(key, value, "float").map_err(config_error)?);
            }
            "annealing.cooling-factor" => {
                config.annealing.get_or_insert_with(Default::default).cooling_factor =
                    Some(parser::parse_value(key, value, "float").map_err(config_error)?);
            }
            "annealing.seed" => {
                config.annealing.get_or_insert_with(Default::default).seed =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "genetic.population-size" => {
                config.genetic.get_or_insert_with(Default::default).population_size =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "genetic.strategy" => {
                config.genetic.get_or_insert_with(Default::default).strategy =
                    Some(value.to_string());
            }
            "genetic.selection-rate" => {
                config.genetic.get_or_insert_with(Default::default).selection_rate =
                    Some(parser::parse_value(key, value, "float").map_err(config_error)?);
            }
            "genetic.crossover-points" => {
                config.genetic.get_or_insert_with(Default::default).crossover_points =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "genetic.mutation-rate" => {
                config.genetic.get_or_insert_with(Default::default).mutation_rate =
                    Some(parser::parse_value(key, value, "float").map_err(config_error)?);
            }
            "genetic.mutation-threshold" => {
                config
                    .genetic
                    .get_or_insert_with(Default::default)
                    .mutation_threshold =
                    Some(parser::parse_value(key, value, "float").map_err(config_error)?);
            }
            "genetic.threshold-step" => {
                config.genetic.get_or_insert_with(Default::default).threshold_step =
                    Some(parser::parse_value(key, value, "float").map_err(config_error)?);
            }
            "genetic.threshold-period" => {
                config.genetic.get_or_insert_with(Default::default).threshold_period =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "genetic.stagnation-limit" => {
                config.genetic.get_or_insert_with(Default::default).stagnation_limit =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "genetic.seed" => {
                config.genetic.get_or_insert_with(Default::default).seed =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn config_error(e: ParseError) -> CliError {
    CliError::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use dnafold::engine::config::{DEFAULT_COOLING_FACTOR, DEFAULT_STAGNATION_LIMIT};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::{TempDir, tempdir};

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("dnafold.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn anneal_args(extra: &[&str]) -> AnnealArgs {
        let mut argv = vec!["dnafold", "anneal", "-s", "plasmid.fasta"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Anneal(args) => args,
            other => panic!("Expected 'anneal' subcommand, got {:?}", other),
        }
    }

    fn evolve_args(extra: &[&str]) -> (GeneticOverrides, Option<usize>) {
        let mut argv = vec!["dnafold", "evolve", "-s", "plasmid.fasta"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Evolve(args) => (args.genetic, args.population_size),
            other => panic!("Expected 'evolve' subcommand, got {:?}", other),
        }
    }

    fn path_str(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn annealing_defaults_apply_without_file() {
        let config = build_annealing_config(&anneal_args(&[])).unwrap();
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.energy_threshold, 10.0);
        assert_eq!(config.cooling_factor, DEFAULT_COOLING_FACTOR);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn cli_flags_override_file_and_set_values() {
        let dir = tempdir().unwrap();
        let path = write_config(
            &dir,
            "[annealing]\nmax-iterations = 500\ncooling-factor = 0.9\nseed = 3\n",
        );
        let args = anneal_args(&[
            "-c",
            path_str(&path),
            "-i",
            "42",
            "-S",
            "annealing.cooling-factor=0.95",
        ]);

        let config = build_annealing_config(&args).unwrap();
        assert_eq!(config.max_iterations, 42);
        assert_eq!(config.cooling_factor, 0.95);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn invalid_annealing_values_are_config_errors() {
        let args = anneal_args(&["-S", "annealing.cooling-factor=1.5"]);
        assert!(matches!(
            build_annealing_config(&args),
            Err(CliError::Config(_))
        ));

        let args = anneal_args(&["-S", "annealing.max-iterations=many"]);
        assert!(matches!(
            build_annealing_config(&args),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn unsupported_set_key_is_rejected() {
        let args = anneal_args(&["-S", "annealing.steps=3"]);
        match build_annealing_config(&args) {
            Err(CliError::Config(msg)) => assert!(msg.contains("annealing.steps")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn genetic_config_merges_all_layers() {
        let dir = tempdir().unwrap();
        let path = write_config(
            &dir,
            "[genetic]\npopulation-size = 30\nstrategy = \"roulette\"\nmutation-rate = 0.25\n",
        );
        let (overrides, size) = evolve_args(&[
            "-c",
            path_str(&path),
            "--strategy",
            "tournament",
            "-S",
            "genetic.stagnation-limit=12",
            "--seed",
            "9",
        ]);

        let config = build_genetic_config(&overrides, size).unwrap();
        assert_eq!(config.population_size, 30);
        assert_eq!(config.strategy, SelectionStrategy::Tournament);
        assert_eq!(config.mutation_rate, 0.25);
        assert_eq!(config.stagnation_limit, 12);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn genetic_defaults_apply_without_file() {
        let (overrides, size) = evolve_args(&[]);
        let config = build_genetic_config(&overrides, size).unwrap();
        assert_eq!(config.population_size, 10);
        assert_eq!(config.strategy, SelectionStrategy::Elitism);
        assert_eq!(config.stagnation_limit, DEFAULT_STAGNATION_LIMIT);
    }

    #[test]
    fn population_flag_outranks_file() {
        let dir = tempdir().unwrap();
        let path = write_config(&dir, "[genetic]\npopulation-size = 30\n");
        let (overrides, size) = evolve_args(&["-c", path_str(&path), "-p", "16"]);
        assert_eq!(build_genetic_config(&overrides, size).unwrap().population_size, 16);
    }

    #[test]
    fn unknown_strategy_in_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = write_config(&dir, "[genetic]\nstrategy = \"lottery\"\n");
        let (overrides, size) = evolve_args(&["-c", path_str(&path)]);
        match build_genetic_config(&overrides, size) {
            Err(CliError::Config(msg)) => assert!(msg.contains("lottery")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn population_of_one_is_rejected() {
        let (overrides, size) = evolve_args(&["-p", "1"]);
        assert!(matches!(
            build_genetic_config(&overrides, size),
            Err(CliError::Config(_))
        ));
    }
}
