use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileAnnealingConfig {
    pub max_iterations: Option<usize>,
    pub energy_threshold: Option<f64>,
    pub initial_temperature: Option<f64>,
    pub cooling_factor: Option<f64>,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileGeneticConfig {
    pub population_size: Option<usize>,
    pub strategy: Option<String>,
    pub selection_rate: Option<f64>,
    pub crossover_points: Option<usize>,
    pub mutation_rate: Option<f64>,
    pub mutation_threshold: Option<f64>,
    pub threshold_step: Option<f64>,
    pub threshold_period: Option<usize>,
    pub stagnation_limit: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub annealing: Option<FileAnnealingConfig>,
    pub genetic: Option<FileGeneticConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` if given, otherwise starts from an empty configuration.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
