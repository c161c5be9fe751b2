use dnafold::workflows::survey::DEFAULT_POPULATION_SIZES;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub max_iterations: usize,
    pub energy_threshold: f64,
    pub population_size: usize,
    pub anneal_output_prefix: PathBuf,
    pub genetic_output_prefix: PathBuf,
    pub survey_sizes: Vec<usize>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            energy_threshold: 10.0,
            population_size: 10,
            anneal_output_prefix: PathBuf::from("results/anneal_result"),
            genetic_output_prefix: PathBuf::from("results/genetic_result"),
            survey_sizes: DEFAULT_POPULATION_SIZES.to_vec(),
        }
    }
}
