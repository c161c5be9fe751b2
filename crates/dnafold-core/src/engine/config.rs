use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum DomainError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("Parameter '{name}' must lie in {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error(
        "Selection rate {rate} leaves {survivors} parent(s) out of a generation of {population}; crossover needs at least 2"
    )]
    TooFewParents {
        rate: f64,
        population: usize,
        survivors: usize,
    },

    #[error("Unknown selection strategy: '{0}' (expected elitism, roulette or tournament)")]
    UnknownStrategy(String),

    #[error("Iteration cap must be positive")]
    ZeroIterations,

    #[error("At least one sequence is required")]
    EmptySequenceSet,
}

/// How survivors are chosen from a scored population. Lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionStrategy {
    /// Keep the best candidates in ascending score order.
    #[default]
    Elitism,
    /// Draw with replacement, with probability proportional to `1 / score`.
    Roulette,
    /// Repeatedly keep the better of two distinct random candidates.
    Tournament,
}

impl SelectionStrategy {
    pub const ALL: [SelectionStrategy; 3] = [
        SelectionStrategy::Elitism,
        SelectionStrategy::Roulette,
        SelectionStrategy::Tournament,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SelectionStrategy::Elitism => "elitism",
            SelectionStrategy::Roulette => "roulette",
            SelectionStrategy::Tournament => "tournament",
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elitism" | "elitisme" => Ok(SelectionStrategy::Elitism),
            "roulette" => Ok(SelectionStrategy::Roulette),
            "tournament" | "tournoi" => Ok(SelectionStrategy::Tournament),
            _ => Err(DomainError::UnknownStrategy(s.to_string())),
        }
    }
}

pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 150_000.0;
pub const DEFAULT_COOLING_FACTOR: f64 = 0.992;
pub const DEFAULT_ENERGY_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingConfig {
    pub max_iterations: usize,
    pub energy_threshold: f64,
    pub initial_temperature: f64,
    pub cooling_factor: f64,
    pub seed: Option<u64>,
}

#[derive(Default)]
pub struct AnnealingConfigBuilder {
    max_iterations: Option<usize>,
    energy_threshold: Option<f64>,
    initial_temperature: Option<f64>,
    cooling_factor: Option<f64>,
    seed: Option<u64>,
}

impl AnnealingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn energy_threshold(mut self, threshold: f64) -> Self {
        self.energy_threshold = Some(threshold);
        self
    }
    pub fn initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = Some(temperature);
        self
    }
    pub fn cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = Some(factor);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<AnnealingConfig, DomainError> {
        let max_iterations = self
            .max_iterations
            .ok_or(DomainError::MissingParameter("max_iterations"))?;
        if max_iterations == 0 {
            return Err(DomainError::ZeroIterations);
        }

        let initial_temperature = self
            .initial_temperature
            .unwrap_or(DEFAULT_INITIAL_TEMPERATURE);
        if !(initial_temperature > 0.0 && initial_temperature.is_finite()) {
            return Err(DomainError::OutOfRange {
                name: "initial_temperature",
                value: initial_temperature,
                expected: "(0, inf)",
            });
        }

        let cooling_factor = self.cooling_factor.unwrap_or(DEFAULT_COOLING_FACTOR);
        if !(cooling_factor > 0.0 && cooling_factor < 1.0) {
            return Err(DomainError::OutOfRange {
                name: "cooling_factor",
                value: cooling_factor,
                expected: "(0, 1)",
            });
        }

        Ok(AnnealingConfig {
            max_iterations,
            energy_threshold: self.energy_threshold.unwrap_or(DEFAULT_ENERGY_THRESHOLD),
            initial_temperature,
            cooling_factor,
            seed: self.seed,
        })
    }
}

pub const DEFAULT_SELECTION_RATE: f64 = 0.5;
pub const DEFAULT_CROSSOVER_POINTS: usize = 2;
pub const DEFAULT_MUTATION_RATE: f64 = 0.5;
pub const DEFAULT_MUTATION_THRESHOLD: f64 = 0.5;
pub const DEFAULT_THRESHOLD_STEP: f64 = 0.3;
pub const DEFAULT_THRESHOLD_PERIOD: usize = 5;
pub const DEFAULT_STAGNATION_LIMIT: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub strategy: SelectionStrategy,
    pub selection_rate: f64,
    pub crossover_points: usize,
    pub mutation_rate: f64,
    /// Initial probability threshold below which a generation mutates.
    pub mutation_threshold: f64,
    pub threshold_step: f64,
    /// Number of stagnant generations between two threshold increases.
    pub threshold_period: usize,
    pub stagnation_limit: usize,
    pub seed: Option<u64>,
}

#[derive(Default)]
pub struct GeneticConfigBuilder {
    population_size: Option<usize>,
    strategy: Option<SelectionStrategy>,
    selection_rate: Option<f64>,
    crossover_points: Option<usize>,
    mutation_rate: Option<f64>,
    mutation_threshold: Option<f64>,
    threshold_step: Option<f64>,
    threshold_period: Option<usize>,
    stagnation_limit: Option<usize>,
    seed: Option<u64>,
}

impl GeneticConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }
    pub fn strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn selection_rate(mut self, rate: f64) -> Self {
        self.selection_rate = Some(rate);
        self
    }
    pub fn crossover_points(mut self, n: usize) -> Self {
        self.crossover_points = Some(n);
        self
    }
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate);
        self
    }
    pub fn mutation_threshold(mut self, threshold: f64) -> Self {
        self.mutation_threshold = Some(threshold);
        self
    }
    pub fn threshold_step(mut self, step: f64) -> Self {
        self.threshold_step = Some(step);
        self
    }
    pub fn threshold_period(mut self, period: usize) -> Self {
        self.threshold_period = Some(period);
        self
    }
    pub fn stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = Some(limit);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<GeneticConfig, DomainError> {
        let population_size = self
            .population_size
            .ok_or(DomainError::MissingParameter("population_size"))?;
        if population_size < 2 {
            return Err(DomainError::PopulationTooSmall(population_size));
        }

        let selection_rate = self.selection_rate.unwrap_or(DEFAULT_SELECTION_RATE);
        check_rate("selection_rate", selection_rate)?;
        check_generation_sizes(selection_rate, population_size)?;

        let mutation_rate = self.mutation_rate.unwrap_or(DEFAULT_MUTATION_RATE);
        check_rate("mutation_rate", mutation_rate)?;

        let mutation_threshold = self
            .mutation_threshold
            .unwrap_or(DEFAULT_MUTATION_THRESHOLD);
        if !(mutation_threshold >= 0.0) {
            return Err(DomainError::OutOfRange {
                name: "mutation_threshold",
                value: mutation_threshold,
                expected: "[0, inf)",
            });
        }

        let threshold_step = self.threshold_step.unwrap_or(DEFAULT_THRESHOLD_STEP);
        if !(threshold_step >= 0.0) {
            return Err(DomainError::OutOfRange {
                name: "threshold_step",
                value: threshold_step,
                expected: "[0, inf)",
            });
        }

        let threshold_period = self.threshold_period.unwrap_or(DEFAULT_THRESHOLD_PERIOD);
        if threshold_period == 0 {
            return Err(DomainError::OutOfRange {
                name: "threshold_period",
                value: 0.0,
                expected: "[1, inf)",
            });
        }

        let stagnation_limit = self.stagnation_limit.unwrap_or(DEFAULT_STAGNATION_LIMIT);
        if stagnation_limit == 0 {
            return Err(DomainError::ZeroIterations);
        }

        Ok(GeneticConfig {
            population_size,
            strategy: self.strategy.unwrap_or_default(),
            selection_rate,
            crossover_points: self.crossover_points.unwrap_or(DEFAULT_CROSSOVER_POINTS),
            mutation_rate,
            mutation_threshold,
            threshold_step,
            threshold_period,
            stagnation_limit,
            seed: self.seed,
        })
    }
}

fn check_rate(name: &'static str, rate: f64) -> Result<(), DomainError> {
    if rate > 0.0 && rate <= 1.0 {
        Ok(())
    } else {
        Err(DomainError::OutOfRange {
            name,
            value: rate,
            expected: "(0, 1]",
        })
    }
}

/// Follows the size of successive generations (selection, then crossover with
/// the parity fix) until it stops shrinking, and fails if any selection would
/// leave fewer than two parents.
fn check_generation_sizes(rate: f64, population_size: usize) -> Result<(), DomainError> {
    let mut size = population_size;
    loop {
        let survivors = keep_count(rate, size);
        if survivors < 2 {
            return Err(DomainError::TooFewParents {
                rate,
                population: size,
                survivors,
            });
        }
        let next = next_generation_size(survivors);
        if next >= size {
            return Ok(());
        }
        size = next;
    }
}

/// Size after crossover appends one child per survivor in each disjoint pair,
/// rounded down to an even count.
fn next_generation_size(survivors: usize) -> usize {
    let total = survivors + 2 * (survivors / 2);
    total - total % 2
}

/// Number of candidates a rate keeps out of `size`, rounded half away from zero.
pub fn keep_count(rate: f64, size: usize) -> usize {
    (rate * size as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_parses_english_and_french_names() {
        assert_eq!("elitism".parse(), Ok(SelectionStrategy::Elitism));
        assert_eq!("elitisme".parse(), Ok(SelectionStrategy::Elitism));
        assert_eq!("Roulette".parse(), Ok(SelectionStrategy::Roulette));
        assert_eq!("tournoi".parse(), Ok(SelectionStrategy::Tournament));
        assert_eq!(
            "random".parse::<SelectionStrategy>(),
            Err(DomainError::UnknownStrategy("random".to_string()))
        );
    }

    #[test]
    fn annealing_builder_applies_defaults() {
        let config = AnnealingConfigBuilder::new()
            .max_iterations(100)
            .build()
            .unwrap();
        assert_eq!(config.initial_temperature, 150_000.0);
        assert_eq!(config.cooling_factor, 0.992);
        assert_eq!(config.energy_threshold, 10.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn annealing_builder_rejects_invalid_parameters() {
        assert_eq!(
            AnnealingConfigBuilder::new().build(),
            Err(DomainError::MissingParameter("max_iterations"))
        );
        assert_eq!(
            AnnealingConfigBuilder::new().max_iterations(0).build(),
            Err(DomainError::ZeroIterations)
        );
        assert!(matches!(
            AnnealingConfigBuilder::new()
                .max_iterations(1)
                .cooling_factor(1.0)
                .build(),
            Err(DomainError::OutOfRange { name: "cooling_factor", .. })
        ));
        assert!(matches!(
            AnnealingConfigBuilder::new()
                .max_iterations(1)
                .initial_temperature(-5.0)
                .build(),
            Err(DomainError::OutOfRange { name: "initial_temperature", .. })
        ));
    }

    #[test]
    fn genetic_builder_applies_defaults() {
        let config = GeneticConfigBuilder::new()
            .population_size(10)
            .build()
            .unwrap();
        assert_eq!(config.strategy, SelectionStrategy::Elitism);
        assert_eq!(config.selection_rate, 0.5);
        assert_eq!(config.crossover_points, 2);
        assert_eq!(config.mutation_rate, 0.5);
        assert_eq!(config.mutation_threshold, 0.5);
        assert_eq!(config.threshold_step, 0.3);
        assert_eq!(config.threshold_period, 5);
        assert_eq!(config.stagnation_limit, 40);
    }

    #[test]
    fn genetic_builder_rejects_invalid_parameters() {
        assert_eq!(
            GeneticConfigBuilder::new().population_size(1).build(),
            Err(DomainError::PopulationTooSmall(1))
        );
        assert!(matches!(
            GeneticConfigBuilder::new()
                .population_size(10)
                .selection_rate(0.0)
                .build(),
            Err(DomainError::OutOfRange { name: "selection_rate", .. })
        ));
        assert!(matches!(
            GeneticConfigBuilder::new()
                .population_size(10)
                .selection_rate(1.5)
                .build(),
            Err(DomainError::OutOfRange { name: "selection_rate", .. })
        ));
        assert!(matches!(
            GeneticConfigBuilder::new()
                .population_size(2)
                .selection_rate(0.2)
                .build(),
            Err(DomainError::TooFewParents { population: 2, survivors: 0, .. })
        ));
    }

    #[test]
    fn pair_of_candidates_cannot_survive_half_selection() {
        assert_eq!(
            GeneticConfigBuilder::new().population_size(2).build(),
            Err(DomainError::TooFewParents {
                rate: 0.5,
                population: 2,
                survivors: 1,
            })
        );
    }

    #[test]
    fn shrinking_generations_are_rejected_before_the_run() {
        // 10 -> 3 survivors -> 4 after crossover -> 1 survivor.
        assert_eq!(
            GeneticConfigBuilder::new()
                .population_size(10)
                .selection_rate(0.3)
                .build(),
            Err(DomainError::TooFewParents {
                rate: 0.3,
                population: 4,
                survivors: 1,
            })
        );
    }

    #[test]
    fn stable_generation_sizes_are_accepted() {
        for size in [3, 4, 5, 6, 7, 8, 10, 20, 50, 100, 200] {
            assert!(
                GeneticConfigBuilder::new().population_size(size).build().is_ok(),
                "population {}",
                size
            );
        }
        assert!(GeneticConfigBuilder::new()
            .population_size(2)
            .selection_rate(1.0)
            .build()
            .is_ok());
    }

    #[test]
    fn generation_size_follows_crossover_parity() {
        assert_eq!(next_generation_size(5), 8);
        assert_eq!(next_generation_size(4), 8);
        assert_eq!(next_generation_size(3), 4);
        assert_eq!(next_generation_size(2), 4);
    }

    #[test]
    fn keep_count_rounds_half_away_from_zero() {
        assert_eq!(keep_count(0.5, 10), 5);
        assert_eq!(keep_count(0.5, 5), 3);
        assert_eq!(keep_count(0.5, 1), 1);
        assert_eq!(keep_count(0.3, 4), 1);
    }
}
