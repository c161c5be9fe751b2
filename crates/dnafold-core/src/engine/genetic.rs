use super::candidate::Candidate;
use super::config::GeneticConfig;
use super::error::EngineError;
use super::population::Population;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::nucleotide::Sequence;
use crate::core::models::rotation_table::RotationTable;
use rand::Rng;
use tracing::debug;

/// Generational search: selection, crossover, mutation and rescoring, repeated
/// until the best score stops improving for `stagnation_limit` generations.
#[derive(Debug, Clone)]
pub struct GeneticOptimizer<'a> {
    sequence: &'a Sequence,
    config: GeneticConfig,
    population: Population,
    best_score: Option<f64>,
    threshold: f64,
    stagnation: usize,
    generation: usize,
}

impl<'a> GeneticOptimizer<'a> {
    /// Builds and scores the first generation from `template`.
    pub fn new(
        sequence: &'a Sequence,
        template: &RotationTable,
        config: &GeneticConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let mut population = Population::seeded(config.population_size, template, rng);
        population.refresh_scores(sequence);
        Self {
            sequence,
            config: config.clone(),
            population,
            best_score: None,
            threshold: config.mutation_threshold,
            stagnation: 0,
            generation: 0,
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.population.best()
    }

    pub fn best_score(&self) -> Option<f64> {
        self.best_score
    }

    /// Current mutation threshold; grows while the search stagnates.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.stagnation >= self.config.stagnation_limit
    }

    /// Runs one generation. Returns whether the best score improved.
    pub fn step(&mut self, rng: &mut impl Rng) -> Result<bool, EngineError> {
        let survivors =
            self.population
                .select(self.config.strategy, self.config.selection_rate, rng)?;
        if survivors == 0 {
            return Err(EngineError::PopulationCollapsed {
                generation: self.generation,
                size: survivors,
            });
        }
        self.population.crossover(self.config.crossover_points, rng);
        self.population
            .mutate(self.threshold, self.config.mutation_rate, rng);
        self.population.refresh_scores(self.sequence);
        self.generation += 1;

        let current = self.population.best_score();
        let improved = match (current, self.best_score) {
            (Some(new), Some(old)) => new < old,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if improved {
            self.best_score = current;
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
            if self.stagnation % self.config.threshold_period == 0 {
                self.threshold += self.config.threshold_step;
            }
        }

        debug!(
            generation = self.generation,
            stagnation = self.stagnation,
            threshold = self.threshold,
            population = self.population.len(),
            "Best score: {:?}",
            self.best_score
        );
        Ok(improved)
    }

    /// Iterates generations until stagnation and returns the best candidate.
    pub fn run(
        &mut self,
        rng: &mut impl Rng,
        reporter: &ProgressReporter,
    ) -> Result<&Candidate, EngineError> {
        while !self.is_finished() {
            self.step(rng)?;
            reporter.report(Progress::Generation {
                index: self.generation,
                best_score: self.best_score.unwrap_or(f64::INFINITY),
                stagnation: self.stagnation,
            });
        }
        self.population
            .best()
            .ok_or_else(|| EngineError::Internal("no candidate was ever selected".to_string()))
    }
}
