use super::evolve;
use crate::core::models::nucleotide::Sequence;
use crate::core::models::rotation_table::RotationTable;
use crate::engine::config::{GeneticConfig, GeneticConfigBuilder, SelectionStrategy};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

pub const DEFAULT_POPULATION_SIZES: [usize; 4] = [20, 50, 100, 200];

#[derive(Debug, Clone, PartialEq)]
pub struct SurveyEntry {
    pub strategy: SelectionStrategy,
    pub population_size: usize,
    pub best_score: f64,
    pub generations: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SurveyResult {
    pub entries: Vec<SurveyEntry>,
}

impl SurveyResult {
    pub fn score(&self, strategy: SelectionStrategy, population_size: usize) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.strategy == strategy && e.population_size == population_size)
            .map(|e| e.best_score)
    }

    /// Entry with the lowest best score across the whole grid.
    pub fn overall_best(&self) -> Option<&SurveyEntry> {
        self.entries
            .iter()
            .min_by(|a, b| a.best_score.total_cmp(&b.best_score))
    }
}

/// Runs one genetic search per (strategy, population size) pair. Each run reuses
/// `base` for every other parameter; a base seed is offset by the run index so
/// that runs are independent but reproducible.
#[instrument(skip_all, name = "survey_workflow", fields(runs = strategies.len() * population_sizes.len()))]
pub fn run(
    sequence: &Sequence,
    reference: &RotationTable,
    base: &GeneticConfig,
    population_sizes: &[usize],
    strategies: &[SelectionStrategy],
    reporter: &ProgressReporter,
) -> Result<SurveyResult, EngineError> {
    let runs: Vec<GeneticConfig> = strategies
        .iter()
        .flat_map(|&strategy| population_sizes.iter().map(move |&size| (strategy, size)))
        .enumerate()
        .map(|(index, (strategy, size))| {
            GeneticConfigBuilder::new()
                .population_size(size)
                .strategy(strategy)
                .selection_rate(base.selection_rate)
                .crossover_points(base.crossover_points)
                .mutation_rate(base.mutation_rate)
                .mutation_threshold(base.mutation_threshold)
                .threshold_step(base.threshold_step)
                .threshold_period(base.threshold_period)
                .stagnation_limit(base.stagnation_limit)
                .seed(base.seed.map(|seed| seed.wrapping_add(index as u64)))
                .build()
        })
        .collect::<Result<_, _>>()?;

    reporter.report(Progress::PhaseStart { name: "Survey" });
    reporter.report(Progress::TaskStart {
        total_steps: runs.len() as u64,
    });

    let silent = ProgressReporter::new();
    let mut result = SurveyResult::default();
    for config in &runs {
        let outcome = evolve::run(sequence, reference, config, &silent)?;
        let best_score = outcome
            .best
            .score()
            .ok_or_else(|| EngineError::Internal("surveyed best candidate has no score".to_string()))?;
        info!(
            strategy = %config.strategy,
            population = config.population_size,
            best_score,
            "Survey run finished."
        );
        result.entries.push(SurveyEntry {
            strategy: config.strategy,
            population_size: config.population_size,
            best_score,
            generations: outcome.generations,
        });
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    Ok(result)
}
