use super::make_rng;
use crate::core::models::nucleotide::Sequence;
use crate::core::models::rotation_table::RotationTable;
use crate::engine::candidate::Candidate;
use crate::engine::config::GeneticConfig;
use crate::engine::error::EngineError;
use crate::engine::genetic::GeneticOptimizer;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct EvolveResult {
    pub best: Candidate,
    pub generations: usize,
    /// Whether every angle of the best table lies inside the reference windows.
    pub within_reference: bool,
}

#[instrument(skip_all, name = "evolve_workflow", fields(length = sequence.len(), population = config.population_size, strategy = %config.strategy))]
pub fn run(
    sequence: &Sequence,
    reference: &RotationTable,
    config: &GeneticConfig,
    reporter: &ProgressReporter,
) -> Result<EvolveResult, EngineError> {
    let mut rng = make_rng(config.seed);

    reporter.report(Progress::PhaseStart {
        name: "Initial Population",
    });
    let mut optimizer = GeneticOptimizer::new(sequence, reference, config, &mut rng);
    reporter.report(Progress::PhaseFinish);

    info!("Starting genetic search.");
    reporter.report(Progress::PhaseStart {
        name: "Genetic Search",
    });
    let best = optimizer.run(&mut rng, reporter)?.clone();
    reporter.report(Progress::PhaseFinish);

    let generations = optimizer.generation();
    info!(
        generations,
        best_score = ?best.score(),
        "Genetic search converged: {}",
        best
    );

    let within_reference = check_window(best.table(), reference, reporter);

    Ok(EvolveResult {
        best,
        generations,
        within_reference,
    })
}

/// Warns, and tells the reporter, when `table` has left the windows of `reference`.
fn check_window(table: &RotationTable, reference: &RotationTable, reporter: &ProgressReporter) -> bool {
    let Some((dinucleotide, angle)) = table.first_out_of_bounds(reference) else {
        return true;
    };
    let message = format!(
        "Best table leaves the reference window at {} ({}).",
        dinucleotide,
        angle.name()
    );
    warn!("{}", message);
    reporter.report(Progress::Message(message));
    false
}
