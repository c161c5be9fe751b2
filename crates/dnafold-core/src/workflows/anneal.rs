use super::make_rng;
use crate::core::models::nucleotide::Sequence;
use crate::core::models::rotation_table::RotationTable;
use crate::core::trajectory::Trajectory;
use crate::engine::annealing::Annealer;
use crate::engine::config::AnnealingConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct AnnealResult {
    pub table: RotationTable,
    pub energy: f64,
    pub iterations: usize,
    /// End-to-end distance of each input sequence under the final table.
    pub distances: Vec<f64>,
}

#[instrument(skip_all, name = "anneal_workflow", fields(sequences = sequences.len()))]
pub fn run(
    sequences: &[Sequence],
    initial_table: &RotationTable,
    config: &AnnealingConfig,
    reporter: &ProgressReporter,
) -> Result<AnnealResult, EngineError> {
    let mut rng = make_rng(config.seed);
    let mut annealer = Annealer::new(sequences, initial_table.clone(), config)?;
    info!(
        initial_energy = annealer.energy(),
        "Starting simulated annealing for at most {} iterations.",
        config.max_iterations
    );

    reporter.report(Progress::PhaseStart {
        name: "Simulated Annealing",
    });
    reporter.report(Progress::TaskStart {
        total_steps: config.max_iterations as u64,
    });
    while !annealer.is_terminal() {
        annealer.iterate(&mut rng);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let iterations = annealer.iteration();
    let energy = annealer.energy();
    info!(
        iterations,
        energy,
        temperature = annealer.temperature(),
        "Simulated annealing finished."
    );

    let table = annealer.into_state();
    let distances = sequences
        .iter()
        .map(|sequence| {
            let mut trajectory = Trajectory::new();
            trajectory.compute(sequence, &table);
            trajectory.distance()
        })
        .collect();

    Ok(AnnealResult {
        table,
        energy,
        iterations,
        distances,
    })
}
