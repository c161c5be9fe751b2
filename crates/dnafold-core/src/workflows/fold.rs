use crate::core::models::nucleotide::Sequence;
use crate::core::models::rotation_table::RotationTable;
use crate::core::trajectory::Trajectory;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct FoldResult {
    pub trajectory: Trajectory,
    pub distance: f64,
    pub energy: f64,
}

#[instrument(skip_all, name = "fold_workflow", fields(length = sequence.len()))]
pub fn run(sequence: &Sequence, table: &RotationTable, reporter: &ProgressReporter) -> FoldResult {
    reporter.report(Progress::PhaseStart { name: "Folding" });

    let mut trajectory = Trajectory::new();
    trajectory.compute(sequence, table);
    let energy = trajectory.energy();
    let distance = energy.sqrt();
    info!(distance, "Computed trajectory of {} points.", trajectory.len());

    reporter.report(Progress::PhaseFinish);
    FoldResult {
        trajectory,
        distance,
        energy,
    }
}
