use super::noise::{Interval, NoiseBounds};
use crate::core::models::nucleotide::{Dinucleotide, Sequence};
use crate::core::models::rotation_table::{AngleSet, RotationTable};
use crate::core::trajectory::Trajectory;
use nalgebra::Point3;
use rand::Rng;
use std::fmt;

/// One member of a genetic population.
///
/// A candidate owns its table, its cached trajectory and its noise bounds.
/// `Clone` copies all three, so a cloned candidate never observes mutations made
/// to the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    table: RotationTable,
    trajectory: Trajectory,
    score: Option<f64>,
    noise: NoiseBounds,
}

impl Candidate {
    /// Unscored candidate whose noise bounds are the declared margins of `table`.
    pub fn new(table: RotationTable) -> Self {
        let noise = NoiseBounds::from_table(&table);
        Self {
            table,
            trajectory: Trajectory::new(),
            score: None,
            noise,
        }
    }

    pub fn table(&self) -> &RotationTable {
        &self.table
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = Some(score);
    }

    pub fn noise(&self) -> &NoiseBounds {
        &self.noise
    }

    pub fn last_point(&self) -> Option<&Point3<f64>> {
        self.trajectory.last_point()
    }

    pub fn into_table(self) -> RotationTable {
        self.table
    }

    /// Perturbs one dinucleotide within its remaining noise budget.
    pub fn apply_noise(&mut self, dinucleotide: Dinucleotide, rng: &mut impl Rng) -> AngleSet {
        self.noise.apply(&mut self.table, dinucleotide, rng)
    }

    /// Recomputes the trajectory for `sequence` and stores the distance of its
    /// last point from the origin as the score.
    pub fn evaluate(&mut self, sequence: &Sequence) -> f64 {
        self.trajectory.compute(sequence, &self.table);
        let score = self
            .trajectory
            .last_point()
            .map(|p| p.coords.norm())
            .unwrap_or(0.0);
        self.score = Some(score);
        score
    }

    /// Unscored copy used as the starting point of a crossover child.
    pub(crate) fn offspring(&self) -> Self {
        Self {
            table: self.table.clone(),
            trajectory: Trajectory::new(),
            score: None,
            noise: self.noise.clone(),
        }
    }

    /// Copies the angles and noise bounds of one dinucleotide from `donor`.
    pub(crate) fn inherit(&mut self, donor: &Candidate, dinucleotide: Dinucleotide) {
        self.table
            .set_angles(dinucleotide, donor.table.angles(dinucleotide));
        let intervals: [Interval; 3] = *donor.noise.get(dinucleotide);
        self.noise.set(dinucleotide, intervals);
    }
}

impl Default for Candidate {
    fn default() -> Self {
        Self::new(RotationTable::default())
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_point() {
            Some(p) => write!(f, "Last (x, y, z): ({:.4}, {:.4}, {:.4})", p.x, p.y, p.z)?,
            None => write!(f, "Last (x, y, z): -")?,
        }
        match self.score {
            Some(score) => write!(f, " | Score: {:.4}", score),
            None => write!(f, " | Score: -"),
        }
    }
}
