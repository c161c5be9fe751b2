use crate::core::models::nucleotide::{Dinucleotide, Sequence};
use crate::core::models::rotation_table::RotationTable;
use crate::core::utils::geometry::{step_transform, transform_origin};
use nalgebra::{Matrix4, Point3};

/// 3D positions of every nucleotide of a sequence, rebuilt from scratch on each
/// [`Trajectory::compute`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<Point3<f64>>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composes one step transform per dinucleotide and records the image of the
    /// origin after each step. The first point is the origin itself.
    pub fn compute(&mut self, sequence: &Sequence, table: &RotationTable) {
        self.points.clear();
        if sequence.is_empty() {
            return;
        }
        self.points.reserve(sequence.len());
        self.points.push(Point3::origin());

        let mut steps: [Option<Matrix4<f64>>; Dinucleotide::COUNT] = [None; Dinucleotide::COUNT];
        let mut total = Matrix4::<f64>::identity();

        for dinucleotide in sequence.dinucleotides() {
            let step = *steps[dinucleotide.index()]
                .get_or_insert_with(|| step_transform(&table.angles(dinucleotide)));
            total *= step;
            self.points.push(transform_origin(&total));
        }
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_point(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    pub fn last_point(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }

    /// Squared distance between the first and last points; zero for trajectories
    /// shorter than two points.
    pub fn energy(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (last - first).norm_squared(),
            _ => 0.0,
        }
    }

    pub fn distance(&self) -> f64 {
        self.energy().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::rotation_table::AngleSet;
    use crate::core::utils::geometry::RISE;

    fn seq(s: &str) -> Sequence {
        s.parse().unwrap()
    }

    fn straight_table() -> RotationTable {
        let mut table = RotationTable::default();
        for d in Dinucleotide::ALL {
            table.set_angles(d, AngleSet::new(0.0, 0.0, 0.0));
        }
        table
    }

    #[test]
    fn trajectory_has_one_point_per_nucleotide_starting_at_origin() {
        let mut traj = Trajectory::new();
        traj.compute(&seq("AAGCTTGA"), &RotationTable::default());
        assert_eq!(traj.len(), 8);
        assert_eq!(traj.first_point(), Some(&Point3::origin()));
    }

    #[test]
    fn compute_is_deterministic() {
        let table = RotationTable::default();
        let sequence = seq("ATGCGTACGTTAGCCAT");
        let mut a = Trajectory::new();
        let mut b = Trajectory::new();
        a.compute(&sequence, &table);
        b.compute(&sequence, &table);
        assert_eq!(a, b);
        assert_eq!(a.energy().to_bits(), b.energy().to_bits());
    }

    #[test]
    fn straight_table_produces_linear_rise() {
        let mut traj = Trajectory::new();
        traj.compute(&seq("ACGTA"), &straight_table());
        let last = traj.last_point().unwrap();
        assert!(last.x.abs() < 1e-9);
        assert!(last.y.abs() < 1e-9);
        assert!((last.z + 4.0 * RISE).abs() < 1e-9);
        assert!((traj.distance() - 4.0 * RISE).abs() < 1e-9);
    }

    #[test]
    fn distance_is_square_root_of_energy() {
        let mut traj = Trajectory::new();
        traj.compute(&seq("AGCTCGTA"), &RotationTable::default());
        assert!(traj.energy() >= 0.0);
        assert_eq!(traj.distance(), traj.energy().sqrt());
    }

    #[test]
    fn bent_table_closes_more_than_straight_one() {
        let sequence = seq("AGCTCGTAAGCTCGTAAGCTCGTA");
        let mut bent = Trajectory::new();
        let mut straight = Trajectory::new();
        bent.compute(&sequence, &RotationTable::default());
        straight.compute(&sequence, &straight_table());
        assert!(straight.energy() > bent.energy());
    }

    #[test]
    fn degenerate_sequences_have_zero_distance() {
        let table = RotationTable::default();
        let mut traj = Trajectory::new();

        traj.compute(&seq(""), &table);
        assert!(traj.is_empty());
        assert_eq!(traj.energy(), 0.0);

        traj.compute(&seq("G"), &table);
        assert_eq!(traj.len(), 1);
        assert_eq!(traj.distance(), 0.0);
    }

    #[test]
    fn recompute_replaces_previous_points() {
        let table = RotationTable::default();
        let mut traj = Trajectory::new();
        traj.compute(&seq("ACGTACGT"), &table);
        traj.compute(&seq("AC"), &table);
        assert_eq!(traj.len(), 2);
    }

    #[test]
    fn changing_one_dinucleotide_changes_the_shape() {
        let sequence = seq("AAAAAA");
        let mut table = RotationTable::default();
        let mut before = Trajectory::new();
        before.compute(&sequence, &table);

        table.set_wedge("AA".parse().unwrap(), 0.0);
        let mut after = Trajectory::new();
        after.compute(&sequence, &table);

        assert_ne!(before.last_point(), after.last_point());
    }
}
