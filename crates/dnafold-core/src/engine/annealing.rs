use super::config::{AnnealingConfig, DomainError};
use super::error::EngineError;
use crate::core::models::nucleotide::{Dinucleotide, Sequence};
use crate::core::models::rotation_table::{AngleSet, RotationTable};
use crate::core::trajectory::Trajectory;
use rand::Rng;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const LOG_INTERVAL: usize = 10;

/// Simulated annealing over a single rotation table, scored against several
/// sequences at once.
#[derive(Debug, Clone)]
pub struct Annealer<'a> {
    sequences: &'a [Sequence],
    state: RotationTable,
    energy: f64,
    iteration: usize,
    temperature: f64,
    cooling_factor: f64,
    max_iterations: usize,
    energy_threshold: f64,
}

impl<'a> Annealer<'a> {
    pub fn new(
        sequences: &'a [Sequence],
        initial_state: RotationTable,
        config: &AnnealingConfig,
    ) -> Result<Self, EngineError> {
        if sequences.is_empty() {
            return Err(DomainError::EmptySequenceSet.into());
        }
        let energy = total_energy(sequences, &initial_state);
        Ok(Self {
            sequences,
            state: initial_state,
            energy,
            iteration: 0,
            temperature: config.initial_temperature,
            cooling_factor: config.cooling_factor,
            max_iterations: config.max_iterations,
            energy_threshold: config.energy_threshold,
        })
    }

    pub fn state(&self) -> &RotationTable {
        &self.state
    }

    pub fn into_state(self) -> RotationTable {
        self.state
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Sum of the closure energies of every configured sequence under `state`.
    pub fn energy_of(&self, state: &RotationTable) -> f64 {
        total_energy(self.sequences, state)
    }

    /// Neighbouring state: twist and wedge of every dinucleotide move by at most a
    /// third of their tightest remaining margin. Direction is never perturbed.
    pub fn generate_new_state(&self, rng: &mut impl Rng) -> RotationTable {
        let mut next = self.state.clone();
        for dinucleotide in Dinucleotide::ALL {
            let [twist, wedge, _] = next.ranges(dinucleotide);
            let deltas = AngleSet::new(
                bounded_step(twist.tightest() / 3.0, rng),
                bounded_step(wedge.tightest() / 3.0, rng),
                0.0,
            );
            next.update_ranges_and_values(dinucleotide, deltas);
        }
        next
    }

    /// Metropolis acceptance probability for an energy increase.
    pub fn probability(energy_diff: f64, temperature: f64) -> f64 {
        (-energy_diff / temperature).exp()
    }

    /// Applies one geometric cooling step and returns the new temperature.
    pub fn cool(&mut self) -> f64 {
        self.temperature *= self.cooling_factor;
        self.temperature
    }

    pub fn is_terminal(&self) -> bool {
        self.iteration >= self.max_iterations || self.energy <= self.energy_threshold
    }

    /// Proposes one neighbour and accepts it if it lowers the energy, or otherwise
    /// with the Metropolis probability at the cooled temperature. Returns whether
    /// the proposal was accepted.
    pub fn iterate(&mut self, rng: &mut impl Rng) -> bool {
        let candidate = self.generate_new_state(rng);
        let candidate_energy = self.energy_of(&candidate);
        let temperature = self.cool();

        let accepted = candidate_energy < self.energy
            || rng.r#gen::<f64>() < Self::probability(candidate_energy - self.energy, temperature);
        trace!(
            iteration = self.iteration,
            candidate_energy, accepted, "Annealing proposal"
        );
        if accepted {
            self.state = candidate;
            self.energy = candidate_energy;
        }
        self.iteration += 1;

        if self.iteration % LOG_INTERVAL == 0 {
            debug!(
                "iteration: {}  energy: {:.2}  temperature: {:.2}",
                self.iteration, self.energy, self.temperature
            );
        }
        accepted
    }

    /// Iterates until the iteration cap or the energy threshold is reached.
    pub fn run(&mut self, rng: &mut impl Rng) -> &RotationTable {
        while !self.is_terminal() {
            self.iterate(rng);
        }
        &self.state
    }
}

fn bounded_step(bound: f64, rng: &mut impl Rng) -> f64 {
    if bound > 0.0 {
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}

fn total_energy(sequences: &[Sequence], state: &RotationTable) -> f64 {
    #[cfg(not(feature = "parallel"))]
    let iterator = sequences.iter();

    #[cfg(feature = "parallel")]
    let iterator = sequences.par_iter();

    // Summed in sequence order so a seeded run is reproducible bit for bit.
    let energies: Vec<f64> = iterator
        .map(|sequence| {
            let mut trajectory = Trajectory::new();
            trajectory.compute(sequence, state);
            trajectory.energy()
        })
        .collect();
    energies.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::rotation_table::Angle;
    use crate::engine::config::AnnealingConfigBuilder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(max_iterations: usize, energy_threshold: f64) -> AnnealingConfig {
        AnnealingConfigBuilder::new()
            .max_iterations(max_iterations)
            .energy_threshold(energy_threshold)
            .build()
            .unwrap()
    }

    fn sequences() -> Vec<Sequence> {
        vec![
            "ACGTTGCAACGTAGGCTAGCTTAG".parse().unwrap(),
            "GGCATTACGATCGATCGTAGCTAC".parse().unwrap(),
        ]
    }

    #[test]
    fn probability_saturates_at_zero_difference() {
        assert_eq!(Annealer::probability(0.0, 1.0), 1.0);
        assert_eq!(Annealer::probability(0.0, 150_000.0), 1.0);
        assert!(Annealer::probability(100.0, 100.0) < Annealer::probability(100.0, 1000.0));
    }

    #[test]
    fn cooling_is_geometric() {
        let seqs = sequences();
        let mut annealer = Annealer::new(&seqs, RotationTable::default(), &config(5, 0.0)).unwrap();
        assert!((annealer.cool() - 148_800.0).abs() < 1e-6);
        assert!((annealer.cool() - 148_800.0 * 0.992).abs() < 1e-6);
    }

    #[test]
    fn energy_sums_over_sequences() {
        let seqs = sequences();
        let table = RotationTable::default();
        let annealer = Annealer::new(&seqs, table.clone(), &config(5, 0.0)).unwrap();
        let expected: f64 = seqs
            .iter()
            .map(|s| {
                let mut t = Trajectory::new();
                t.compute(s, &table);
                t.energy()
            })
            .sum();
        assert!((annealer.energy() - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_sequence_set_is_rejected() {
        let result = Annealer::new(&[], RotationTable::default(), &config(5, 0.0));
        assert!(matches!(
            result,
            Err(EngineError::Domain {
                source: DomainError::EmptySequenceSet
            })
        ));
    }

    #[test]
    fn new_state_leaves_direction_and_original_untouched() {
        let seqs = sequences();
        let table = RotationTable::default();
        let annealer = Annealer::new(&seqs, table.clone(), &config(5, 0.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(21);

        let next = annealer.generate_new_state(&mut rng);

        assert_eq!(annealer.state(), &table);
        for d in Dinucleotide::ALL {
            assert_eq!(next.direction(d), table.direction(d));
            let bound = table.ranges(d)[0].tightest() / 3.0;
            assert!((next.twist(d) - table.twist(d)).abs() <= bound + 1e-12);
            assert!(next.is_within(&table));
        }
    }

    #[test]
    fn repeated_steps_stay_within_reference_window() {
        let seqs = sequences();
        let reference = RotationTable::default();
        let mut annealer = Annealer::new(&seqs, reference.clone(), &config(60, 0.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(22);
        annealer.run(&mut rng);
        assert!(annealer.state().is_within(&reference));
        for d in Dinucleotide::ALL {
            let [twist, wedge, _] = annealer.state().ranges(d);
            assert!(twist.below >= 0.0 && twist.above >= 0.0);
            assert!(wedge.below >= 0.0 && wedge.above >= 0.0);
            assert_eq!(annealer.state().entry(d).window(Angle::Direction).0, reference.direction(d));
        }
    }

    #[test]
    fn run_stops_at_iteration_cap() {
        let seqs = sequences();
        let mut annealer = Annealer::new(&seqs, RotationTable::default(), &config(25, 0.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(23);
        annealer.run(&mut rng);
        assert_eq!(annealer.iteration(), 25);
        assert!(annealer.is_terminal());
        assert!((annealer.temperature() - 150_000.0 * 0.992f64.powi(25)).abs() < 1e-6);
    }

    #[test]
    fn run_stops_immediately_below_energy_threshold() {
        let seqs = sequences();
        let mut annealer =
            Annealer::new(&seqs, RotationTable::default(), &config(25, f64::INFINITY)).unwrap();
        let mut rng = StdRng::seed_from_u64(24);
        annealer.run(&mut rng);
        assert_eq!(annealer.iteration(), 0);
    }

    #[test]
    fn energy_is_summed_in_sequence_order() {
        let seqs: Vec<Sequence> = [
            "ACGTTGCAACGTAGGCTAGCTTAG",
            "GGCATTACGATCGATCGTAGCTAC",
            "TTTTAAAACCCCGGGGATATCGCG",
            "AGCTAGCTAGGATCCATGCA",
            "CCGGAATTCCGGAATTGACT",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
        let table = RotationTable::default();
        let mut expected = 0.0;
        for sequence in &seqs {
            let mut trajectory = Trajectory::new();
            trajectory.compute(sequence, &table);
            expected += trajectory.energy();
        }
        for _ in 0..5 {
            assert_eq!(total_energy(&seqs, &table).to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let seqs = sequences();
        let run = |seed| {
            let mut annealer =
                Annealer::new(&seqs, RotationTable::default(), &config(30, 0.0)).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            annealer.run(&mut rng);
            (annealer.energy(), annealer.into_state())
        };
        assert_eq!(run(99), run(99));
    }
}
