use crate::core::models::nucleotide::Dinucleotide;
use crate::core::models::rotation_table::{Angle, AngleSet, RotationTable};
use rand::Rng;

/// Signed perturbation interval relative to the current angle value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        if self.high > self.low {
            rng.gen_range(self.low..=self.high)
        } else {
            self.low
        }
    }

    /// Re-centers the interval on a value that just moved by `delta`.
    pub fn consume(&mut self, delta: f64) {
        self.low -= delta;
        self.high -= delta;
    }
}

/// Remaining noise budget for every angle of every dinucleotide.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseBounds {
    bounds: [[Interval; 3]; Dinucleotide::COUNT],
}

impl NoiseBounds {
    /// Bounds `[-below, +above]` taken from the declared margins of `table`.
    pub fn from_table(table: &RotationTable) -> Self {
        let bounds = Dinucleotide::ALL.map(|dinucleotide| {
            table
                .ranges(dinucleotide)
                .map(|margin| Interval::new(-margin.below, margin.above))
        });
        Self { bounds }
    }

    pub fn get(&self, dinucleotide: Dinucleotide) -> &[Interval; 3] {
        &self.bounds[dinucleotide.index()]
    }

    pub fn interval(&self, dinucleotide: Dinucleotide, angle: Angle) -> Interval {
        self.bounds[dinucleotide.index()][angle as usize]
    }

    pub fn set(&mut self, dinucleotide: Dinucleotide, intervals: [Interval; 3]) {
        self.bounds[dinucleotide.index()] = intervals;
    }

    /// Draws one sample per angle inside the remaining bounds, adds it to `table`
    /// and consumes it from the bounds. Returns the applied deltas.
    pub fn apply(
        &mut self,
        table: &mut RotationTable,
        dinucleotide: Dinucleotide,
        rng: &mut impl Rng,
    ) -> AngleSet {
        let intervals = &mut self.bounds[dinucleotide.index()];
        let mut deltas = AngleSet::default();
        for angle in Angle::ALL {
            let interval = &mut intervals[angle as usize];
            let sample = interval.sample(rng);
            interval.consume(sample);
            deltas.set(angle, sample);
        }
        let angles = table.angles(dinucleotide) + deltas;
        table.set_angles(dinucleotide, angles);
        deltas
    }
}
