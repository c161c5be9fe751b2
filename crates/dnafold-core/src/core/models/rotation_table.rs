use super::nucleotide::{Dinucleotide, LookupError};
use phf::{Map, phf_map};
use std::ops::{Add, AddAssign};

/// Bundled parameters: `[twist, wedge, direction, twist_range, wedge_range, direction_range]`.
static DEFAULT_PARAMETERS: Map<&'static str, [f64; 6]> = phf_map! {
    "AA" => [35.62, 7.2, -154.0, 0.06, 0.6, 0.0],
    "AC" => [34.4, 1.1, 143.0, 1.3, 5.0, 0.0],
    "AG" => [27.7, 8.4, 2.0, 1.5, 3.0, 0.0],
    "AT" => [31.5, 2.6, 0.0, 1.1, 2.0, 0.0],
    "CA" => [34.5, 3.5, -64.0, 0.9, 34.0, 0.0],
    "CC" => [33.67, 2.1, -57.0, 0.07, 2.1, 0.0],
    "CG" => [29.8, 6.7, 0.0, 1.1, 1.5, 0.0],
    "CT" => [27.7, 8.4, -2.0, 1.5, 3.0, 0.0],
    "GA" => [36.9, 5.3, 120.0, 0.9, 6.0, 0.0],
    "GC" => [40.0, 5.0, 180.0, 1.2, 1.275, 0.0],
    "GG" => [33.67, 2.1, 57.0, 0.07, 2.1, 0.0],
    "GT" => [34.4, 1.1, -143.0, 1.3, 5.0, 0.0],
    "TA" => [36.0, 0.9, 0.0, 1.1, 2.0, 0.0],
    "TC" => [36.9, 5.3, -120.0, 0.9, 6.0, 0.0],
    "TG" => [34.5, 3.5, 64.0, 0.9, 34.0, 0.0],
    "TT" => [35.62, 7.2, 154.0, 0.06, 0.6, 0.0],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Angle {
    Twist,
    Wedge,
    Direction,
}

impl Angle {
    pub const ALL: [Angle; 3] = [Angle::Twist, Angle::Wedge, Angle::Direction];

    pub fn name(&self) -> &'static str {
        match self {
            Angle::Twist => "twist",
            Angle::Wedge => "wedge",
            Angle::Direction => "direction",
        }
    }
}

/// Twist, wedge and direction of one dinucleotide step, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleSet {
    pub twist: f64,
    pub wedge: f64,
    pub direction: f64,
}

impl AngleSet {
    pub fn new(twist: f64, wedge: f64, direction: f64) -> Self {
        Self {
            twist,
            wedge,
            direction,
        }
    }

    pub fn get(&self, angle: Angle) -> f64 {
        match angle {
            Angle::Twist => self.twist,
            Angle::Wedge => self.wedge,
            Angle::Direction => self.direction,
        }
    }

    pub fn set(&mut self, angle: Angle, value: f64) {
        match angle {
            Angle::Twist => self.twist = value,
            Angle::Wedge => self.wedge = value,
            Angle::Direction => self.direction = value,
        }
    }
}

impl Add for AngleSet {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            twist: self.twist + rhs.twist,
            wedge: self.wedge + rhs.wedge,
            direction: self.direction + rhs.direction,
        }
    }
}

impl AddAssign for AngleSet {
    fn add_assign(&mut self, rhs: Self) {
        self.twist += rhs.twist;
        self.wedge += rhs.wedge;
        self.direction += rhs.direction;
    }
}

/// Remaining perturbation budget below and above the current angle value.
///
/// The reachable window is `[value - below, value + above]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub below: f64,
    pub above: f64,
}

impl Margin {
    pub fn new(below: f64, above: f64) -> Self {
        Self { below, above }
    }

    pub fn symmetric(half_width: f64) -> Self {
        Self::new(half_width, half_width)
    }

    pub fn tightest(&self) -> f64 {
        self.below.min(self.above)
    }

    /// Moves the value by `delta` while keeping the absolute window fixed.
    pub fn shift(&mut self, delta: f64) {
        self.below += delta;
        self.above -= delta;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleRange {
    Symmetric(f64),
    Bounded(Margin),
}

impl AngleRange {
    pub fn margin(&self) -> Margin {
        match *self {
            AngleRange::Symmetric(half_width) => Margin::symmetric(half_width),
            AngleRange::Bounded(margin) => margin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationEntry {
    pub angles: AngleSet,
    pub ranges: [AngleRange; 3],
}

impl RotationEntry {
    pub fn new(angles: AngleSet, ranges: [AngleRange; 3]) -> Self {
        Self { angles, ranges }
    }

    pub fn range(&self, angle: Angle) -> AngleRange {
        self.ranges[angle as usize]
    }

    pub fn margins(&self) -> [Margin; 3] {
        self.ranges.map(|r| r.margin())
    }

    /// Absolute `(lower, upper)` window the angle may occupy.
    pub fn window(&self, angle: Angle) -> (f64, f64) {
        let value = self.angles.get(angle);
        let margin = self.range(angle).margin();
        (value - margin.below, value + margin.above)
    }
}

/// Per-dinucleotide rotation parameters for all sixteen codes.
///
/// Cloning yields a fully independent table; optimizers rely on this to keep
/// candidates from observing each other's mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationTable {
    entries: [RotationEntry; Dinucleotide::COUNT],
}

impl RotationTable {
    pub fn new(entries: [RotationEntry; Dinucleotide::COUNT]) -> Self {
        Self { entries }
    }

    pub fn entry(&self, dinucleotide: Dinucleotide) -> &RotationEntry {
        &self.entries[dinucleotide.index()]
    }

    pub fn entry_mut(&mut self, dinucleotide: Dinucleotide) -> &mut RotationEntry {
        &mut self.entries[dinucleotide.index()]
    }

    pub fn get(&self, code: &str) -> Result<&RotationEntry, LookupError> {
        let dinucleotide: Dinucleotide = code.parse()?;
        Ok(self.entry(dinucleotide))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dinucleotide, &RotationEntry)> {
        Dinucleotide::ALL.into_iter().zip(self.entries.iter())
    }

    pub fn twist(&self, dinucleotide: Dinucleotide) -> f64 {
        self.entry(dinucleotide).angles.twist
    }

    pub fn wedge(&self, dinucleotide: Dinucleotide) -> f64 {
        self.entry(dinucleotide).angles.wedge
    }

    pub fn direction(&self, dinucleotide: Dinucleotide) -> f64 {
        self.entry(dinucleotide).angles.direction
    }

    pub fn set_twist(&mut self, dinucleotide: Dinucleotide, value: f64) {
        self.entry_mut(dinucleotide).angles.twist = value;
    }

    pub fn set_wedge(&mut self, dinucleotide: Dinucleotide, value: f64) {
        self.entry_mut(dinucleotide).angles.wedge = value;
    }

    pub fn set_direction(&mut self, dinucleotide: Dinucleotide, value: f64) {
        self.entry_mut(dinucleotide).angles.direction = value;
    }

    pub fn angles(&self, dinucleotide: Dinucleotide) -> AngleSet {
        self.entry(dinucleotide).angles
    }

    pub fn set_angles(&mut self, dinucleotide: Dinucleotide, angles: AngleSet) {
        self.entry_mut(dinucleotide).angles = angles;
    }

    /// Remaining budgets for twist, wedge and direction. Scalar half-ranges read as
    /// symmetric `(r, r)` pairs.
    pub fn ranges(&self, dinucleotide: Dinucleotide) -> [Margin; 3] {
        self.entry(dinucleotide).margins()
    }

    /// Adds `deltas` to the angles and contracts each margin by the same amount.
    ///
    /// The absolute reachable interval stays fixed while the remaining budget
    /// re-centers on the new value. Scalar ranges become explicit pairs.
    pub fn update_ranges_and_values(&mut self, dinucleotide: Dinucleotide, deltas: AngleSet) {
        let entry = self.entry_mut(dinucleotide);
        entry.angles += deltas;
        for angle in Angle::ALL {
            let mut margin = entry.range(angle).margin();
            margin.shift(deltas.get(angle));
            entry.ranges[angle as usize] = AngleRange::Bounded(margin);
        }
    }

    /// First `(dinucleotide, angle)` whose value lies outside the window declared
    /// by `reference`, if any.
    pub fn first_out_of_bounds(&self, reference: &RotationTable) -> Option<(Dinucleotide, Angle)> {
        self.iter().find_map(|(dinucleotide, entry)| {
            let reference_entry = reference.entry(dinucleotide);
            Angle::ALL.into_iter().find_map(|angle| {
                let (lower, upper) = reference_entry.window(angle);
                let value = entry.angles.get(angle);
                (value < lower || value > upper).then_some((dinucleotide, angle))
            })
        })
    }

    pub fn is_within(&self, reference: &RotationTable) -> bool {
        self.first_out_of_bounds(reference).is_none()
    }
}

impl Default for RotationTable {
    fn default() -> Self {
        let entries = Dinucleotide::ALL.map(|dinucleotide| {
            let p = DEFAULT_PARAMETERS
                .get(dinucleotide.code().as_str())
                .copied()
                .unwrap_or_default();
            RotationEntry::new(
                AngleSet::new(p[0], p[1], p[2]),
                [
                    AngleRange::Symmetric(p[3]),
                    AngleRange::Symmetric(p[4]),
                    AngleRange::Symmetric(p[5]),
                ],
            )
        });
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aa() -> Dinucleotide {
        "AA".parse().unwrap()
    }

    #[test]
    fn default_table_covers_every_dinucleotide() {
        assert_eq!(DEFAULT_PARAMETERS.len(), Dinucleotide::COUNT);
        for d in Dinucleotide::ALL {
            assert!(DEFAULT_PARAMETERS.contains_key(d.code().as_str()));
        }
        let table = RotationTable::default();
        assert_eq!(table.twist(aa()), 35.62);
        assert_eq!(table.wedge(aa()), 7.2);
        assert_eq!(table.direction(aa()), -154.0);
        assert_eq!(
            table.entry("GC".parse().unwrap()).range(Angle::Wedge),
            AngleRange::Symmetric(1.275)
        );
    }

    #[test]
    fn setters_write_single_angles_without_bounds_checks() {
        let mut table = RotationTable::default();
        table.set_twist(aa(), 1000.0);
        table.set_wedge(aa(), -5.0);
        table.set_direction(aa(), 12.0);
        assert_eq!(table.angles(aa()), AngleSet::new(1000.0, -5.0, 12.0));
    }

    #[test]
    fn get_by_code_fails_for_unknown_codes() {
        let table = RotationTable::default();
        assert!(table.get("AT").is_ok());
        assert_eq!(
            table.get("AU").unwrap_err(),
            LookupError::UnknownDinucleotide("AU".to_string())
        );
    }

    #[test]
    fn ranges_normalizes_scalar_half_ranges_into_pairs() {
        let table = RotationTable::default();
        let [twist, wedge, direction] = table.ranges(aa());
        assert_eq!(twist, Margin::new(0.06, 0.06));
        assert_eq!(wedge, Margin::new(0.6, 0.6));
        assert_eq!(direction, Margin::new(0.0, 0.0));
    }

    #[test]
    fn update_ranges_and_values_keeps_absolute_window_fixed() {
        let mut table = RotationTable::default();
        let d = aa();
        let before = *table.entry(d);

        table.update_ranges_and_values(d, AngleSet::new(0.02, -0.1, 0.0));

        let after = table.entry(d);
        assert!((after.angles.twist - 35.64).abs() < 1e-12);
        assert!((after.angles.wedge - 7.1).abs() < 1e-12);
        let [twist, wedge, _] = after.margins();
        assert!((twist.below - 0.08).abs() < 1e-12);
        assert!((twist.above - 0.04).abs() < 1e-12);
        assert!((wedge.below - 0.5).abs() < 1e-12);
        assert!((wedge.above - 0.7).abs() < 1e-12);
        for angle in Angle::ALL {
            let (lo_before, hi_before) = before.window(angle);
            let (lo_after, hi_after) = after.window(angle);
            assert!((lo_before - lo_after).abs() < 1e-12);
            assert!((hi_before - hi_after).abs() < 1e-12);
            assert!(matches!(after.range(angle), AngleRange::Bounded(_)));
        }
    }

    #[test]
    fn bounds_check_detects_values_outside_reference_window() {
        let reference = RotationTable::default();
        let mut table = reference.clone();
        assert!(table.is_within(&reference));

        table.set_wedge(aa(), 7.2 + 0.6);
        assert!(table.is_within(&reference));

        table.set_wedge(aa(), 7.2 + 0.61);
        assert_eq!(
            table.first_out_of_bounds(&reference),
            Some((aa(), Angle::Wedge))
        );
    }

    #[test]
    fn clones_are_independent() {
        let original = RotationTable::default();
        let mut copy = original.clone();
        copy.set_twist(aa(), 0.0);
        assert_eq!(original.twist(aa()), 35.62);
    }
}
