use crate::core::models::nucleotide::Dinucleotide;
use crate::core::models::rotation_table::{Angle, AngleRange, Margin, RotationTable};
use thiserror::Error;
use tracing::debug;

const MARGIN_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CleanError {
    #[error("Value {value} for {code} {angle} is out of range [{lower}, {upper}]")]
    OutOfRange {
        code: Dinucleotide,
        angle: &'static str,
        value: f64,
        lower: f64,
        upper: f64,
    },
}

#[derive(Debug, Clone)]
pub struct CleanReport {
    pub table: RotationTable,
    /// Codes whose stored margins disagreed with the reference window.
    pub corrected: Vec<Dinucleotide>,
}

/// Re-derives every margin of `result` from the windows declared by `reference`.
///
/// Each angle must sit inside its reference window `[lower, upper]`; its margin is
/// then rewritten to `(value - lower, upper - value)`.
pub fn clean_table(
    reference: &RotationTable,
    result: &RotationTable,
) -> Result<CleanReport, CleanError> {
    let mut table = result.clone();
    let mut corrected = Vec::new();

    for dinucleotide in Dinucleotide::ALL {
        let reference_entry = reference.entry(dinucleotide);
        let entry = table.entry_mut(dinucleotide);
        let mut mismatch = false;

        for angle in Angle::ALL {
            let (lower, upper) = reference_entry.window(angle);
            let value = entry.angles.get(angle);
            if value < lower || value > upper {
                return Err(CleanError::OutOfRange {
                    code: dinucleotide,
                    angle: angle.name(),
                    value,
                    lower,
                    upper,
                });
            }

            let expected = Margin::new(value - lower, upper - value);
            let stored_matches = matches!(
                entry.range(angle),
                AngleRange::Bounded(m)
                    if (m.below - expected.below).abs() < MARGIN_TOLERANCE
                        && (m.above - expected.above).abs() < MARGIN_TOLERANCE
            );
            if !stored_matches {
                mismatch = true;
            }
            entry.ranges[angle as usize] = AngleRange::Bounded(expected);
        }

        if mismatch {
            debug!("Correcting margins for {}", dinucleotide);
            corrected.push(dinucleotide);
        }
    }

    Ok(CleanReport { table, corrected })
}
