use rand::{distributions::WeightedIndex, prelude::*};
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("Input score list is empty, cannot perform sampling")]
    EmptyScores,
    #[error("Score at index {index} is not a number")]
    InvalidScore { index: usize },
    #[error("Failed to create weighted distribution: {source}")]
    DistributionError {
        #[from]
        source: rand::distributions::WeightedError,
    },
}

/// Selection probabilities proportional to `1 / score`, normalized to sum to one.
///
/// Scores at or below zero are perfect solutions of a distance objective; when any
/// are present they share the whole probability mass uniformly.
pub fn inverse_score_weights(scores: &[f64]) -> Result<Vec<f64>, SamplingError> {
    if scores.is_empty() {
        return Err(SamplingError::EmptyScores);
    }
    if let Some(index) = scores.iter().position(|s| s.is_nan()) {
        return Err(SamplingError::InvalidScore { index });
    }

    let raw: Vec<f64> = if scores.iter().any(|&s| s <= 0.0) {
        scores
            .iter()
            .map(|&s| if s <= 0.0 { 1.0 } else { 0.0 })
            .collect()
    } else {
        scores.iter().map(|&s| 1.0 / s).collect()
    };

    let total: f64 = raw.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        tracing::warn!(
            "Inverse-score weights sum to {}; falling back to uniform sampling.",
            total
        );
        return Ok(vec![1.0 / scores.len() as f64; scores.len()]);
    }
    Ok(raw.into_iter().map(|w| w / total).collect())
}

/// Draws `count` indices with replacement, favouring low scores.
#[instrument(level = "trace", skip_all, fields(count))]
pub fn roulette_sample(
    scores: &[f64],
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<usize>, SamplingError> {
    let weights = inverse_score_weights(scores)?;
    let dist = WeightedIndex::new(&weights)?;
    Ok((0..count).map(|_| dist.sample(rng)).collect())
}
