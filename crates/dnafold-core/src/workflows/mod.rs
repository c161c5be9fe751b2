//! # Workflows Module
//!
//! High-level entry points that run a complete procedure from validated inputs to a
//! result value, reporting progress along the way.
//!
//! ## Architecture
//!
//! - **Fold** ([`fold`]) - Computes the trajectory of one sequence under a fixed table.
//! - **Anneal** ([`anneal`]) - Simulated annealing of a table over several sequences.
//! - **Evolve** ([`evolve`]) - Genetic search for the table that best closes one sequence.
//! - **Survey** ([`survey`]) - Best genetic score for each population size and selection strategy.
//!
//! Every stochastic workflow seeds its own generator from the configured seed, or
//! from system entropy when no seed is given.

use rand::SeedableRng;
use rand::rngs::StdRng;

pub mod anneal;
pub mod evolve;
pub mod fold;
pub mod survey;

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
