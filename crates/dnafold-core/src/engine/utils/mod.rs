//! Utility functions for the engine module.
//!
//! Currently this holds the score-weighted sampling used by roulette selection.

pub mod sampling;
