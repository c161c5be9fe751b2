//! # Engine Module
//!
//! This module implements the parameter-search engines of dnafold: a simulated
//! annealing optimizer over a single rotation table and a genetic algorithm over a
//! population of candidate tables.
//!
//! ## Overview
//!
//! Both engines use the trajectory of [`crate::core::trajectory`] as their fitness
//! oracle and only ever move an angle inside the window declared by the table they
//! started from. Every stochastic operation takes its random number generator as an
//! argument, so a seeded generator reproduces a run exactly.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Validated parameters, builders and the selection strategy enum
//! - **Noise Model** ([`noise`]) - Shrinking perturbation bounds shared by candidates
//! - **Candidates** ([`candidate`]) - A table with its cached trajectory, score and noise bounds
//! - **Population** ([`population`]) - Selection, crossover, mutation and rescoring
//! - **Genetic Search** ([`genetic`]) - The generational loop with stagnation control
//! - **Simulated Annealing** ([`annealing`]) - Metropolis acceptance with geometric cooling
//! - **Progress Monitoring** ([`progress`]) - Progress reporting and user feedback mechanisms
//! - **Error Handling** ([`error`]) - Engine-specific error types and error propagation

pub mod annealing;
pub mod candidate;
pub mod config;
pub mod error;
pub mod genetic;
pub mod noise;
pub mod population;
pub mod progress;
pub mod utils;
