//! # dnafold Core Library
//!
//! Reconstruction of the 3D path of a DNA molecule from its sequence with a rigid-body
//! dinucleotide model, and stochastic search for rotation parameters that close the
//! molecule into a loop.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep concerns separate.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Sequence`, `RotationTable`),
//!   the homogeneous-transform geometry, the trajectory engine, and I/O utilities.
//!
//! - **[`engine`]: The Logic Core.** The stateful search machinery: the noise model,
//!   candidates and populations, the genetic optimizer and the simulated annealing
//!   optimizer, together with their configuration and error types.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie `core` and
//!   `engine` together: folding a sequence, annealing a table over several sequences,
//!   evolving a table for one sequence, and surveying population sizes.

pub mod core;
pub mod engine;
pub mod workflows;
