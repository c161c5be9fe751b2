//! # Core Models Module
//!
//! This module contains the data structures that describe a DNA molecule and the
//! rigid-body parameters used to reconstruct its shape.
//!
//! ## Key Components
//!
//! - [`nucleotide`] - Bases, dinucleotide codes in their natural order, and validated sequences
//! - [`rotation_table`] - Per-dinucleotide twist, wedge and direction angles with their
//!   perturbation ranges
//!
//! ## Usage
//!
//! ```ignore
//! use dnafold::core::models::{nucleotide::Sequence, rotation_table::RotationTable};
//!
//! let sequence: Sequence = "AAGCTT".parse()?;
//! let table = RotationTable::default();
//! let twist = table.twist("AG".parse()?);
//! ```

pub mod nucleotide;
pub mod rotation_table;
