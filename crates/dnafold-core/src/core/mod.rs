//! # Core Module
//!
//! This module provides the stateless building blocks of dnafold: the data model of
//! sequences and rotation tables, the homogeneous-transform geometry, the trajectory
//! engine, and file I/O.
//!
//! ## Architecture
//!
//! - **Models** ([`models`]) - Nucleotides, dinucleotide codes, sequences and rotation tables
//! - **Geometry** ([`utils::geometry`]) - 4×4 transforms for one dinucleotide step
//! - **Trajectory** ([`trajectory`]) - Cumulative 3D positions and the closure energy
//! - **File I/O** ([`io`]) - Table interchange, sequence loading, cleaning and point export
//!
//! ## Scientific Foundation
//!
//! Each dinucleotide step is modelled as a rigid-body transform built from three
//! angles: the twist about the helix axis, and a wedge rotation whose axis is
//! selected by the direction angle. A half-rise translation surrounds the rotations
//! on both sides. The closure energy of a trajectory is the squared distance between
//! its first and last nucleotides.

pub mod io;
pub mod models;
pub mod trajectory;
pub mod utils;
