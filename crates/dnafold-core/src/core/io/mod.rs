//! Reading and writing the data exchanged with the outside world.
//!
//! Rotation tables use a JSON interchange format (see [`table`]), sequences are read
//! from FASTA-style files (see [`sequence`]), and computed trajectories can be
//! exported as CSV point lists for external plotting (see [`points`]). The [`clean`]
//! module re-derives the margins of an optimized table against a reference table.

pub mod clean;
pub mod points;
pub mod sequence;
pub mod table;
