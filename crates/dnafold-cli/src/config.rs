//! Layered configuration for the optimizing commands.
//!
//! Values are resolved in this order, first match wins: explicit command-line
//! flags, `-S KEY=VALUE` overrides, the TOML file given with `-c`, then
//! [`defaults::DefaultsConfig`] and the library defaults.

pub mod builder;
pub mod defaults;
pub mod file;

pub use builder::{build_annealing_config, build_genetic_config};
