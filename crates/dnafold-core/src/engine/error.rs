use thiserror::Error;

use super::config::DomainError;
use super::utils::sampling::SamplingError;
use crate::core::io::clean::CleanError;
use crate::core::io::points::ExportError;
use crate::core::io::sequence::SequenceLoadError;
use crate::core::io::table::ConfigError;
use crate::core::models::nucleotide::LookupError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Rotation table error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Lookup failed: {source}")]
    Lookup {
        #[from]
        source: LookupError,
    },

    #[error("Invalid parameters: {source}")]
    Domain {
        #[from]
        source: DomainError,
    },

    #[error("Table cleaning failed: {source}")]
    Clean {
        #[from]
        source: CleanError,
    },

    #[error("Sequence loading failed: {source}")]
    SequenceLoad {
        #[from]
        source: SequenceLoadError,
    },

    #[error("Point export failed: {source}")]
    Export {
        #[from]
        source: ExportError,
    },

    #[error("Sampling failed: {source}")]
    Sampling {
        #[from]
        source: SamplingError,
    },

    #[error("Candidate {index} has not been scored")]
    UnscoredCandidate { index: usize },

    #[error("Population collapsed to {size} candidate(s) at generation {generation}")]
    PopulationCollapsed { generation: usize, size: usize },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
