//! Error types for frequent item set mining.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ItemsetLength;

/// Everything that can stop a mining run. No partial result accompanies an error.
#[derive(Debug, Error)]
pub enum AprioriError {
    /// The basket file could not be opened or read.
    #[error("cannot read baskets from {}: {source}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Frequency thresholds are positive support counts.
    #[error("frequency threshold must be a positive count, got {0}")]
    InvalidThreshold(i64),

    /// Sample probabilities live in (0, 1].
    #[error("sample probability must be in (0, 1], got {0}")]
    InvalidProbability(f64),

    /// A round produced more candidates than the configured cap.
    #[error("round {size} generated {candidates} candidates, above the limit of {limit}")]
    CandidateLimitExceeded {
        size: ItemsetLength,
        candidates: usize,
        limit: usize,
    },
}

pub type Result<T> = std::result::Result<T, AprioriError>;
