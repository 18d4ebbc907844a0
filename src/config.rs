//! Mining and sampling parameters.

use serde::{Deserialize, Serialize};

use crate::error::{AprioriError, Result};
use crate::types::{ItemsetLength, SupportCount};

/// How candidates of size k are derived from the frequent sets of size k-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePruning {
    /// Every distinct union of two frequent sets that has the target size.
    #[default]
    UnionOnly,
    /// Additionally require every (k-1)-subset of the candidate to be frequent.
    AllSubsets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Minimum support count; item sets counted exactly this often are kept.
    pub threshold: SupportCount,
    /// Stop after the round mining sets of this size.
    pub max_len: Option<ItemsetLength>,
    /// Abort when a round generates more candidates than this.
    pub max_candidates: Option<usize>,
    pub pruning: CandidatePruning,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            threshold: 1,
            max_len: None,
            max_candidates: None,
            pruning: CandidatePruning::UnionOnly,
        }
    }
}

impl MiningConfig {
    pub fn new(threshold: SupportCount) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn with_max_len(mut self, max_len: ItemsetLength) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = Some(max_candidates);
        self
    }

    pub fn with_pruning(mut self, pruning: CandidatePruning) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(AprioriError::InvalidThreshold(0));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Independent inclusion probability of each basket.
    pub probability: f64,
    /// Re-count survivors on the full data and drop false positives.
    pub verify: bool,
    /// Seed for reproducible samples; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            probability: 1.0,
            verify: true,
            seed: None,
        }
    }
}

impl SamplingConfig {
    pub fn new(probability: f64, verify: bool) -> Self {
        Self {
            probability,
            verify,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_probability(self.probability)
    }
}

/// Converts a caller-supplied integer threshold, rejecting non-positive values.
pub fn checked_threshold(threshold: i64) -> Result<SupportCount> {
    match SupportCount::try_from(threshold) {
        Ok(threshold) if threshold > 0 => Ok(threshold),
        _ => Err(AprioriError::InvalidThreshold(threshold)),
    }
}

pub fn check_probability(probability: f64) -> Result<()> {
    if probability > 0.0 && probability <= 1.0 {
        Ok(())
    } else {
        Err(AprioriError::InvalidProbability(probability))
    }
}
