use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng};
use tracing::info;

use crate::{
    config::{MiningConfig, SamplingConfig},
    error::Result,
    itemset::Itemset,
    itemsets::{
        count::{retain_frequent, Counter},
        levelwise::Apriori,
        FrequentItemsets,
    },
    source::{BasketSource, Rescan},
    types::{ItemsetCounts, SupportCount},
};

// Absorbs float error in t * p so that e.g. 10 * 0.3 does not round up to 4.
const SCALE_TOLERANCE: f64 = 1e-9;

/// Support a set needs in a sample drawn with `probability` to stand for
/// `threshold` on the full data. Counts are integers, so `count >= t * p`
/// is the same as `count >= ceil(t * p)`.
pub fn scaled_threshold(threshold: SupportCount, probability: f64) -> SupportCount {
    let scaled = (f64::from(threshold) * probability - SCALE_TOLERANCE).ceil();
    (scaled as SupportCount).max(1)
}

impl Apriori {
    /// Mines a random sample of `source` and, if requested, re-counts the
    /// survivors on the full data to drop false positives. Sets missed by the
    /// sample are never recovered.
    pub fn mine_randomized<S>(
        &self,
        source: &S,
        sampling: &SamplingConfig,
    ) -> Result<FrequentItemsets>
    where
        S: BasketSource + ?Sized,
    {
        match sampling.seed {
            Some(seed) => {
                self.mine_randomized_with(source, sampling, &mut StdRng::seed_from_u64(seed))
            }
            None => self.mine_randomized_with(source, sampling, &mut thread_rng()),
        }
    }

    /// Same as [`Apriori::mine_randomized`], drawing the sample from `rng`.
    pub fn mine_randomized_with<S, R>(
        &self,
        source: &S,
        sampling: &SamplingConfig,
        rng: &mut R,
    ) -> Result<FrequentItemsets>
    where
        S: BasketSource + ?Sized,
        R: Rng + ?Sized,
    {
        sampling.validate()?;
        let threshold = self.config().threshold;

        let sample = source.sample(sampling.probability, rng)?;
        let sample_threshold = scaled_threshold(threshold, sampling.probability);
        info!(
            baskets = sample.len(),
            probability = sampling.probability,
            sample_threshold,
            "mining sample"
        );

        let sample_miner = Apriori::new(MiningConfig {
            threshold: sample_threshold,
            ..self.config().clone()
        })?;
        let mined = sample_miner.mine_in_memory(&sample)?;

        if sampling.verify {
            self.verify(source, mined)
        } else {
            Ok(mined)
        }
    }

    /// Replaces sample supports with full-data supports and drops every set
    /// below the threshold.
    fn verify<S>(&self, source: &S, mined: FrequentItemsets) -> Result<FrequentItemsets>
    where
        S: BasketSource + ?Sized,
    {
        let (inventory, passes) = mined.into_parts();
        let candidates: Vec<Itemset> = passes
            .iter()
            .flat_map(|pass| pass.keys().cloned())
            .collect();

        let counts = Counter::new(inventory.len())
            .count(&Rescan::new(source, &inventory), &candidates)?;
        let verified = retain_frequent(counts, self.config().threshold);
        info!(
            candidates = candidates.len(),
            verified = verified.len(),
            "verified sample against full data"
        );

        let mut passes: Vec<ItemsetCounts> = vec![ItemsetCounts::new(); passes.len()];
        for (itemset, count) in verified {
            passes[itemset.len() - 1].insert(itemset, count);
        }

        Ok(FrequentItemsets::new(inventory, passes))
    }
}
