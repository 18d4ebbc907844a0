use tracing::{info, warn};

use crate::{
    combi::generate_candidates,
    config::MiningConfig,
    error::{AprioriError, Result},
    inventory::Inventory,
    itemsets::{
        count::{count_items, frequent_items, retain_frequent, Counter},
        FrequentItemsets,
    },
    source::{BasketSource, Rescan, Transactions},
    types::{Basket, ItemsetCounts},
};

/// Level-wise frequent item set miner.
///
/// Round 1 counts single items; round k counts the unions of pairs of frequent
/// (k-1)-itemsets and keeps those with support at or above the threshold.
/// Mining stops at the first round that finds nothing.
#[derive(Debug, Clone)]
pub struct Apriori {
    config: MiningConfig,
}

impl Apriori {
    pub fn new(config: MiningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Mines `source` with one scan per round, re-reading it every time.
    pub fn mine<S>(&self, source: &S) -> Result<FrequentItemsets>
    where
        S: BasketSource + ?Sized,
    {
        let mut inventory = Inventory::new();
        let item_counts = count_items(source, &mut inventory, None)?;
        let first = frequent_items(&item_counts, self.config.threshold);
        let passes = self.run(first, &Rescan::new(source, &inventory), inventory.len())?;
        Ok(FrequentItemsets::new(inventory, passes))
    }

    /// Mines `source` after reading it once into memory.
    pub fn mine_in_memory<S>(&self, source: &S) -> Result<FrequentItemsets>
    where
        S: BasketSource + ?Sized,
    {
        let mut inventory = Inventory::new();
        let mut baskets: Vec<Basket> = Vec::new();
        let item_counts = count_items(source, &mut inventory, Some(&mut baskets))?;
        let first = frequent_items(&item_counts, self.config.threshold);
        let passes = self.run(first, baskets.as_slice(), inventory.len())?;
        Ok(FrequentItemsets::new(inventory, passes))
    }

    fn run<T>(
        &self,
        first: ItemsetCounts,
        transactions: &T,
        num_items: usize,
    ) -> Result<Vec<ItemsetCounts>>
    where
        T: Transactions + ?Sized,
    {
        let threshold = self.config.threshold;
        if first.is_empty() {
            info!(threshold, "no frequent items");
            return Ok(vec![]);
        }
        info!(size = 1, frequent = first.len(), "pass finished");

        let mut passes = vec![first];
        let mut counter = Counter::new(num_items);

        loop {
            let size = passes.len() + 1;
            if let Some(max_len) = self.config.max_len {
                if size > max_len {
                    warn!(max_len, "stopping at maximum item set size");
                    break;
                }
            }

            let prev = &passes[passes.len() - 1];
            let candidates = generate_candidates(prev, size, self.config.pruning);
            if candidates.is_empty() {
                break;
            }
            if let Some(limit) = self.config.max_candidates {
                if candidates.len() > limit {
                    return Err(AprioriError::CandidateLimitExceeded {
                        size,
                        candidates: candidates.len(),
                        limit,
                    });
                }
            }

            let counts = counter.count(transactions, &candidates)?;
            let frequent = retain_frequent(counts, threshold);
            info!(
                size,
                candidates = candidates.len(),
                frequent = frequent.len(),
                "pass finished"
            );
            if frequent.is_empty() {
                break;
            }
            passes.push(frequent);
        }

        Ok(passes)
    }
}
