pub mod count;
pub mod levelwise;
pub mod randomized;

use std::collections::{BTreeSet, HashMap};

use crate::{
    inventory::Inventory,
    itemset::Itemset,
    types::{ItemsetCounts, ItemsetLength, SupportCount},
};

/// Result of a mining run: the frequent item sets of each round, by size,
/// together with the inventory needed to turn ids back into labels.
#[derive(Debug, Clone, Default)]
pub struct FrequentItemsets {
    inventory: Inventory,
    passes: Vec<ItemsetCounts>,
}

impl FrequentItemsets {
    /// `passes[k - 1]` holds the k-itemsets. Trailing empty passes are dropped.
    pub fn new(inventory: Inventory, mut passes: Vec<ItemsetCounts>) -> Self {
        while passes.last().map_or(false, |pass| pass.is_empty()) {
            passes.pop();
        }
        Self { inventory, passes }
    }

    pub fn len(&self) -> usize {
        self.passes.iter().map(|pass| pass.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.iter().all(|pass| pass.is_empty())
    }

    /// Size of the largest frequent item set.
    pub fn max_len(&self) -> ItemsetLength {
        self.passes.len()
    }

    pub fn passes(&self) -> &[ItemsetCounts] {
        &self.passes
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, SupportCount)> {
        self.passes
            .iter()
            .flat_map(|pass| pass.iter().map(|(itemset, &count)| (itemset, count)))
    }

    /// Support of the item set with these labels, if it was found frequent.
    pub fn support<S: AsRef<str>>(&self, labels: &[S]) -> Option<SupportCount> {
        let itemset = labels
            .iter()
            .map(|label| self.inventory.id(label.as_ref()))
            .collect::<Option<Itemset>>()?;
        self.passes
            .get(itemset.len().checked_sub(1)?)?
            .get(&itemset)
            .copied()
    }

    pub fn labels(&self, itemset: &Itemset) -> Vec<&str> {
        itemset
            .iter()
            .filter_map(|&item| self.inventory.name(item))
            .collect()
    }

    /// Every frequent item set as a set of labels, mapped to its support.
    pub fn to_named(&self) -> HashMap<BTreeSet<String>, SupportCount> {
        self.iter()
            .map(|(itemset, count)| {
                let labels: BTreeSet<String> =
                    self.labels(itemset).into_iter().map(String::from).collect();
                (labels, count)
            })
            .collect()
    }

    /// Merges all rounds into one item set to support mapping.
    pub fn into_counts(self) -> ItemsetCounts {
        self.passes.into_iter().flatten().collect()
    }

    pub fn into_parts(self) -> (Inventory, Vec<ItemsetCounts>) {
        (self.inventory, self.passes)
    }
}
