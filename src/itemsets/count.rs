use bitvec::prelude::*;

use crate::{
    error::Result,
    inventory::Inventory,
    itemset::Itemset,
    source::{BasketSource, Transactions},
    types::{Basket, ItemCounts, ItemsetCounts, SupportCount},
};

/// Counts how many baskets contain each candidate.
///
/// Each basket is loaded into a bitmap over the item universe so that a
/// containment test costs one bit lookup per candidate item.
pub struct Counter {
    present: BitVec,
}

impl Counter {
    pub fn new(num_items: usize) -> Self {
        Self {
            present: bitvec![0; num_items],
        }
    }

    /// Returns the support of every candidate, zero counts included.
    pub fn count<T>(&mut self, transactions: &T, candidates: &[Itemset]) -> Result<ItemsetCounts>
    where
        T: Transactions + ?Sized,
    {
        let mut counts: Vec<SupportCount> = vec![0; candidates.len()];
        let min_len = candidates.iter().map(Itemset::len).min().unwrap_or(0);
        let present = &mut self.present;

        if !candidates.is_empty() {
            transactions.try_for_each_basket(&mut |basket| {
                if basket.len() < min_len {
                    return;
                }
                if let Some(&largest) = basket.last() {
                    if largest >= present.len() {
                        present.resize(largest + 1, false);
                    }
                }

                for &item in basket {
                    present.set(item, true);
                }
                for (candidate, count) in candidates.iter().zip(counts.iter_mut()) {
                    if candidate.iter().all(|&item| present[item]) {
                        *count += 1;
                    }
                }
                for &item in basket {
                    present.set(item, false);
                }
            })?;
        }

        Ok(candidates.iter().cloned().zip(counts).collect())
    }
}

/// First pass: encodes every basket of `source` against `inventory` and counts
/// single items. Encoded baskets are pushed to `retained` when given.
///
/// Repeated items within one basket count once.
pub fn count_items<S>(
    source: &S,
    inventory: &mut Inventory,
    mut retained: Option<&mut Vec<Basket>>,
) -> Result<ItemCounts>
where
    S: BasketSource + ?Sized,
{
    let mut item_counts: ItemCounts = Vec::with_capacity(inventory.len());
    let mut basket = Basket::new();

    source.scan(|tokens| {
        inventory.encode_into(tokens, &mut basket);
        if item_counts.len() < inventory.len() {
            item_counts.resize(inventory.len(), 0);
        }
        for &item in &basket {
            item_counts[item] += 1;
        }
        if let Some(retained) = retained.as_deref_mut() {
            retained.push(basket.clone());
        }
    })?;

    Ok(item_counts)
}

/// Single items meeting the threshold, as 1-itemsets.
pub fn frequent_items(item_counts: &[SupportCount], threshold: SupportCount) -> ItemsetCounts {
    item_counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count >= threshold)
        .map(|(item, &count)| (Itemset::singleton(item), count))
        .collect()
}

/// Keeps item sets whose support is at least `threshold`.
pub fn retain_frequent(counts: ItemsetCounts, threshold: SupportCount) -> ItemsetCounts {
    counts
        .into_iter()
        .filter(|&(_, count)| count >= threshold)
        .collect()
}
