use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    config::CandidatePruning,
    itemset::Itemset,
    types::{ItemsetCounts, ItemsetLength},
};

/// Builds the candidates of `size` from the frequent item sets of the previous
/// round: every distinct union of two of them that has exactly `size` items.
///
/// With [`CandidatePruning::AllSubsets`] a union is also dropped when one of
/// its (size-1)-subsets is not frequent. Output is sorted.
pub fn generate_candidates(
    frequent: &ItemsetCounts,
    size: ItemsetLength,
    pruning: CandidatePruning,
) -> Vec<Itemset> {
    let mut prev: Vec<&Itemset> = frequent.keys().collect();
    prev.sort_unstable();
    let prev: &[&Itemset] = &prev;

    let unions: HashSet<Itemset> = prev
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, &a)| {
            prev[i + 1..]
                .iter()
                .filter(move |&&b| a.union_len(b) == size)
                .map(move |&b| a.union(b))
        })
        .filter(|candidate| match pruning {
            CandidatePruning::UnionOnly => true,
            CandidatePruning::AllSubsets => candidate
                .shrink_by_one()
                .all(|subset| frequent.contains_key(&subset)),
        })
        .collect();

    let mut candidates: Vec<Itemset> = unions.into_iter().collect();
    candidates.sort_unstable();
    debug!(
        size,
        from = prev.len(),
        candidates = candidates.len(),
        "generated candidates"
    );
    candidates
}
