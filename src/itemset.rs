use std::fmt::{Display, Formatter, Result};

use itertools::{EitherOrBoth, Itertools};

use crate::types::{ItemId, ItemsetLength};

/// An immutable set of item ids, stored sorted and without duplicates so that
/// equality and hashing do not depend on insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Itemset(Box<[ItemId]>);

impl Itemset {
    pub fn new(items: impl IntoIterator<Item = ItemId>) -> Self {
        let mut items: Vec<ItemId> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Itemset(items.into_boxed_slice())
    }

    pub fn singleton(item: ItemId) -> Self {
        Itemset(Box::new([item]))
    }

    pub fn len(&self) -> ItemsetLength {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.0.iter()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    /// Size of `self ∪ other`, without building it.
    pub fn union_len(&self, other: &Itemset) -> ItemsetLength {
        self.0
            .iter()
            .merge_join_by(other.0.iter(), |a, b| a.cmp(b))
            .count()
    }

    pub fn union(&self, other: &Itemset) -> Itemset {
        let items: Vec<ItemId> = self
            .0
            .iter()
            .merge_join_by(other.0.iter(), |a, b| a.cmp(b))
            .map(|either| match either {
                EitherOrBoth::Both(&item, _)
                | EitherOrBoth::Left(&item)
                | EitherOrBoth::Right(&item) => item,
            })
            .collect();
        Itemset(items.into_boxed_slice())
    }

    /// `basket` must be sorted.
    pub fn is_subset_of(&self, basket: &[ItemId]) -> bool {
        let mut rest = basket.iter();
        self.0
            .iter()
            .all(|item| rest.by_ref().any(|other| other == item))
    }

    /// Every subset with exactly one item removed.
    pub fn shrink_by_one(&self) -> impl Iterator<Item = Itemset> + '_ {
        (0..self.0.len()).map(move |skip| {
            let items: Vec<ItemId> = self
                .0
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &item)| item)
                .collect();
            Itemset(items.into_boxed_slice())
        })
    }
}

impl FromIterator<ItemId> for Itemset {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Itemset::new(iter)
    }
}

impl From<Vec<ItemId>> for Itemset {
    fn from(items: Vec<ItemId>) -> Self {
        Itemset::new(items)
    }
}

impl Display for Itemset {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}
