use std::collections::HashMap;

use crate::itemset::Itemset;

pub type ItemId = usize;
pub type ItemName = String;

/// Item tokens of one basket as read from the source.
pub type RawBasket = Vec<ItemName>;
/// Sorted, deduplicated item ids of one basket.
pub type Basket = Vec<ItemId>;

pub type SupportCount = u32;
pub type ItemCounts = Vec<SupportCount>;
pub type ItemsetCounts = HashMap<Itemset, SupportCount>;

pub type ItemsetLength = usize;
