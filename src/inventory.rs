use std::collections::HashMap;

use crate::types::{Basket, ItemId, ItemName};

const APPROX_NUM_UNIQUE_ITEMS: usize = 1024; // arbitrary

/// Two-way mapping between item labels and the compact ids mining works on.
/// Ids are handed out densely in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    reverse_lookup: HashMap<ItemName, ItemId>,
    names: Vec<ItemName>,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            reverse_lookup: HashMap::with_capacity(APPROX_NUM_UNIQUE_ITEMS),
            names: Vec::with_capacity(APPROX_NUM_UNIQUE_ITEMS),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn intern(&mut self, name: &str) -> ItemId {
        if let Some(&item_id) = self.reverse_lookup.get(name) {
            return item_id;
        }
        let item_id = self.names.len();
        self.names.push(name.to_owned());
        self.reverse_lookup.insert(name.to_owned(), item_id);
        item_id
    }

    pub fn id(&self, name: &str) -> Option<ItemId> {
        self.reverse_lookup.get(name).copied()
    }

    pub fn name(&self, item_id: ItemId) -> Option<&str> {
        self.names.get(item_id).map(String::as_str)
    }

    /// Encodes `tokens` into `basket`, assigning ids to unseen labels.
    pub fn encode_into(&mut self, tokens: &[&str], basket: &mut Basket) {
        basket.clear();
        for token in tokens {
            let item_id = self.intern(token);
            basket.push(item_id);
        }
        normalize(basket);
    }

    /// Encodes `tokens` into `basket`, dropping labels this inventory has never seen.
    pub fn lookup_into(&self, tokens: &[&str], basket: &mut Basket) {
        basket.clear();
        basket.extend(tokens.iter().filter_map(|token| self.id(token)));
        normalize(basket);
    }
}

fn normalize(basket: &mut Basket) {
    basket.sort_unstable();
    basket.dedup();
}
