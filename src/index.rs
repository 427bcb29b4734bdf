//! SKU-keyed lookup tables that remember insertion order

use std::collections::HashMap;

/// SKU -> value mapping iterated in first-insertion order.
///
/// Re-inserting a SKU replaces its value but keeps its position, so a later
/// duplicate row wins without reordering the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuIndex<V> {
    order: Vec<String>,
    values: HashMap<String, V>,
}

/// Listing SKU -> title
pub type ListingIndex = SkuIndex<String>;

/// SKU -> stock quantity
pub type StockIndex = SkuIndex<i64>;

impl<V> Default for SkuIndex<V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            values: HashMap::new(),
        }
    }
}

impl<V> SkuIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the previous value for the SKU
    pub fn insert(&mut self, sku: impl Into<String>, value: V) -> Option<V> {
        let sku = sku.into();
        if let Some(slot) = self.values.get_mut(&sku) {
            return Some(std::mem::replace(slot, value));
        }
        self.order.push(sku.clone());
        self.values.insert(sku, value);
        None
    }

    pub fn get(&self, sku: &str) -> Option<&V> {
        self.values.get(sku)
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.values.contains_key(sku)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.order
            .iter()
            .filter_map(|sku| self.values.get(sku).map(|v| (sku.as_str(), v)))
    }
}

impl<V> FromIterator<(String, V)> for SkuIndex<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (sku, value) in iter {
            index.insert(sku, value);
        }
        index
    }
}
