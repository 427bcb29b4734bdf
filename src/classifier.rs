//! Joins listings against stock and sorts SKUs into report buckets.
//!
//! Every function here is pure; row order follows the iteration order of
//! the index being walked, which is the row order of its source file.

use crate::index::{ListingIndex, StockIndex};

/// Quantities below this are negative stock
pub const SUB_ZERO_LIMIT: i64 = 0;
/// Quantities below this (and not negative) are nearly sold out
pub const SUB_TEN_LIMIT: i64 = 10;
/// Quantities below this count as low stock
pub const LOW_STOCK_LIMIT: i64 = 50;

/// Longest title written to the wrong SKU report
pub const MAX_TITLE_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    SubZero,
    SubTen,
    SubFifty,
    Sufficient,
}

impl StockLevel {
    pub fn of(quantity: i64) -> Self {
        if quantity < SUB_ZERO_LIMIT {
            StockLevel::SubZero
        } else if quantity < SUB_TEN_LIMIT {
            StockLevel::SubTen
        } else if quantity < LOW_STOCK_LIMIT {
            StockLevel::SubFifty
        } else {
            StockLevel::Sufficient
        }
    }

    pub fn is_low(self) -> bool {
        self != StockLevel::Sufficient
    }
}

/// A SKU with its current quantity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLine {
    pub sku: String,
    pub quantity: i64,
}

/// A listed SKU the warehouse does not know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongSkuLine {
    pub sku: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockLine {
    pub sku: String,
    pub old_quantity: i64,
    pub new_quantity: i64,
}

/// Low stock split by severity
#[derive(Debug, Clone, Default)]
pub struct LowStockReport {
    /// Every bucketed SKU, kept for the next run's comparison
    pub low_stock: StockIndex,
    /// `sub_zero ++ sub_ten ++ sub_fifty`
    pub all: Vec<StockLine>,
    pub sub_zero: Vec<StockLine>,
    pub sub_ten: Vec<StockLine>,
    pub sub_fifty: Vec<StockLine>,
}

/// Bucket every listed SKU that has a stock entry below [`LOW_STOCK_LIMIT`].
pub fn classify_low_stock(listings: &ListingIndex, stock: &StockIndex) -> LowStockReport {
    let mut report = LowStockReport::default();

    for sku in listings.keys() {
        let Some(&quantity) = stock.get(sku) else {
            continue;
        };

        let bucket = match StockLevel::of(quantity) {
            StockLevel::SubZero => &mut report.sub_zero,
            StockLevel::SubTen => &mut report.sub_ten,
            StockLevel::SubFifty => &mut report.sub_fifty,
            StockLevel::Sufficient => continue,
        };
        bucket.push(StockLine {
            sku: sku.to_string(),
            quantity,
        });
        report.low_stock.insert(sku, quantity);
    }

    report.all = report
        .sub_zero
        .iter()
        .chain(&report.sub_ten)
        .chain(&report.sub_fifty)
        .cloned()
        .collect();

    report
}

/// Listed SKUs with no stock entry at all
pub fn classify_wrong_sku(listings: &ListingIndex, stock: &StockIndex) -> Vec<WrongSkuLine> {
    listings
        .iter()
        .filter(|(sku, _)| !stock.contains(sku))
        .map(|(sku, title)| WrongSkuLine {
            sku: sku.to_string(),
            title: truncate_title(title),
        })
        .collect()
}

/// Previously low SKUs that went up and are no longer low
pub fn classify_restock(prior_low_stock: &StockIndex, stock: &StockIndex) -> Vec<RestockLine> {
    prior_low_stock
        .iter()
        .filter_map(|(sku, &old_quantity)| {
            let new_quantity = *stock.get(sku)?;
            (new_quantity > old_quantity && new_quantity >= LOW_STOCK_LIMIT).then(|| RestockLine {
                sku: sku.to_string(),
                old_quantity,
                new_quantity,
            })
        })
        .collect()
}

/// SKUs low now that were not in the previous low stock report
pub fn classify_new_low_stock(
    prior_low_stock: &StockIndex,
    current_low_stock: &StockIndex,
) -> Vec<StockLine> {
    current_low_stock
        .iter()
        .filter(|(sku, _)| !prior_low_stock.contains(sku))
        .map(|(sku, &quantity)| StockLine {
            sku: sku.to_string(),
            quantity,
        })
        .collect()
}

/// Trim whitespace and cut to [`MAX_TITLE_CHARS`] characters
pub fn truncate_title(title: &str) -> String {
    title.trim().chars().take(MAX_TITLE_CHARS).collect()
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
