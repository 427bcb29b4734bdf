//! CSV export loading.
//!
//! Turns the Etsy listing export into a [`ListingIndex`] and the warehouse
//! stock export (or a previous `low_stock.csv`) into a [`StockIndex`].
//! The first row of every file is a header and is skipped unchecked.

use crate::config::InputSchema;
use crate::error::{ReconcileError, Result};
use crate::index::{ListingIndex, StockIndex};
use csv::ByteRecord;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Separator inside a listing SKU field holding several SKUs
const MULTI_SKU_SEPARATOR: char = ',';

/// Load the Etsy listing export from disk
pub fn load_listings<P: AsRef<Path>>(path: P, schema: &InputSchema) -> Result<ListingIndex> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ReconcileError::io(path, e))?;
    read_listings(file, path, schema)
}

/// Load a stock export (or prior low stock report) from disk
pub fn load_stock<P: AsRef<Path>>(path: P, schema: &InputSchema) -> Result<StockIndex> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ReconcileError::io(path, e))?;
    read_stock(file, path, schema)
}

/// Build a listing index from any reader. `origin` only labels errors.
///
/// A SKU field containing commas lists several SKUs sharing one listing;
/// each of them maps to the full title. A plain SKU field keeps only the
/// first character of the title.
pub fn read_listings<R: Read>(
    reader: R,
    origin: &Path,
    schema: &InputSchema,
) -> Result<ListingIndex> {
    let mut listings = ListingIndex::new();
    let mut rows = 0usize;

    for_each_row(reader, origin, |record, line| {
        let sku = field(record, schema.sku_column, origin, line)?;
        let title = field(record, schema.value_column, origin, line)?;
        rows += 1;

        if sku.contains(MULTI_SKU_SEPARATOR) {
            for part in sku.split(MULTI_SKU_SEPARATOR) {
                listings.insert(part, title.to_string());
            }
        } else {
            // Only the first character is kept for single-SKU listings.
            let initial = title.chars().next().map(String::from).unwrap_or_default();
            listings.insert(sku, initial);
        }
        Ok(())
    })?;

    debug!(
        "Loaded {} listing SKUs from {} rows of {}",
        listings.len(),
        rows,
        origin.display()
    );
    Ok(listings)
}

/// Build a stock index from any reader. `origin` only labels errors.
pub fn read_stock<R: Read>(reader: R, origin: &Path, schema: &InputSchema) -> Result<StockIndex> {
    let mut stock = StockIndex::new();

    for_each_row(reader, origin, |record, line| {
        let sku = field(record, schema.sku_column, origin, line)?;
        let raw = field(record, schema.value_column, origin, line)?;
        let quantity = parse_quantity(raw).ok_or_else(|| ReconcileError::InvalidQuantity {
            path: origin.to_path_buf(),
            line,
            value: raw.to_string(),
        })?;
        stock.insert(sku, quantity);
        Ok(())
    })?;

    debug!("Loaded {} stock SKUs from {}", stock.len(), origin.display());
    Ok(stock)
}

/// Parses a stock quantity, accepting either `.` or `,` as decimal separator.
///
/// The value is truncated toward zero: `"12,5"` gives `12`, `"-3.9"` gives `-3`.
/// Returns `None` for anything that is not a finite number.
pub fn parse_quantity(raw: &str) -> Option<i64> {
    let normalized = raw.replace(',', ".");
    let value = normalized.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}

/// Run `visit` on every data row, skipping the header row.
///
/// Rows are read as raw bytes; only the columns a loader asks for through
/// [`field`] have to be valid UTF-8.
fn for_each_row<R, F>(reader: R, origin: &Path, mut visit: F) -> Result<()>
where
    R: Read,
    F: FnMut(&ByteRecord, u64) -> Result<()>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);
    let csv_error = |source| ReconcileError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let mut records = rdr.byte_records();
    match records.next() {
        Some(header) => {
            header.map_err(csv_error)?;
        }
        None => {
            return Err(ReconcileError::EmptyInput {
                path: origin.to_path_buf(),
            })
        }
    }

    for result in records {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        visit(&record, line)?;
    }

    Ok(())
}

fn field<'r>(record: &'r ByteRecord, column: usize, origin: &Path, line: u64) -> Result<&'r str> {
    let bytes = record.get(column).ok_or_else(|| ReconcileError::MissingColumn {
        path: origin.to_path_buf(),
        line,
        column,
    })?;
    std::str::from_utf8(bytes).map_err(|_| ReconcileError::InvalidUtf8 {
        path: origin.to_path_buf(),
        line,
        column,
    })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
