//! Loading an initial stock table from CSV.
//!
//! The table has a `denomination,count` header and one row per
//! denomination. A bad table is an error rather than a warning: loading
//! half of a cassette configuration would silently build a different
//! machine.

use crate::denomination::Denomination;
use crate::error::{DispenserError, Result};
use crate::inventory::Inventory;
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;

/// Raw stock row as read from CSV.
#[derive(Debug, Deserialize)]
pub struct StockRecord {
    /// Face value of the cassette
    pub denomination: Denomination,

    /// Number of notes loaded
    pub count: u32,
}

/// Reads a stock table and returns the counts per denomination.
pub fn read_stock<R: Read>(reader: R) -> Result<BTreeMap<Denomination, u32>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut stock = BTreeMap::new();

    for (row_idx, result) in csv_reader.deserialize::<StockRecord>().enumerate() {
        let row = row_idx + 2; // 1-indexed, accounting for header row

        let StockRecord {
            denomination,
            count,
        } = result.map_err(|e| DispenserError::InvalidStock {
            row,
            message: e.to_string(),
        })?;

        if stock.insert(denomination, count).is_some() {
            return Err(DispenserError::InvalidStock {
                row,
                message: format!("denomination {} listed more than once", denomination),
            });
        }
        debug!("Row {}: Loaded {} x {}", row, count, denomination);
    }

    Ok(stock)
}

/// Builds a constrained inventory from a stock table.
pub fn load_inventory<R: Read>(reader: R) -> Result<Inventory> {
    read_stock(reader).and_then(Inventory::constrained)
}
