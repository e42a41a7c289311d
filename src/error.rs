//! Error types for the cash dispenser.

use crate::denomination::Denomination;
use thiserror::Error;

/// Result type alias for dispenser operations
pub type Result<T> = std::result::Result<T, DispenserError>;

/// Errors that can occur while stocking or operating the dispenser.
#[derive(Error, Debug)]
pub enum DispenserError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Balance or snapshot requested from a dispenser with limitless funds
    #[error("Cannot determine remaining funds, dispenser works with limitless funds")]
    UnconstrainedMode,

    /// More notes of one denomination requested than the cassette holds.
    ///
    /// Raised by the inventory only; `withdraw` turns any shortfall into
    /// `InsufficientFunds` after restoring the inventory.
    #[error("Cannot take {requested} x {denomination}, only {available} in stock")]
    InsufficientStock {
        denomination: Denomination,
        requested: u32,
        available: u32,
    },

    /// Initial stock for one denomination exceeds what a cassette count can hold
    #[error("Stock of {denomination} exceeds the cassette limit of 4294967295 notes")]
    StockOverflow { denomination: Denomination },

    /// The amount cannot be assembled exactly from the current stock
    #[error("Not enough funds to withdraw required amount ({amount}) - please use another ATM")]
    InsufficientFunds { amount: u64 },

    /// Caller supplied an amount that is not a non-negative whole number
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: &'static str },

    /// Nomination outside the denomination ladder
    #[error("Unknown denomination {0}")]
    UnknownDenomination(u32),

    /// Invalid row in a stock table
    #[error("Invalid stock at row {row}: {message}")]
    InvalidStock { row: usize, message: String },

    /// Missing requests file argument
    #[error("Missing requests file argument. Usage: cash-dispenser <requests.csv> [stock.csv|factory]")]
    MissingArgument,
}
