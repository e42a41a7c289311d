//! # Cash Dispenser
//!
//! Turns withdrawal amounts into notes for an automated teller machine that
//! runs either with limitless funds or with a finite, tracked stock.
//!
//! ## Design Principles
//!
//! - **Greedy selection**: one pass over a canonical ladder, largest first
//! - **All-or-nothing withdrawals**: a declined request leaves the stock untouched
//! - **Non-negative stock**: counts are unsigned and decrements are checked
//! - **Explicit modes**: `Inventory` is either `Unconstrained` or `Constrained`
//!
//! ## Example
//!
//! ```
//! use cash_dispenser::{CashDispenser, Denomination, Inventory};
//!
//! let inventory = Inventory::constrained([
//!     (Denomination::Bill50, 2),
//!     (Denomination::Bill20, 5),
//!     (Denomination::Bill10, 5),
//! ])
//! .unwrap();
//! let mut dispenser = CashDispenser::new(inventory);
//! let notes = dispenser.withdraw(80).unwrap();
//! assert_eq!(notes.len(), 3);
//! assert_eq!(dispenser.balance().unwrap(), 170);
//! ```

pub mod amount;
pub mod denomination;
pub mod dispenser;
pub mod error;
pub mod inventory;
pub mod stock;

pub use amount::Amount;
pub use denomination::{total_value, Denomination, Note};
pub use dispenser::{
    CashDispenser, WithdrawalOutcome, WithdrawalRequest, WithdrawalStatus,
    MAX_NOTES_PER_WITHDRAWAL,
};
pub use error::{DispenserError, Result};
pub use inventory::{Availability, Inventory};
pub use stock::{load_inventory, read_stock, StockRecord};
