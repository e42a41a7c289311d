//! Note inventory held by the dispenser.
//!
//! An inventory is either unconstrained (every denomination is in infinite
//! supply and nothing is tracked) or constrained (a finite count per
//! denomination). Counts are unsigned and every decrement is checked, so a
//! constrained inventory can never report a negative count.

use crate::denomination::{Denomination, Note};
use crate::error::{DispenserError, Result};
use std::collections::BTreeMap;

/// Default cassette fill for a freshly serviced machine.
const FACTORY_STOCK: [(Denomination, u32); 9] = [
    (Denomination::Bill500, 2),
    (Denomination::Bill200, 3),
    (Denomination::Bill100, 5),
    (Denomination::Bill50, 12),
    (Denomination::Bill20, 20),
    (Denomination::Bill10, 50),
    (Denomination::Bill5, 100),
    (Denomination::Coin2, 250),
    (Denomination::Coin1, 500),
];

/// How many notes of a denomination can be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Infinite supply.
    Unbounded,
    /// A finite number of notes, possibly zero.
    Limited(u32),
}

impl Availability {
    /// Returns `true` if no note of the denomination can be taken.
    pub fn is_exhausted(self) -> bool {
        self == Availability::Limited(0)
    }

    /// Caps `required` at what is available.
    pub fn usable(self, required: u32) -> u32 {
        match self {
            Availability::Unbounded => required,
            Availability::Limited(count) => required.min(count),
        }
    }
}

/// The notes a dispenser can hand out.
///
/// # Invariants
///
/// - In `Constrained` mode every denomination of the ladder has an entry
/// - Counts never go below zero; `remove` refuses rather than underflows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inventory {
    /// No stored state; every denomination is always sufficient.
    Unconstrained,

    /// Finite stock keyed by denomination, largest first.
    Constrained(BTreeMap<Denomination, u32>),
}

impl Inventory {
    /// Creates an inventory with limitless funds.
    pub fn unconstrained() -> Self {
        Inventory::Unconstrained
    }

    /// Creates a constrained inventory from an initial stock table.
    ///
    /// Denominations absent from `stock` start with zero notes. Repeated
    /// entries for one denomination are added together; fails with
    /// `StockOverflow` if a total no longer fits in a `u32`.
    pub fn constrained<I>(stock: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Denomination, u32)>,
    {
        let mut counts = Self::empty_counts();
        for (denomination, count) in stock {
            let held = counts.entry(denomination).or_insert(0);
            *held = held
                .checked_add(count)
                .ok_or(DispenserError::StockOverflow { denomination })?;
        }
        Ok(Inventory::Constrained(counts))
    }

    fn empty_counts() -> BTreeMap<Denomination, u32> {
        Denomination::ordered_descending()
            .iter()
            .map(|&d| (d, 0))
            .collect()
    }

    /// The default stock table loaded into a freshly serviced machine.
    pub fn factory_stock() -> BTreeMap<Denomination, u32> {
        FACTORY_STOCK.into_iter().collect()
    }

    /// Creates a constrained inventory holding the factory stock.
    pub fn filled() -> Self {
        let mut counts = Self::empty_counts();
        counts.extend(Self::factory_stock());
        Inventory::Constrained(counts)
    }

    /// Returns `true` if the inventory tracks finite stock.
    pub fn is_constrained(&self) -> bool {
        matches!(self, Inventory::Constrained(_))
    }

    /// Total value of all held notes.
    pub fn balance(&self) -> Result<u64> {
        let counts = self.counts()?;
        Ok(counts
            .iter()
            .map(|(d, &count)| u64::from(d.nomination()) * u64::from(count))
            .sum())
    }

    /// All held notes, sorted by denomination descending.
    pub fn snapshot(&self) -> Result<Vec<Note>> {
        let counts = self.counts()?;
        Ok(counts
            .iter()
            .flat_map(|(&d, &count)| std::iter::repeat(Note(d)).take(count as usize))
            .collect())
    }

    /// Number of notes of `denomination` that can be taken right now.
    pub fn count_available(&self, denomination: Denomination) -> Availability {
        match self {
            Inventory::Unconstrained => Availability::Unbounded,
            Inventory::Constrained(counts) => {
                Availability::Limited(counts.get(&denomination).copied().unwrap_or(0))
            }
        }
    }

    /// Takes `n` notes of `denomination` out of the inventory.
    ///
    /// Fails without touching the stock if fewer than `n` notes are held.
    /// In unconstrained mode the notes are simply minted.
    pub fn remove(&mut self, denomination: Denomination, n: u32) -> Result<Vec<Note>> {
        if let Inventory::Constrained(counts) = self {
            let held = counts.entry(denomination).or_insert(0);
            *held = held
                .checked_sub(n)
                .ok_or(DispenserError::InsufficientStock {
                    denomination,
                    requested: n,
                    available: *held,
                })?;
        }
        Ok(vec![Note(denomination); n as usize])
    }

    /// Puts `notes` back into the inventory. No-op in unconstrained mode.
    pub fn restore(&mut self, notes: &[Note]) {
        if let Inventory::Constrained(counts) = self {
            for note in notes {
                let held = counts.entry(note.denomination()).or_insert(0);
                *held = held.saturating_add(1);
            }
        }
    }

    /// Read-only view of the per-denomination counts.
    pub fn counts(&self) -> Result<&BTreeMap<Denomination, u32>> {
        match self {
            Inventory::Unconstrained => Err(DispenserError::UnconstrainedMode),
            Inventory::Constrained(counts) => Ok(counts),
        }
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::unconstrained()
    }
}
