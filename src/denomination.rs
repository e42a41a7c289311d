//! The denomination ladder and the `Note` unit handed out by the dispenser.
//!
//! The ladder is canonical: greedy largest-first selection always yields an
//! exact decomposition when supply allows. Nothing here verifies that
//! property, so replacing the ladder with a non-canonical set is the
//! caller's responsibility.

use crate::error::{DispenserError, Result};
use serde::Deserialize;
use std::fmt;

/// A face value a note or coin may take.
///
/// Variants are declared largest first, and the derived ordering follows
/// declaration order, so sorted collections keyed by `Denomination` iterate
/// from the highest nomination down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub enum Denomination {
    Bill500,
    Bill200,
    Bill100,
    Bill50,
    Bill20,
    Bill10,
    Bill5,
    Coin2,
    Coin1,
}

impl Denomination {
    /// Every denomination, sorted by nomination descending.
    pub const ALL: [Denomination; 9] = [
        Denomination::Bill500,
        Denomination::Bill200,
        Denomination::Bill100,
        Denomination::Bill50,
        Denomination::Bill20,
        Denomination::Bill10,
        Denomination::Bill5,
        Denomination::Coin2,
        Denomination::Coin1,
    ];

    /// Returns the catalog in the order the withdrawal pass visits it.
    pub fn ordered_descending() -> &'static [Denomination] {
        &Self::ALL
    }

    /// Face value in whole currency units.
    pub const fn nomination(self) -> u32 {
        match self {
            Denomination::Bill500 => 500,
            Denomination::Bill200 => 200,
            Denomination::Bill100 => 100,
            Denomination::Bill50 => 50,
            Denomination::Bill20 => 20,
            Denomination::Bill10 => 10,
            Denomination::Bill5 => 5,
            Denomination::Coin2 => 2,
            Denomination::Coin1 => 1,
        }
    }

    /// Returns `true` for the values dispensed as coins rather than bills.
    pub fn is_coin(self) -> bool {
        matches!(self, Denomination::Coin2 | Denomination::Coin1)
    }

    /// Looks up the denomination with the given face value.
    pub fn from_nomination(value: u32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.nomination() == value)
            .ok_or(DispenserError::UnknownDenomination(value))
    }
}

impl TryFrom<u32> for Denomination {
    type Error = DispenserError;

    fn try_from(value: u32) -> Result<Self> {
        Denomination::from_nomination(value)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nomination())
    }
}

/// One physical note or coin.
///
/// Notes of the same denomination are interchangeable; only counts matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Note(pub Denomination);

impl Note {
    pub fn denomination(self) -> Denomination {
        self.0
    }

    pub fn nomination(self) -> u32 {
        self.0.nomination()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Sums the face values of `notes`.
pub fn total_value(notes: &[Note]) -> u64 {
    notes.iter().map(|n| u64::from(n.nomination())).sum()
}
