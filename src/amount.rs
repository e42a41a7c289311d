//! Withdrawal amounts as presented by callers.
//!
//! Amounts arrive as text and are parsed with `rust_decimal`, so "80",
//! " 80 " and "80.00" all name the same request. Anything that is not a
//! non-negative whole number of currency units is rejected here, before it
//! can reach the withdrawal pass.

use crate::error::{DispenserError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// A validated, non-negative withdrawal amount in whole currency units.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use cash_dispenser::Amount;
///
/// let amount = Amount::from_str("80.00").unwrap();
/// assert_eq!(amount.units(), 80);
/// assert!(Amount::from_str("-5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(u64);

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(0);

    pub fn new(units: u64) -> Self {
        Amount(units)
    }

    /// Number of whole currency units.
    pub fn units(self) -> u64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = DispenserError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = |reason| DispenserError::InvalidAmount {
            value: trimmed.to_string(),
            reason,
        };

        let decimal = Decimal::from_str(trimmed).map_err(|_| invalid("not a number"))?;
        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(invalid("amount must not be negative"));
        }
        if !decimal.fract().is_zero() {
            return Err(invalid("amount must be a whole number of units"));
        }

        decimal
            .abs()
            .to_u64()
            .map(Amount)
            .ok_or_else(|| invalid("amount is too large"))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
