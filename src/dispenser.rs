//! Withdrawal engine.
//!
//! Turns an amount into notes with a single greedy pass over the
//! denomination ladder, largest first. The pass only counts notes; nothing
//! leaves the inventory until the counts cover the whole amount. Every
//! withdrawal is all-or-nothing: if taking the planned notes fails part
//! way, the notes already taken are put back before an error is returned,
//! so a declined request leaves the inventory exactly as it was.
//!
//! `withdraw` takes `&mut self`, which gives one call exclusive use of the
//! inventory from planning to the commit or rollback. Callers sharing a
//! dispenser between threads wrap it in a `Mutex`.

use crate::amount::Amount;
use crate::denomination::{Denomination, Note};
use crate::error::{DispenserError, Result};
use crate::inventory::Inventory;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Deserialize;
use std::io::{Read, Write};

/// Most notes a single withdrawal may hand out.
///
/// Amounts that would need more notes are declined.
pub const MAX_NOTES_PER_WITHDRAWAL: u32 = 10_000_000;

/// Raw withdrawal request as read from CSV.
#[derive(Debug, Deserialize)]
pub struct WithdrawalRequest {
    /// Requested amount in whole currency units
    pub amount: Amount,
}

/// What happened to one processed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawalStatus {
    /// The notes handed out, largest first.
    Dispensed(Vec<Note>),

    /// Stock could not cover the amount; the inventory is unchanged.
    Declined,
}

/// A processed request, kept for the output report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalOutcome {
    pub amount: Amount,
    pub status: WithdrawalStatus,
}

/// A cash dispenser: an inventory plus the greedy withdrawal pass.
#[derive(Debug, Clone, Default)]
pub struct CashDispenser {
    /// Notes available for withdrawal.
    inventory: Inventory,

    /// Requests handled by `process_csv`, in input order.
    outcomes: Vec<WithdrawalOutcome>,
}

impl CashDispenser {
    /// Creates a dispenser around an existing inventory.
    pub fn new(inventory: Inventory) -> Self {
        CashDispenser {
            inventory,
            outcomes: Vec::new(),
        }
    }

    /// Creates a dispenser with limitless funds.
    pub fn unlimited() -> Self {
        Self::new(Inventory::unconstrained())
    }

    /// Creates a dispenser loaded with the factory stock.
    pub fn limited() -> Self {
        Self::new(Inventory::filled())
    }

    /// Read-only view of the inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Total value left in the machine.
    ///
    /// Fails with `UnconstrainedMode` when funds are limitless.
    pub fn balance(&self) -> Result<u64> {
        self.inventory.balance()
    }

    /// Every note left in the machine, largest first.
    ///
    /// Fails with `UnconstrainedMode` when funds are limitless.
    pub fn snapshot(&self) -> Result<Vec<Note>> {
        self.inventory.snapshot()
    }

    /// Requests processed so far by `process_csv`.
    pub fn outcomes(&self) -> &[WithdrawalOutcome] {
        &self.outcomes
    }

    /// Withdraws exactly `amount`, returning the notes largest first.
    ///
    /// Fails with `InsufficientFunds` if the current stock cannot make up
    /// the amount exactly, or if it would take more than
    /// `MAX_NOTES_PER_WITHDRAWAL` notes. The inventory is unchanged
    /// whenever an error is returned.
    pub fn withdraw(&mut self, amount: u64) -> Result<Vec<Note>> {
        if amount == 0 {
            return Ok(Vec::new());
        }

        let (plan, remaining) = self.plan_greedily(amount);
        if remaining > 0 {
            debug!("Declined {}: {} could not be covered", amount, remaining);
            return Err(DispenserError::InsufficientFunds { amount });
        }

        let mut taken = Vec::new();
        match self.take_planned(&plan, &mut taken) {
            Ok(()) => {
                debug!("Dispensed {} in {} notes", amount, taken.len());
                Ok(taken)
            }
            Err(e) => {
                self.inventory.restore(&taken);
                warn!("Declined {}: {}, restored {} notes", amount, e, taken.len());
                Err(DispenserError::InsufficientFunds { amount })
            }
        }
    }

    /// Single descending pass over the ladder.
    ///
    /// Returns how many notes of each denomination to take and the part of
    /// `amount` those notes leave uncovered. Each denomination is visited
    /// once and nothing is taken from the inventory.
    fn plan_greedily(&self, amount: u64) -> (Vec<(Denomination, u32)>, u64) {
        let mut remaining = amount;
        let mut budget = MAX_NOTES_PER_WITHDRAWAL;
        let mut plan = Vec::new();

        for &denomination in Denomination::ordered_descending() {
            let nomination = u64::from(denomination.nomination());
            let available = self.inventory.count_available(denomination);
            if remaining == 0 || nomination > remaining || available.is_exhausted() || budget == 0 {
                continue;
            }

            let required = u32::try_from(remaining / nomination)
                .unwrap_or(u32::MAX)
                .min(budget);
            let usable = available.usable(required);

            plan.push((denomination, usable));
            budget -= usable;
            remaining -= u64::from(usable) * nomination;
        }

        (plan, remaining)
    }

    /// Takes the planned notes, appending each batch to `taken`.
    fn take_planned(&mut self, plan: &[(Denomination, u32)], taken: &mut Vec<Note>) -> Result<()> {
        for &(denomination, count) in plan {
            taken.extend(self.inventory.remove(denomination, count)?);
        }
        Ok(())
    }

    /// Processes withdrawal requests from a CSV reader in streaming fashion.
    ///
    /// Requests are withdrawn in input order against the same inventory.
    /// Malformed rows are logged at warn level and skipped; declined
    /// withdrawals are logged and recorded, and processing continues.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<WithdrawalRequest>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(request) => self.process_request(request.amount, row_num),
                Err(e) => {
                    warn!("Row {}: Invalid withdrawal request: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Withdraws one request and records the outcome.
    fn process_request(&mut self, amount: Amount, row: usize) {
        let status = match self.withdraw(amount.units()) {
            Ok(notes) => {
                debug!("Row {}: Dispensed {}", row, amount);
                WithdrawalStatus::Dispensed(notes)
            }
            Err(e) => {
                warn!("Row {}: {}", row, e);
                WithdrawalStatus::Declined
            }
        };

        self.outcomes.push(WithdrawalOutcome { amount, status });
    }

    /// Writes one CSV row per processed request.
    ///
    /// Columns are `amount,status,notes`; `notes` lists the dispensed
    /// values separated by spaces and is empty for declined requests.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["amount", "status", "notes"])?;

        for outcome in &self.outcomes {
            let (status, notes) = match &outcome.status {
                WithdrawalStatus::Dispensed(notes) => ("dispensed", format_notes(notes)),
                WithdrawalStatus::Declined => ("declined", String::new()),
            };
            csv_writer.write_record([outcome.amount.to_string(), status.to_string(), notes])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn format_notes(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
