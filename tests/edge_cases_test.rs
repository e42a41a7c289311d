//! Edge case and property tests for the withdrawal engine.

use cash_dispenser::{
    total_value, Availability, CashDispenser, Denomination, DispenserError, Inventory, Note,
};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use std::thread;

fn stocked(stock: &[(u32, u32)]) -> CashDispenser {
    let inventory = Inventory::constrained(
        stock
            .iter()
            .map(|&(value, count)| (Denomination::from_nomination(value).unwrap(), count)),
    )
    .unwrap();
    CashDispenser::new(inventory)
}

fn values(notes: &[Note]) -> Vec<u32> {
    notes.iter().map(|n| n.nomination()).collect()
}

// ==================== SCENARIOS ====================

#[test]
fn test_subset_stock_withdraws_eighty() {
    let mut dispenser = stocked(&[(50, 12), (20, 20), (10, 50), (5, 100), (2, 250), (1, 500)]);
    let before = dispenser.balance().unwrap();

    let notes = dispenser.withdraw(80).unwrap();

    assert_eq!(values(&notes), vec![50, 20, 10]);
    assert_eq!(dispenser.balance().unwrap(), before - 80);
}

#[test]
fn test_unlimited_withdraws_forty() {
    let mut dispenser = CashDispenser::unlimited();
    assert_eq!(values(&dispenser.withdraw(40).unwrap()), vec![20, 20]);
}

#[test]
fn test_single_twenty_cannot_cover_thirty() {
    let mut dispenser = stocked(&[(20, 1)]);

    let err = dispenser.withdraw(30).unwrap_err();

    assert!(matches!(err, DispenserError::InsufficientFunds { amount: 30 }));
    assert!(err.to_string().contains("(30)"));
    assert_eq!(
        dispenser.inventory().count_available(Denomination::Bill20),
        Availability::Limited(1)
    );
}

#[test]
fn test_unlimited_balance_and_snapshot_fail() {
    let dispenser = CashDispenser::unlimited();
    assert!(matches!(
        dispenser.balance(),
        Err(DispenserError::UnconstrainedMode)
    ));
    assert!(matches!(
        dispenser.snapshot(),
        Err(DispenserError::UnconstrainedMode)
    ));
}

#[test]
fn test_zero_in_both_modes() {
    let mut unlimited = CashDispenser::unlimited();
    assert!(unlimited.withdraw(0).unwrap().is_empty());

    let mut limited = CashDispenser::limited();
    let before = limited.snapshot().unwrap();
    assert!(limited.withdraw(0).unwrap().is_empty());
    assert_eq!(limited.snapshot().unwrap(), before);

    let mut empty = stocked(&[]);
    assert!(empty.withdraw(0).unwrap().is_empty());
}

// ==================== STOCK EDGE CASES ====================

#[test]
fn test_empty_inventory_declines_everything() {
    let mut dispenser = stocked(&[]);
    assert!(dispenser.withdraw(1).is_err());
    assert_eq!(dispenser.balance().unwrap(), 0);
}

#[test]
fn test_coins_cover_remainder() {
    let mut dispenser = stocked(&[(10, 1), (2, 3), (1, 1)]);
    let notes = dispenser.withdraw(17).unwrap();

    assert_eq!(values(&notes), vec![10, 2, 2, 2, 1]);
    assert!(notes[1..].iter().all(|n| n.denomination().is_coin()));
    assert_eq!(dispenser.balance().unwrap(), 0);
}

#[test]
fn test_exhausted_largest_denomination_falls_through() {
    let mut dispenser = stocked(&[(500, 0), (200, 10)]);
    assert_eq!(values(&dispenser.withdraw(600).unwrap()), vec![200, 200, 200]);
}

#[test]
fn test_declined_then_smaller_request_succeeds() {
    let mut dispenser = stocked(&[(50, 1), (10, 2)]);

    assert!(dispenser.withdraw(80).is_err());
    assert_eq!(dispenser.balance().unwrap(), 70);

    assert_eq!(values(&dispenser.withdraw(60).unwrap()), vec![50, 10]);
    assert_eq!(dispenser.balance().unwrap(), 10);
}

#[test]
fn test_repeated_withdrawals_drain_factory_stock() {
    let mut dispenser = CashDispenser::limited();
    let mut dispensed = 0;
    while dispenser.withdraw(100).is_ok() {
        dispensed += 100;
    }

    // 500 and 200 bills are never reached by a request of 100
    assert_eq!(dispensed, 3500);
    assert_eq!(dispenser.balance().unwrap(), 1600);
    assert!(dispenser
        .snapshot()
        .unwrap()
        .iter()
        .all(|n| n.nomination() >= 200));
}

#[test]
fn test_large_unlimited_amount() {
    let mut dispenser = CashDispenser::unlimited();
    let notes = dispenser.withdraw(1_000_003).unwrap();

    assert_eq!(total_value(&notes), 1_000_003);
    assert_eq!(notes.len(), 2000 + 1 + 1);
}

// ==================== SHARED ACCESS ====================

#[test]
fn test_mutex_serializes_concurrent_withdrawals() {
    let dispenser = Arc::new(Mutex::new(stocked(&[(20, 10)])));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let dispenser = Arc::clone(&dispenser);
            thread::spawn(move || {
                let mut guard = dispenser.lock().unwrap();
                guard.withdraw(40).is_ok()
            })
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&ok| ok)
        .count();

    assert_eq!(successes, 5);
    assert_eq!(dispenser.lock().unwrap().balance().unwrap(), 0);
}

// ==================== PROPERTIES ====================

fn stock_strategy() -> impl Strategy<Value = Vec<(Denomination, u32)>> {
    prop::collection::vec(0u32..20, Denomination::ALL.len()).prop_map(|counts| {
        Denomination::ALL
            .iter()
            .copied()
            .zip(counts)
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_unlimited_is_exact(amount in 0u64..100_000) {
        let mut dispenser = CashDispenser::unlimited();
        let notes = dispenser.withdraw(amount).unwrap();
        prop_assert_eq!(total_value(&notes), amount);
    }

    #[test]
    fn prop_notes_are_descending(amount in 0u64..10_000) {
        let mut dispenser = CashDispenser::unlimited();
        let notes = dispenser.withdraw(amount).unwrap();
        prop_assert!(notes.windows(2).all(|w| w[0].nomination() >= w[1].nomination()));
    }

    #[test]
    fn prop_constrained_commit_or_rollback(
        stock in stock_strategy(),
        amounts in prop::collection::vec(0u64..2_000, 1..10),
    ) {
        let mut dispenser = CashDispenser::new(Inventory::constrained(stock).unwrap());

        for amount in amounts {
            let balance = dispenser.balance().unwrap();
            let snapshot = dispenser.snapshot().unwrap();

            match dispenser.withdraw(amount) {
                Ok(notes) => {
                    prop_assert_eq!(total_value(&notes), amount);
                    prop_assert_eq!(dispenser.balance().unwrap(), balance - amount);
                }
                Err(DispenserError::InsufficientFunds { amount: declined }) => {
                    prop_assert_eq!(declined, amount);
                    prop_assert_eq!(dispenser.balance().unwrap(), balance);
                    prop_assert_eq!(dispenser.snapshot().unwrap(), snapshot);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}
