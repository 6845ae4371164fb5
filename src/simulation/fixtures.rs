//! Canonical sample expense sets used by the demos and tests.
//!
//! The Mystery Inc. road trip: Fred fronts the van fuel and the motel,
//! Thelma covers snacks, and Shaggy owes Scrappy a long-standing debt.
//! The two variants differ only in how Shaggy's old debt is split,
//! which changes the shape of the resulting chains considerably.

use crate::core::expense::{ExpenseRecord, ExpenseSet};
use crate::core::participant::ParticipantId;
use rust_decimal_macros::dec;

fn record(payer: &str, amount: rust_decimal::Decimal, participants: &[&str]) -> ExpenseRecord {
    ExpenseRecord::new(
        ParticipantId::new(payer),
        amount,
        participants.iter().map(|name| ParticipantId::new(*name)).collect(),
    )
    .expect("fixture records are valid")
}

/// Road trip, variant one: Shaggy owes Scrappy alone.
pub fn mystery_inc_trip() -> ExpenseSet {
    let mut set = ExpenseSet::new();
    set.add(
        record("Fred", dec!(40), &["Fred", "Scooby", "Shaggy", "Dafny"]).with_description("fuel"),
    );
    set.add(record("Thelma", dec!(10), &["Scooby", "Shaggy"]).with_description("snacks"));
    set.add(
        record("Fred", dec!(200), &["Dafny", "Thelma", "Scooby", "Shaggy"])
            .with_description("motel"),
    );
    set.add(record("Shaggy", dec!(500), &["Scrappy"]).with_description("old debt"));
    set
}

/// Road trip, variant two: Shaggy's old debt is split between Thelma
/// and Scrappy, which threads Thelma into the debt chains.
pub fn mystery_inc_trip_with_split_debt() -> ExpenseSet {
    let mut set = ExpenseSet::new();
    set.add(
        record("Fred", dec!(40), &["Fred", "Scooby", "Shaggy", "Dafny"]).with_description("fuel"),
    );
    set.add(record("Thelma", dec!(10), &["Scooby", "Shaggy"]).with_description("snacks"));
    set.add(
        record("Fred", dec!(200), &["Dafny", "Thelma", "Scooby", "Shaggy"])
            .with_description("motel"),
    );
    set.add(record("Shaggy", dec!(500), &["Thelma", "Scrappy"]).with_description("old debt"));
    set
}
