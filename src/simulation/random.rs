//! Random expense-network generation for stress testing.
//!
//! Produces batches of valid expense records over a synthetic group of
//! participants, used by the CLI `generate` command and the reduction
//! benchmark.

use crate::core::expense::{ExpenseRecord, ExpenseSet};
use crate::core::participant::ParticipantId;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random expense network.
#[derive(Debug, Clone)]
pub struct ExpenseNetworkConfig {
    /// Number of participants in the group.
    pub participant_count: usize,
    /// Number of expense records to generate.
    pub expense_count: usize,
    /// Largest number of participants any single expense is split among.
    pub max_group_size: usize,
    /// Minimum expense amount.
    pub min_amount: Decimal,
    /// Maximum expense amount.
    pub max_amount: Decimal,
}

impl Default for ExpenseNetworkConfig {
    fn default() -> Self {
        Self {
            participant_count: 10,
            expense_count: 30,
            max_group_size: 5,
            min_amount: Decimal::from(5),
            max_amount: Decimal::from(500),
        }
    }
}

/// Generate a random batch of expenses.
///
/// Payers are drawn uniformly; each expense is split among a random
/// subset of the group (which may include the payer, producing the
/// self-share case). All generated records pass validation.
pub fn generate_random_expenses(config: &ExpenseNetworkConfig) -> ExpenseSet {
    let mut rng = rand::thread_rng();
    let mut set = ExpenseSet::new();

    let participants: Vec<ParticipantId> = (0..config.participant_count.max(1))
        .map(|i| ParticipantId::new(format!("member-{:03}", i)))
        .collect();

    let max_group = config.max_group_size.clamp(1, participants.len());
    let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(5.0);
    let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(500.0);

    for _ in 0..config.expense_count {
        let payer = participants[rng.gen_range(0..participants.len())].clone();

        let group_size = rng.gen_range(1..=max_group);
        let group: Vec<ParticipantId> = participants
            .choose_multiple(&mut rng, group_size)
            .cloned()
            .collect();

        let amount_f64 = rng.gen_range(min_f64..=max_f64);
        let amount = Decimal::from_f64_retain(amount_f64)
            .unwrap_or(Decimal::from(10))
            .round_dp(2);
        if amount <= Decimal::ZERO {
            continue;
        }

        if let Ok(expense) = ExpenseRecord::new(payer, amount, group) {
            set.add(expense);
        }
    }

    set
}
