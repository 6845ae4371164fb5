use crate::core::expense::ExpenseSet;
use crate::core::participant::ParticipantId;
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tracks the net position of each participant.
///
/// A positive balance means the participant is owed money (net
/// creditor). A negative balance means the participant owes money
/// (net debtor).
///
/// The balance sheet is the correctness oracle for the reducer: the
/// positions computed from the reduced graph must equal the positions
/// computed directly from the original expense records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// ParticipantId -> net balance.
    /// Positive = net creditor, negative = net debtor.
    positions: HashMap<ParticipantId, Decimal>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute net positions directly from a batch of expense records.
    ///
    /// Every participant owes one share back to the payer, so the
    /// payer is credited with the sum of the shares. When the split
    /// does not divide evenly that sum differs from the raw amount by
    /// the rounding remainder, which stays with the payer. A payer who
    /// is also listed as a participant nets out their own share.
    pub fn from_expenses(set: &ExpenseSet) -> Self {
        let mut sheet = Self::new();
        for expense in set.expenses() {
            let share = expense.share();
            for participant in expense.participants() {
                *sheet
                    .positions
                    .entry(expense.payer().clone())
                    .or_insert(Decimal::ZERO) += share;
                *sheet
                    .positions
                    .entry(participant.clone())
                    .or_insert(Decimal::ZERO) -= share;
            }
        }
        sheet
    }

    /// Compute net positions from a debt graph.
    ///
    /// Each edge debits the debtor and credits the creditor by its
    /// weight. Self-edges cancel out and leave both sides untouched.
    pub fn from_graph(graph: &DebtGraph) -> Self {
        let mut sheet = Self::new();
        for (debtor, creditor, weight) in graph.edges() {
            *sheet
                .positions
                .entry(debtor.clone())
                .or_insert(Decimal::ZERO) -= weight;
            *sheet
                .positions
                .entry(creditor.clone())
                .or_insert(Decimal::ZERO) += weight;
        }
        sheet
    }

    /// Get the net position of a participant. Unknown names are zero.
    pub fn position(&self, participant: &ParticipantId) -> Decimal {
        self.positions
            .get(participant)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// All recorded positions.
    pub fn all_positions(&self) -> &HashMap<ParticipantId, Decimal> {
        &self.positions
    }

    /// Verify that the sheet is balanced: all positions sum to zero.
    pub fn is_balanced(&self) -> bool {
        self.positions.values().sum::<Decimal>() == Decimal::ZERO
    }

    /// Total amount that actually needs to change hands: the sum of
    /// positive positions (equals the sum of |negative| positions).
    pub fn total_outstanding(&self) -> Decimal {
        self.positions
            .values()
            .filter(|v| **v > Decimal::ZERO)
            .sum()
    }
}

/// The balance-conservation oracle: true iff the graph encodes exactly
/// the same net position for every name appearing in either the graph
/// or the expense records.
///
/// This is the primary correctness check for the reduction pipeline.
/// It must hold for the freshly built graph and continue to hold after
/// every reduction.
pub fn graph_matches_expenses(graph: &DebtGraph, set: &ExpenseSet) -> bool {
    let from_graph = BalanceSheet::from_graph(graph);
    let from_records = BalanceSheet::from_expenses(set);

    for name in from_graph.all_positions().keys() {
        if from_graph.position(name) != from_records.position(name) {
            return false;
        }
    }
    for name in from_records.all_positions().keys() {
        if from_graph.position(name) != from_records.position(name) {
            return false;
        }
    }
    true
}
