use crate::core::expense::{ExpenseRecord, ExpenseSet};
use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// One participant's outgoing debts.
#[derive(Debug, Clone, Default)]
struct Node {
    /// creditor -> amount owed. At most one edge per creditor.
    edges: HashMap<ParticipantId, Decimal>,
}

/// A directed weighted graph of debts between participants.
///
/// An edge from `debtor` to `creditor` carries the amount the debtor
/// owes. Multiple debts between the same ordered pair accumulate into
/// a single edge; zero-weight edges are removed rather than retained.
///
/// The graph is built from expense records and then handed to the
/// reducer, which mutates it in place until no chain of debt longer
/// than one hop survives.
///
/// # Examples
///
/// ```
/// use tally_engine::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let mut set = ExpenseSet::new();
/// set.add(ExpenseRecord::new(
///     ParticipantId::new("Fred"),
///     dec!(100),
///     vec![ParticipantId::new("Scooby"), ParticipantId::new("Shaggy")],
/// ).unwrap());
///
/// let graph = DebtGraph::from_expenses(&set);
/// assert_eq!(graph.edge_weight(&ParticipantId::new("Scooby"), &ParticipantId::new("Fred")), dec!(50));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DebtGraph {
    nodes: HashMap<ParticipantId, Node>,
}

impl DebtGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the debt graph from a batch of expense records.
    ///
    /// Records are validated at construction, so building cannot fail:
    /// every record has at least one participant and a positive amount.
    /// Record order does not affect the result, since edge weights are
    /// commutative sums.
    pub fn from_expenses(set: &ExpenseSet) -> Self {
        let mut graph = Self::new();
        for expense in set.expenses() {
            graph.apply_expense(expense);
        }
        graph
    }

    /// Apply a single expense: every participant owes one share to the
    /// payer. A self-listed payer gets a self-edge; it carries no net
    /// meaning and is stripped during reduction.
    pub fn apply_expense(&mut self, expense: &ExpenseRecord) {
        let share = expense.share();
        self.ensure_node(expense.payer());
        for participant in expense.participants() {
            self.add_debt(participant, expense.payer(), share);
        }
    }

    /// Get-or-insert the node for a participant.
    pub fn ensure_node(&mut self, participant: &ParticipantId) {
        self.nodes.entry(participant.clone()).or_default();
    }

    /// Add `amount` to the edge from `debtor` to `creditor`, creating
    /// nodes and the edge as needed. Adding zero is a no-op beyond
    /// ensuring both nodes exist.
    pub fn add_debt(&mut self, debtor: &ParticipantId, creditor: &ParticipantId, amount: Decimal) {
        self.ensure_node(creditor);
        let node = self.nodes.entry(debtor.clone()).or_default();
        if amount == Decimal::ZERO {
            return;
        }
        *node.edges.entry(creditor.clone()).or_insert(Decimal::ZERO) += amount;
    }

    /// Subtract `amount` from the edge from `debtor` to `creditor`,
    /// deleting the edge when its weight reaches zero.
    pub fn settle_debt(
        &mut self,
        debtor: &ParticipantId,
        creditor: &ParticipantId,
        amount: Decimal,
    ) {
        if let Some(node) = self.nodes.get_mut(debtor) {
            if let Some(weight) = node.edges.get_mut(creditor) {
                *weight -= amount;
                if *weight <= Decimal::ZERO {
                    node.edges.remove(creditor);
                }
            }
        }
    }

    /// Remove the edge from `debtor` to `creditor` entirely.
    pub fn remove_edge(&mut self, debtor: &ParticipantId, creditor: &ParticipantId) {
        if let Some(node) = self.nodes.get_mut(debtor) {
            node.edges.remove(creditor);
        }
    }

    /// Delete every self-edge in the graph, returning how many were
    /// removed. A node owing itself carries no net meaning.
    pub fn strip_self_edges(&mut self) -> usize {
        let mut removed = 0;
        for (name, node) in &mut self.nodes {
            if node.edges.remove(name).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// The weight of the edge from `debtor` to `creditor`, or zero if
    /// no such edge exists.
    pub fn edge_weight(&self, debtor: &ParticipantId, creditor: &ParticipantId) -> Decimal {
        self.nodes
            .get(debtor)
            .and_then(|node| node.edges.get(creditor))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Outgoing edges of a participant, sorted by creditor name for
    /// deterministic traversal.
    pub fn outgoing(&self, debtor: &ParticipantId) -> Vec<(ParticipantId, Decimal)> {
        let mut edges: Vec<(ParticipantId, Decimal)> = self
            .nodes
            .get(debtor)
            .map(|node| {
                node.edges
                    .iter()
                    .map(|(creditor, &weight)| (creditor.clone(), weight))
                    .collect()
            })
            .unwrap_or_default();
        edges.sort_by(|a, b| a.0.cmp(&b.0));
        edges
    }

    /// True iff the participant owes nothing to anyone else: every
    /// outgoing edge (if any) targets the participant itself.
    pub fn is_sink(&self, participant: &ParticipantId) -> bool {
        match self.nodes.get(participant) {
            Some(node) => node.edges.keys().all(|creditor| creditor == participant),
            None => true,
        }
    }

    /// All participants in the graph, sorted.
    pub fn participants(&self) -> Vec<ParticipantId> {
        let mut names: Vec<ParticipantId> = self.nodes.keys().cloned().collect();
        names.sort();
        names
    }

    /// All edges as (debtor, creditor, weight).
    pub fn edges(&self) -> Vec<(&ParticipantId, &ParticipantId, Decimal)> {
        self.nodes
            .iter()
            .flat_map(|(debtor, node)| {
                node.edges
                    .iter()
                    .map(move |(creditor, &weight)| (debtor, creditor, weight))
            })
            .collect()
    }

    /// Number of participants.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.edges.len()).sum()
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> Decimal {
        self.nodes
            .values()
            .flat_map(|node| node.edges.values())
            .sum()
    }
}
