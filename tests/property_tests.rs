use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::{HashSet, VecDeque};
use tally_engine::core::balance::{graph_matches_expenses, BalanceSheet};
use tally_engine::core::expense::{ExpenseRecord, ExpenseSet};
use tally_engine::core::participant::ParticipantId;
use tally_engine::graph::debt_graph::DebtGraph;
use tally_engine::optimization::reducer::reduce;

/// Generate a random participant from a small pool (to increase the
/// probability of chains and cycles).
fn arb_participant() -> impl Strategy<Value = ParticipantId> {
    prop::sample::select(vec![
        ParticipantId::new("A"),
        ParticipantId::new("B"),
        ParticipantId::new("C"),
        ParticipantId::new("D"),
        ParticipantId::new("E"),
        ParticipantId::new("F"),
    ])
}

/// Generate a random positive amount (1 to 10,000).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1u64..10_000u64).prop_map(Decimal::from)
}

/// Generate a random valid expense. The payer may or may not appear
/// in the split group, covering the self-share case.
fn arb_expense() -> impl Strategy<Value = ExpenseRecord> {
    (
        arb_participant(),
        arb_amount(),
        prop::collection::hash_set(arb_participant(), 1..5),
    )
        .prop_map(|(payer, amount, group)| {
            ExpenseRecord::new(payer, amount, group.into_iter().collect())
                .expect("generated records are valid")
        })
}

/// Generate a random expense batch of 1..30 records.
fn arb_expense_set() -> impl Strategy<Value = ExpenseSet> {
    prop::collection::vec(arb_expense(), 1..30)
        .prop_map(|records| records.into_iter().collect::<ExpenseSet>())
}

/// All participants reachable from `start` along directed edges.
fn reachable(graph: &DebtGraph, start: &ParticipantId) -> HashSet<ParticipantId> {
    let mut seen: HashSet<ParticipantId> = HashSet::new();
    let mut queue: VecDeque<ParticipantId> = VecDeque::new();
    queue.push_back(start.clone());
    while let Some(current) = queue.pop_front() {
        for (next, _) in graph.outgoing(&current) {
            if seen.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }
    seen
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Balance conservation.
    //
    // For every name in either the records or the reduced graph, the net
    // balance computed from the reduced graph equals the net balance
    // computed from the records. This is the primary correctness oracle.
    // ===================================================================
    #[test]
    fn reduction_conserves_balances(set in arb_expense_set()) {
        let mut graph = DebtGraph::from_expenses(&set);
        prop_assert!(
            graph_matches_expenses(&graph, &set),
            "Freshly built graph must already encode the record balances"
        );
        reduce(&mut graph);
        prop_assert!(
            graph_matches_expenses(&graph, &set),
            "Reduction must not change any participant's net position"
        );
    }

    // ===================================================================
    // INVARIANT 2: Idempotence.
    //
    // A reduced graph is a fixed point: reducing again collapses nothing.
    // ===================================================================
    #[test]
    fn reduction_is_idempotent(set in arb_expense_set()) {
        let mut graph = DebtGraph::from_expenses(&set);
        reduce(&mut graph);
        let summary = reduce(&mut graph);
        prop_assert_eq!(
            summary.collapses, 0,
            "Second reduction must find nothing to collapse"
        );
    }

    // ===================================================================
    // INVARIANT 3: No residual chains.
    //
    // After reduction every remaining edge lands directly on a sink:
    // the graph's diameter along positive-weight edges is at most one,
    // ignoring self-loops.
    // ===================================================================
    #[test]
    fn no_residual_chains(set in arb_expense_set()) {
        let mut graph = DebtGraph::from_expenses(&set);
        reduce(&mut graph);
        for debtor in graph.participants() {
            for (creditor, weight) in graph.outgoing(&debtor) {
                prop_assert!(weight > Decimal::ZERO);
                prop_assert!(
                    graph.is_sink(&creditor),
                    "{} -> {} chains on beyond one hop",
                    debtor,
                    creditor
                );
            }
        }
    }

    // ===================================================================
    // INVARIANT 4: No spurious edges.
    //
    // Reduction never invents a debt between two participants that had
    // no direct or transitive debt relationship in the original graph.
    // ===================================================================
    #[test]
    fn no_spurious_edges(set in arb_expense_set()) {
        let original = DebtGraph::from_expenses(&set);
        let mut graph = original.clone();
        reduce(&mut graph);
        for (debtor, creditor, _) in graph.edges() {
            prop_assert!(
                reachable(&original, debtor).contains(creditor),
                "{} -> {} has no debt relationship in the input",
                debtor,
                creditor
            );
        }
    }

    // ===================================================================
    // INVARIANT 5: Weights stay positive and edges simple.
    //
    // Every retained edge carries positive weight, and self-edges never
    // survive reduction.
    // ===================================================================
    #[test]
    fn edges_positive_and_no_self_loops(set in arb_expense_set()) {
        let mut graph = DebtGraph::from_expenses(&set);
        reduce(&mut graph);
        for (debtor, creditor, weight) in graph.edges() {
            prop_assert!(weight > Decimal::ZERO, "Zero-weight edge retained");
            prop_assert_ne!(debtor, creditor, "Self-edge survived reduction");
        }
    }

    // ===================================================================
    // INVARIANT 6: Reduction is deterministic.
    //
    // Two graphs built from the same records reduce to identical edge
    // sets. Traversal orders are sorted, so no hidden iteration-order
    // dependence may leak into the result.
    // ===================================================================
    #[test]
    fn reduction_is_deterministic(set in arb_expense_set()) {
        let mut first = DebtGraph::from_expenses(&set);
        let mut second = DebtGraph::from_expenses(&set);
        reduce(&mut first);
        reduce(&mut second);

        prop_assert_eq!(first.edge_count(), second.edge_count());
        for (debtor, creditor, weight) in first.edges() {
            prop_assert_eq!(second.edge_weight(debtor, creditor), weight);
        }
    }

    // ===================================================================
    // INVARIANT 7: Reduction never increases total debt volume.
    //
    // Collapses only move or cancel weight; the sum of all edge weights
    // can only shrink or stay put.
    // ===================================================================
    #[test]
    fn total_weight_never_grows(set in arb_expense_set()) {
        let mut graph = DebtGraph::from_expenses(&set);
        let before = graph.total_weight();
        reduce(&mut graph);
        prop_assert!(
            graph.total_weight() <= before,
            "Total weight grew from {} to {}",
            before,
            graph.total_weight()
        );
    }

    // ===================================================================
    // INVARIANT 8: The balance sheet always balances.
    //
    // Positions computed from any record batch sum to exactly zero:
    // every credit has a matching debit.
    // ===================================================================
    #[test]
    fn balance_sheet_sums_to_zero(set in arb_expense_set()) {
        let sheet = BalanceSheet::from_expenses(&set);
        prop_assert!(sheet.is_balanced());

        let mut graph = DebtGraph::from_expenses(&set);
        reduce(&mut graph);
        prop_assert!(BalanceSheet::from_graph(&graph).is_balanced());
    }
}
