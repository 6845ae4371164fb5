use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_engine::core::balance::{graph_matches_expenses, BalanceSheet};
use tally_engine::core::expense::{ExpenseError, ExpenseRecord, ExpenseSet};
use tally_engine::core::participant::ParticipantId;
use tally_engine::graph::debt_graph::DebtGraph;
use tally_engine::optimization::reducer::reduce;
use tally_engine::report::TransferReport;
use tally_engine::simulation::fixtures;

fn p(name: &str) -> ParticipantId {
    ParticipantId::new(name)
}

fn names(list: &[&str]) -> Vec<ParticipantId> {
    list.iter().map(|n| p(n)).collect()
}

/// Full pipeline over the road-trip fixture: expenses → graph →
/// reduction → report, with the conservation oracle checked at each
/// stage.
#[test]
fn full_pipeline_road_trip() {
    let set = fixtures::mystery_inc_trip();
    let mut graph = DebtGraph::from_expenses(&set);
    assert!(graph_matches_expenses(&graph, &set));

    let summary = reduce(&mut graph);
    assert!(graph_matches_expenses(&graph, &set));
    assert!(summary.collapses > 0);
    assert!(summary.edges_after <= summary.edges_before);

    // Net positions are fixed by the records alone.
    let positions = BalanceSheet::from_graph(&graph);
    assert_eq!(positions.position(&p("Fred")), dec!(230));
    assert_eq!(positions.position(&p("Scooby")), dec!(-65));
    assert_eq!(positions.position(&p("Shaggy")), dec!(435));
    assert_eq!(positions.position(&p("Dafny")), dec!(-60));
    assert_eq!(positions.position(&p("Thelma")), dec!(-40));
    assert_eq!(positions.position(&p("Scrappy")), dec!(-500));

    // No chain survives: every remaining edge lands on a sink.
    for debtor in graph.participants() {
        for (creditor, weight) in graph.outgoing(&debtor) {
            assert!(weight > Decimal::ZERO);
            assert!(graph.is_sink(&creditor));
        }
    }

    // Creditors never appear as debtors in the report.
    let report = TransferReport::new(&graph);
    assert!(!report.is_empty());
    for entry in report.entries() {
        assert_ne!(entry.debtor, p("Fred"));
        assert_ne!(entry.debtor, p("Shaggy"));
    }
}

/// The split-debt variant threads Thelma into the chains; the oracle
/// and minimality must hold there too.
#[test]
fn full_pipeline_road_trip_split_debt() {
    let set = fixtures::mystery_inc_trip_with_split_debt();
    let mut graph = DebtGraph::from_expenses(&set);
    reduce(&mut graph);

    assert!(graph_matches_expenses(&graph, &set));
    for debtor in graph.participants() {
        for (creditor, _) in graph.outgoing(&debtor) {
            assert!(graph.is_sink(&creditor));
        }
    }
}

/// Scenario: one record, two debtors. Already minimal.
#[test]
fn single_record_is_minimal() {
    let mut set = ExpenseSet::new();
    set.add(ExpenseRecord::new(p("A"), dec!(100), names(&["B", "C"])).unwrap());

    let mut graph = DebtGraph::from_expenses(&set);
    let summary = reduce(&mut graph);

    assert_eq!(summary.collapses, 0);
    assert_eq!(graph.edge_weight(&p("B"), &p("A")), dec!(50));
    assert_eq!(graph.edge_weight(&p("C"), &p("A")), dec!(50));
}

/// Scenario: a two-edge chain collapses into direct transfers.
#[test]
fn chain_shortens_to_one_hop() {
    let mut set = ExpenseSet::new();
    set.add(ExpenseRecord::new(p("A"), dec!(50), names(&["B"])).unwrap());
    set.add(ExpenseRecord::new(p("B"), dec!(30), names(&["C"])).unwrap());

    let mut graph = DebtGraph::from_expenses(&set);
    reduce(&mut graph);

    assert_eq!(graph.edge_weight(&p("C"), &p("A")), dec!(30));
    assert_eq!(graph.edge_weight(&p("B"), &p("A")), dec!(20));
    assert_eq!(graph.edge_weight(&p("C"), &p("B")), Decimal::ZERO);
    assert!(graph_matches_expenses(&graph, &set));
}

/// Scenario: a symmetric cycle cancels completely.
#[test]
fn symmetric_cycle_cancels() {
    let mut set = ExpenseSet::new();
    set.add(ExpenseRecord::new(p("X"), dec!(10), names(&["Y"])).unwrap());
    set.add(ExpenseRecord::new(p("Y"), dec!(10), names(&["X"])).unwrap());

    let mut graph = DebtGraph::from_expenses(&set);
    reduce(&mut graph);

    assert_eq!(graph.edge_count(), 0);
    assert!(TransferReport::new(&graph).is_empty());
    assert!(graph_matches_expenses(&graph, &set));
}

/// Scenario: a record with no participants is rejected before any
/// graph exists.
#[test]
fn degenerate_record_rejected() {
    let result = ExpenseRecord::new(p("A"), dec!(100), vec![]);
    assert!(matches!(result, Err(ExpenseError::NoParticipants { .. })));
}

/// Scenario: payer listed among the participants leaves no
/// net-affecting self debt.
#[test]
fn self_listed_payer_neutral() {
    let mut set = ExpenseSet::new();
    set.add(ExpenseRecord::new(p("A"), dec!(40), names(&["A", "B"])).unwrap());

    let mut graph = DebtGraph::from_expenses(&set);
    reduce(&mut graph);

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge_weight(&p("B"), &p("A")), dec!(20));
    assert!(graph_matches_expenses(&graph, &set));
}

/// Large amounts over uneven splits exercise shares that a raw
/// division would leave as repeating decimals; the oracle must hold
/// through the whole pipeline regardless of accumulation order.
#[test]
fn uneven_splits_at_scale_conserve_balances() {
    let mut set = ExpenseSet::new();
    set.add(ExpenseRecord::new(p("A"), dec!(6725), names(&["B", "C", "D"])).unwrap());
    set.add(ExpenseRecord::new(p("B"), dec!(4087), names(&["A", "C", "D"])).unwrap());
    set.add(ExpenseRecord::new(p("C"), dec!(1309), names(&["A", "B", "D", "E"])).unwrap());
    set.add(ExpenseRecord::new(p("D"), dec!(5748), names(&["A", "B", "C"])).unwrap());
    set.add(ExpenseRecord::new(p("E"), dec!(9637), names(&["A", "B", "C", "D"])).unwrap());

    let sheet = BalanceSheet::from_expenses(&set);
    assert!(sheet.is_balanced());

    let mut graph = DebtGraph::from_expenses(&set);
    assert!(graph_matches_expenses(&graph, &set));

    reduce(&mut graph);
    assert!(graph_matches_expenses(&graph, &set));
    assert!(BalanceSheet::from_graph(&graph).is_balanced());
}

/// Reduction reaches a fixed point: a second run changes nothing.
#[test]
fn reduction_idempotent_on_fixture() {
    let set = fixtures::mystery_inc_trip_with_split_debt();
    let mut graph = DebtGraph::from_expenses(&set);
    reduce(&mut graph);

    let before: Vec<(String, String, Decimal)> = graph
        .edges()
        .into_iter()
        .map(|(d, c, w)| (d.to_string(), c.to_string(), w))
        .collect();

    let summary = reduce(&mut graph);
    assert_eq!(summary.collapses, 0);
    assert_eq!(summary.sweeps, 1);

    let after: Vec<(String, String, Decimal)> = graph
        .edges()
        .into_iter()
        .map(|(d, c, w)| (d.to_string(), c.to_string(), w))
        .collect();
    assert_eq!(before.len(), after.len());
    for edge in before {
        assert!(after.contains(&edge));
    }
}

/// The transfer report serializes to the documented JSON shape.
#[test]
fn report_serializes() {
    let mut graph = DebtGraph::new();
    graph.add_debt(&p("Scooby"), &p("Fred"), dec!(60));

    let report = TransferReport::new(&graph);
    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["entries"][0]["debtor"], "Scooby");
    assert_eq!(parsed["entries"][0]["transfers"][0]["creditor"], "Fred");
}

/// Expense records survive a JSON round trip with string amounts.
#[test]
fn expense_json_round_trip() {
    let expense = ExpenseRecord::new(p("Fred"), dec!(40), names(&["Scooby", "Shaggy"]))
        .unwrap()
        .with_description("fuel");

    let json = serde_json::to_string(&expense).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["payer"], "Fred");
    assert_eq!(parsed["description"], "fuel");

    let back: ExpenseRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back.amount(), dec!(40));
    assert_eq!(back.participants().len(), 2);
}
