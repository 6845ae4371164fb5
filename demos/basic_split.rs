//! Basic expense splitting example.
//!
//! Demonstrates how the engine turns a handful of group expenses into
//! the minimal set of direct transfers.

use rust_decimal_macros::dec;
use tally_engine::core::balance::graph_matches_expenses;
use tally_engine::core::expense::{ExpenseRecord, ExpenseSet};
use tally_engine::core::participant::ParticipantId;
use tally_engine::graph::debt_graph::DebtGraph;
use tally_engine::optimization::reducer::reduce;
use tally_engine::report::TransferReport;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║   tally-engine: Basic Splitting Example   ║");
    println!("╚══════════════════════════════════════════╝\n");

    // --- Scenario 1: One dinner, split three ways ---
    println!("━━━ Scenario 1: One dinner ━━━\n");

    let alice = ParticipantId::new("Alice");
    let bob = ParticipantId::new("Bob");
    let carol = ParticipantId::new("Carol");

    let mut set = ExpenseSet::new();
    set.add(
        ExpenseRecord::new(alice.clone(), dec!(90), vec![bob.clone(), carol.clone()])
            .expect("valid record")
            .with_description("dinner"),
    );

    let mut graph = DebtGraph::from_expenses(&set);
    reduce(&mut graph);
    println!("{}", TransferReport::new(&graph));

    // --- Scenario 2: A chain of debts shortens ---
    println!("━━━ Scenario 2: Chains collapse ━━━\n");

    let mut set = ExpenseSet::new();
    set.add(
        ExpenseRecord::new(alice.clone(), dec!(50), vec![bob.clone()])
            .expect("valid record")
            .with_description("concert ticket"),
    );
    set.add(
        ExpenseRecord::new(bob.clone(), dec!(30), vec![carol.clone()])
            .expect("valid record")
            .with_description("taxi"),
    );

    let mut graph = DebtGraph::from_expenses(&set);
    let summary = reduce(&mut graph);

    // Carol never owed Alice directly, but pays her straight away now.
    println!("{}", TransferReport::new(&graph));
    println!("{}", summary);
    println!("Balances preserved: {}", graph_matches_expenses(&graph, &set));
}
