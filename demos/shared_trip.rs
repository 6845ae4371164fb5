//! The Mystery Inc. road trip, both variants.
//!
//! Runs the full pipeline over the two canonical fixture sets and
//! verifies the balance-conservation oracle after each reduction,
//! mirroring how the engine is meant to be driven end to end.

use tally_engine::core::balance::graph_matches_expenses;
use tally_engine::graph::debt_graph::DebtGraph;
use tally_engine::optimization::reducer::reduce;
use tally_engine::report::TransferReport;
use tally_engine::simulation::fixtures;

fn main() {
    let sets = [
        ("road trip", fixtures::mystery_inc_trip()),
        ("road trip, split debt", fixtures::mystery_inc_trip_with_split_debt()),
    ];

    for (name, set) in sets {
        println!("=== For set: {} ===", name);

        let mut graph = DebtGraph::from_expenses(&set);
        let summary = reduce(&mut graph);

        println!("{}", TransferReport::new(&graph));
        println!(
            "{} collapses over {} sweeps, {} -> {} edges",
            summary.collapses, summary.sweeps, summary.edges_before, summary.edges_after
        );

        if graph_matches_expenses(&graph, &set) {
            println!("Balances preserved.\n");
        } else {
            eprintln!("Wrong answer: net balances changed!\n");
        }
    }
}
