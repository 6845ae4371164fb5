//! tally-engine CLI
//!
//! Simplify shared-expense batches from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Simplify an expense batch into minimal transfers
//! tally-engine simplify --input expenses.json
//!
//! # Output as JSON
//! tally-engine simplify --input expenses.json --format json
//!
//! # Show net balances without reducing
//! tally-engine balances --input expenses.json
//!
//! # Generate a random expense batch for testing
//! tally-engine generate --participants 10 --expenses 30
//! ```

use rust_decimal::Decimal;
use std::fs;
use std::process;
use tally_engine::core::balance::{graph_matches_expenses, BalanceSheet};
use tally_engine::core::expense::{ExpenseRecord, ExpenseSet};
use tally_engine::core::participant::ParticipantId;
use tally_engine::graph::debt_graph::DebtGraph;
use tally_engine::optimization::reducer::reduce;
use tally_engine::report::TransferReport;
use tally_engine::simulation::random::{generate_random_expenses, ExpenseNetworkConfig};

fn print_usage() {
    eprintln!(
        r#"tally-engine — shared-expense debt simplification

USAGE:
    tally-engine <COMMAND> [OPTIONS]

COMMANDS:
    simplify    Reduce an expense batch to the minimal set of transfers
    balances    Show each participant's net position
    generate    Generate a random expense batch (for testing)
    help        Show this message

OPTIONS (simplify, balances):
    --input <FILE>      Path to JSON expenses file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --participants <N>  Number of participants (default: 10)
    --expenses <N>      Number of expense records (default: 30)
    --max-group <N>     Largest split group (default: 5)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    tally-engine simplify --input expenses.json
    tally-engine simplify --input expenses.json --format json
    tally-engine balances --input expenses.json
    tally-engine generate --participants 8 --expenses 40 --output test.json"#
    );
}

/// JSON schema for input expenses.
#[derive(serde::Deserialize)]
struct ExpenseInput {
    payer: String,
    amount: String,
    participants: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(serde::Deserialize)]
struct ExpensesFile {
    expenses: Vec<ExpenseInput>,
}

/// JSON output schema for the simplify command.
#[derive(serde::Serialize)]
struct SimplifyOutput {
    transfers: TransferReport,
    sweeps: usize,
    collapses: usize,
    edges_before: usize,
    edges_after: usize,
    compression_percent: f64,
    valid: bool,
}

#[derive(serde::Serialize)]
struct PositionOutput {
    participant: String,
    net_position: String,
    status: String,
}

fn load_expenses(path: &str) -> ExpenseSet {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: ExpensesFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "expenses": [
    {{ "payer": "Fred", "amount": "40", "participants": ["Scooby", "Shaggy"], "description": "fuel" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut set = ExpenseSet::new();
    for (index, input) in file.expenses.into_iter().enumerate() {
        let amount: Decimal = input.amount.parse().unwrap_or_else(|e| {
            eprintln!("Expense {}: invalid amount '{}': {}", index, input.amount, e);
            process::exit(1);
        });
        let participants = input
            .participants
            .iter()
            .map(ParticipantId::new)
            .collect();
        let mut expense =
            ExpenseRecord::new(ParticipantId::new(&input.payer), amount, participants)
                .unwrap_or_else(|e| {
                    eprintln!("Expense {}: {}", index, e);
                    process::exit(1);
                });
        if let Some(description) = input.description {
            expense = expense.with_description(description);
        }
        set.add(expense);
    }
    set
}

/// Parse the shared --input / --format options.
fn parse_io_options(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, format)
}

fn cmd_simplify(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let set = load_expenses(&path);

    let mut graph = DebtGraph::from_expenses(&set);
    let summary = reduce(&mut graph);
    let report = TransferReport::new(&graph);
    let valid = graph_matches_expenses(&graph, &set);

    if format == "json" {
        let output = SimplifyOutput {
            transfers: report,
            sweeps: summary.sweeps,
            collapses: summary.collapses,
            edges_before: summary.edges_before,
            edges_after: summary.edges_after,
            compression_percent: summary.compression_ratio() * 100.0,
            valid,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("{}", report);
        println!("{}", summary);
        println!("Valid:        {}", valid);
    }

    if !valid {
        eprintln!("Error: reduced graph does not preserve net balances");
        process::exit(1);
    }
}

fn cmd_balances(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let set = load_expenses(&path);
    let sheet = BalanceSheet::from_expenses(&set);

    let mut positions: Vec<PositionOutput> = sheet
        .all_positions()
        .iter()
        .filter(|(_, amount)| **amount != Decimal::ZERO)
        .map(|(participant, amount)| PositionOutput {
            participant: participant.to_string(),
            net_position: amount.to_string(),
            status: if *amount > Decimal::ZERO {
                "CREDITOR".to_string()
            } else {
                "DEBTOR".to_string()
            },
        })
        .collect();
    positions.sort_by(|a, b| a.participant.cmp(&b.participant));

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&positions).unwrap());
    } else {
        println!("=== Net Balances ===");
        for position in &positions {
            println!(
                "  {:<12} {:>12}  {}",
                position.participant, position.net_position, position.status
            );
        }
        println!("\nGross total:  {}", set.gross_total());
        println!("Outstanding:  {}", sheet.total_outstanding());
    }
}

fn cmd_generate(args: &[String]) {
    let mut participants = 10usize;
    let mut expenses = 30usize;
    let mut max_group = 5usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                participants = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--participants requires a number");
                    process::exit(1);
                });
            }
            "--expenses" => {
                i += 1;
                expenses = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--expenses requires a number");
                    process::exit(1);
                });
            }
            "--max-group" => {
                i += 1;
                max_group = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--max-group requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = ExpenseNetworkConfig {
        participant_count: participants,
        expense_count: expenses,
        max_group_size: max_group,
        ..Default::default()
    };
    let set = generate_random_expenses(&config);

    #[derive(serde::Serialize)]
    struct OutputExpense {
        payer: String,
        amount: String,
        participants: Vec<String>,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        expenses: Vec<OutputExpense>,
    }

    let output = OutputFile {
        expenses: set
            .expenses()
            .iter()
            .map(|e| OutputExpense {
                payer: e.payer().to_string(),
                amount: e.amount().to_string(),
                participants: e.participants().iter().map(|p| p.to_string()).collect(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} expenses across {} participants → {}",
            set.len(),
            participants,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "simplify" => cmd_simplify(rest),
        "balances" => cmd_balances(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
