//! # tally-engine
//!
//! Shared-expense debt simplification engine.
//!
//! Given a batch of expense records — each naming a payer, an amount,
//! and the group that splits the cost evenly — this engine builds a
//! weighted directed debt graph and iteratively collapses chains and
//! cycles of debt into direct transfers, preserving every participant's
//! net balance.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: participants, expense records, balance sheet
//! - **graph** — Debt graph and depth-first path enumeration
//! - **optimization** — The fixed-point debt reducer
//! - **report** — Human-readable transfer rendering
//! - **simulation** — Sample fixtures and random expense generation

pub mod core;
pub mod graph;
pub mod optimization;
pub mod report;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::BalanceSheet;
    pub use crate::core::expense::{ExpenseError, ExpenseRecord, ExpenseSet};
    pub use crate::core::participant::ParticipantId;
    pub use crate::graph::debt_graph::DebtGraph;
    pub use crate::optimization::reducer::{reduce, ReduceSummary};
    pub use crate::report::TransferReport;
}
