use crate::core::participant::ParticipantId;
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One remaining transfer: `debtor` pays `creditor` `amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub creditor: ParticipantId,
    pub amount: Decimal,
}

/// All transfers owed by a single debtor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtorEntry {
    pub debtor: ParticipantId,
    pub transfers: Vec<Transfer>,
}

/// A human-readable summary of who pays whom.
///
/// Collects, for each non-sink participant in sorted order, every
/// outgoing edge of the graph. Sinks owe nothing and produce no entry.
/// The `Display` format is one header line per debtor followed by one
/// indented line per transfer:
///
/// ```text
/// Scooby =>
///     Fred 60
///     Thelma 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReport {
    entries: Vec<DebtorEntry>,
}

impl TransferReport {
    /// Snapshot the graph's remaining debts. Usually called after
    /// reduction, but works on any graph.
    pub fn new(graph: &DebtGraph) -> Self {
        let mut entries = Vec::new();
        for debtor in graph.participants() {
            if graph.is_sink(&debtor) {
                continue;
            }
            let transfers = graph
                .outgoing(&debtor)
                .into_iter()
                .filter(|(creditor, _)| *creditor != debtor)
                .map(|(creditor, amount)| Transfer { creditor, amount })
                .collect();
            entries.push(DebtorEntry { debtor, transfers });
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[DebtorEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The rendered report as individual lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            lines.push(format!("{} =>", entry.debtor));
            for transfer in &entry.transfers {
                lines.push(format!("    {} {}", transfer.creditor, transfer.amount));
            }
        }
        lines
    }
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "Everyone is settled up.");
        }
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
