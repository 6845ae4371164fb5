use crate::core::participant::ParticipantId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors arising from expense record validation.
///
/// Records are validated at construction time, so an invalid record
/// can never reach the graph builder. In particular a record with no
/// participants would otherwise divide by zero when computing shares.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("expense paid by {payer} has no participants to split between")]
    NoParticipants { payer: ParticipantId },
    #[error("expense paid by {payer} has non-positive amount {amount}")]
    InvalidAmount {
        payer: ParticipantId,
        amount: Decimal,
    },
}

/// A single shared expense: one payer fronted `amount`, split evenly
/// among `participants`.
///
/// Each participant owes `amount / participants.len()`, quantized to
/// cents, back to the payer. The payer may appear in the participant
/// list; that share is
/// a self-debt carrying no net meaning and is neutralized during
/// reduction.
///
/// Records are immutable once created and can only be built through
/// [`ExpenseRecord::new`], which rejects empty participant lists and
/// non-positive amounts.
///
/// # Examples
///
/// ```
/// use tally_engine::core::expense::ExpenseRecord;
/// use tally_engine::core::participant::ParticipantId;
/// use rust_decimal_macros::dec;
///
/// let pizza = ExpenseRecord::new(
///     ParticipantId::new("Fred"),
///     dec!(40),
///     vec![ParticipantId::new("Scooby"), ParticipantId::new("Shaggy")],
/// ).unwrap();
///
/// assert_eq!(pizza.share(), dec!(20));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier for this record.
    id: Uuid,
    /// The participant who paid and is owed the split shares.
    payer: ParticipantId,
    /// The total amount fronted. Always positive.
    amount: Decimal,
    /// Everyone sharing the cost. Never empty.
    participants: Vec<ParticipantId>,
    /// When this record was created.
    recorded_at: DateTime<Utc>,
    /// Optional memo ("pizza night", "fuel").
    description: Option<String>,
}

impl ExpenseRecord {
    /// Create a new expense record.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseError::NoParticipants`] if `participants` is
    /// empty, and [`ExpenseError::InvalidAmount`] if `amount` is not
    /// strictly positive.
    pub fn new(
        payer: ParticipantId,
        amount: Decimal,
        participants: Vec<ParticipantId>,
    ) -> Result<Self, ExpenseError> {
        if participants.is_empty() {
            return Err(ExpenseError::NoParticipants { payer });
        }
        if amount <= Decimal::ZERO {
            return Err(ExpenseError::InvalidAmount { payer, amount });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            payer,
            amount,
            participants,
            recorded_at: Utc::now(),
            description: None,
        })
    }

    /// Set a description string.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn payer(&self) -> &ParticipantId {
        &self.payer
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The per-participant share of this expense, quantized to cents
    /// with banker's rounding.
    ///
    /// Quantizing here keeps every downstream sum exact: a raw
    /// division like `4087 / 3` never terminates, and accumulating
    /// full-precision repeating decimals can saturate the 96-bit
    /// mantissa and round differently depending on addition order.
    /// The payer is credited the sum of shares rather than the raw
    /// amount, so any rounding remainder stays with the payer and net
    /// positions still balance to zero.
    ///
    /// The participant list is guaranteed non-empty, so the division
    /// is always defined.
    pub fn share(&self) -> Decimal {
        (self.amount / Decimal::from(self.participants.len() as u64)).round_dp(2)
    }
}

/// An ordered batch of expense records submitted to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseSet {
    expenses: Vec<ExpenseRecord>,
}

impl ExpenseSet {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
        }
    }

    pub fn add(&mut self, expense: ExpenseRecord) {
        self.expenses.push(expense);
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Total gross value of all expenses.
    pub fn gross_total(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// All unique participants referenced in this set, payers included.
    pub fn participants(&self) -> Vec<ParticipantId> {
        let mut participants: Vec<ParticipantId> = self
            .expenses
            .iter()
            .flat_map(|e| {
                std::iter::once(e.payer().clone()).chain(e.participants().iter().cloned())
            })
            .collect();
        participants.sort();
        participants.dedup();
        participants
    }
}

impl FromIterator<ExpenseRecord> for ExpenseSet {
    fn from_iter<T: IntoIterator<Item = ExpenseRecord>>(iter: T) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}
