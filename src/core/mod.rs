//! Foundational types: participants, expense records, and the balance sheet.

pub mod balance;
pub mod expense;
pub mod participant;
