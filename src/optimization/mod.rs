//! Debt reduction: the fixed-point collapse of chains and cycles.

pub mod reducer;
