//! Sample expense sets and random network generation.

pub mod fixtures;
pub mod random;
