//! The debt graph and depth-first path enumeration.

pub mod debt_graph;
pub mod paths;
