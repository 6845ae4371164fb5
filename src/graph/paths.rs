use crate::core::participant::ParticipantId;
use crate::graph::debt_graph::DebtGraph;
use std::collections::HashSet;

/// One traversal step along a debt path: `from` owes `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub from: ParticipantId,
    pub to: ParticipantId,
}

/// A fully materialized walk through the debt graph.
///
/// Paths end either at a sink (a participant who owes nothing to
/// anyone else) or at the point where the walk revisits a participant
/// already on it. The path carries no weights: the reducer looks
/// weights up on the live graph at collapse time, so a path is always
/// interpreted against the graph's current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtPath {
    steps: Vec<PathStep>,
}

impl DebtPath {
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Number of edges traversed.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Paths of one edge or fewer cannot be shortened.
    pub fn is_trivial(&self) -> bool {
        self.steps.len() <= 1
    }

    /// First participant on the path.
    pub fn start(&self) -> Option<&ParticipantId> {
        self.steps.first().map(|step| &step.from)
    }

    /// Last participant on the path.
    pub fn end(&self) -> Option<&ParticipantId> {
        self.steps.last().map(|step| &step.to)
    }

    /// True iff the walk returned to its starting participant.
    pub fn is_closed(&self) -> bool {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => start == end,
            _ => false,
        }
    }
}

/// Enumerate every distinct walk from `start` to a sink or back into
/// the walk itself.
///
/// Cycle handling is exact: each walk tracks the set of participants
/// currently on it, and a step onto one of them ends the walk there,
/// emitting it at its current length. Self-edges are never traversed;
/// they carry no real debt. Neighbors are visited in sorted order, so
/// enumeration is deterministic.
///
/// Starting at a sink yields a single empty path, which callers treat
/// as trivial.
pub fn paths_from(graph: &DebtGraph, start: &ParticipantId) -> Vec<DebtPath> {
    let mut paths = Vec::new();
    let mut steps: Vec<PathStep> = Vec::new();
    let mut on_walk: HashSet<ParticipantId> = HashSet::new();
    on_walk.insert(start.clone());
    walk(graph, start, &mut steps, &mut on_walk, &mut paths);
    paths
}

/// The first non-trivial path from `start` in depth-first order, or
/// `None` once no walk of more than one edge exists.
///
/// Equivalent to scanning [`paths_from`] for the first path longer
/// than one edge, but returns as soon as one is found instead of
/// materializing the whole enumeration. The reducer calls this after
/// every collapse, so the early return matters on dense graphs.
pub fn first_non_trivial_path(graph: &DebtGraph, start: &ParticipantId) -> Option<DebtPath> {
    let mut steps: Vec<PathStep> = Vec::new();
    let mut on_walk: HashSet<ParticipantId> = HashSet::new();
    on_walk.insert(start.clone());
    seek(graph, start, &mut steps, &mut on_walk)
}

fn seek(
    graph: &DebtGraph,
    current: &ParticipantId,
    steps: &mut Vec<PathStep>,
    on_walk: &mut HashSet<ParticipantId>,
) -> Option<DebtPath> {
    if graph.is_sink(current) {
        if steps.len() > 1 {
            return Some(DebtPath {
                steps: steps.clone(),
            });
        }
        return None;
    }

    for (next, _weight) in graph.outgoing(current) {
        if next == *current {
            continue;
        }
        steps.push(PathStep {
            from: current.clone(),
            to: next.clone(),
        });
        let found = if on_walk.contains(&next) {
            if steps.len() > 1 {
                Some(DebtPath {
                    steps: steps.clone(),
                })
            } else {
                None
            }
        } else {
            on_walk.insert(next.clone());
            let found = seek(graph, &next, steps, on_walk);
            on_walk.remove(&next);
            found
        };
        steps.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}

fn walk(
    graph: &DebtGraph,
    current: &ParticipantId,
    steps: &mut Vec<PathStep>,
    on_walk: &mut HashSet<ParticipantId>,
    paths: &mut Vec<DebtPath>,
) {
    if graph.is_sink(current) {
        paths.push(DebtPath {
            steps: steps.clone(),
        });
        return;
    }

    for (next, _weight) in graph.outgoing(current) {
        if next == *current {
            continue;
        }
        steps.push(PathStep {
            from: current.clone(),
            to: next.clone(),
        });
        if on_walk.contains(&next) {
            // The walk has looped back into itself; emit it as-is.
            paths.push(DebtPath {
                steps: steps.clone(),
            });
        } else {
            on_walk.insert(next.clone());
            walk(graph, &next, steps, on_walk, paths);
            on_walk.remove(&next);
        }
        steps.pop();
    }
}
