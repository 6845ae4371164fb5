use crate::graph::debt_graph::DebtGraph;
use crate::graph::paths::{first_non_trivial_path, DebtPath};
use log::{debug, trace, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statistics from one reduction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReduceSummary {
    /// Full passes over all start nodes.
    pub sweeps: usize,
    /// Non-trivial paths collapsed.
    pub collapses: usize,
    /// Self-edges stripped before sweeping.
    pub self_edges_removed: usize,
    /// Edge count when reduction started.
    pub edges_before: usize,
    /// Edge count at the fixed point.
    pub edges_after: usize,
}

impl ReduceSummary {
    /// Fraction of edges eliminated by reduction, in `[0, 1]`.
    pub fn compression_ratio(&self) -> f64 {
        if self.edges_before == 0 {
            return 0.0;
        }
        1.0 - self.edges_after as f64 / self.edges_before as f64
    }
}

impl std::fmt::Display for ReduceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Reduction Summary ===")?;
        writeln!(f, "Sweeps:       {}", self.sweeps)?;
        writeln!(f, "Collapses:    {}", self.collapses)?;
        writeln!(f, "Edges before: {}", self.edges_before)?;
        writeln!(f, "Edges after:  {}", self.edges_after)?;
        writeln!(f, "Compression:  {:.1}%", self.compression_ratio() * 100.0)?;
        Ok(())
    }
}

/// Reduce the debt graph in place until no chain or cycle of debt
/// longer than one hop remains.
///
/// Self-edges are stripped first; they carry no net meaning. Then a
/// fixed-point loop sweeps every participant as a potential path
/// start. For each start, the first non-trivial path on the current
/// graph is collapsed and the search restarts, so a collapse is always
/// applied to edges that actually exist — the enumerator and the
/// mutation never share stale state. Sweeps repeat until one finds
/// nothing to collapse.
///
/// Every participant's net balance is invariant across the run: a
/// collapse moves the path's bottleneck weight onto the direct
/// start-to-end edge (or cancels it outright when the path closed back
/// on its start) and subtracts it everywhere along the way.
///
/// The loop is mathematically guaranteed to terminate on well-formed
/// graphs; a sweep cap proportional to the starting edge count bounds
/// it anyway, with a warning if it is ever hit.
pub fn reduce(graph: &mut DebtGraph) -> ReduceSummary {
    let sweep_cap = 2 * graph.edge_count() + graph.node_count() + 1;
    reduce_with_cap(graph, sweep_cap)
}

fn reduce_with_cap(graph: &mut DebtGraph, sweep_cap: usize) -> ReduceSummary {
    let edges_before = graph.edge_count();
    let self_edges_removed = graph.strip_self_edges();

    let mut sweeps = 0;
    let mut collapses = 0;

    loop {
        if sweeps >= sweep_cap {
            warn!(
                "reduction stopped at sweep cap {} with {} collapses; graph may not be minimal",
                sweep_cap, collapses
            );
            break;
        }
        sweeps += 1;

        let mut progress = false;
        for start in graph.participants() {
            while let Some(path) = first_non_trivial_path(graph, &start) {
                trace!(
                    "collapsing {}-step path from {} to {}",
                    path.len(),
                    start,
                    path.end().map(|p| p.as_str()).unwrap_or("?"),
                );
                collapse(graph, &path);
                collapses += 1;
                progress = true;
            }
        }

        debug!(
            "sweep {} done: {} collapses so far, {} edges remain",
            sweeps,
            collapses,
            graph.edge_count()
        );
        if !progress {
            break;
        }
    }

    ReduceSummary {
        sweeps,
        collapses,
        self_edges_removed,
        edges_before,
        edges_after: graph.edge_count(),
    }
}

/// Collapse one non-trivial path: subtract the bottleneck weight from
/// every edge along it (edges drained to zero disappear) and move that
/// weight onto the direct start-to-end edge. A closed path needs no
/// shortcut; the circular debt simply cancels.
fn collapse(graph: &mut DebtGraph, path: &DebtPath) {
    let min_weight = path
        .steps()
        .iter()
        .map(|step| graph.edge_weight(&step.from, &step.to))
        .filter(|weight| *weight > Decimal::ZERO)
        .min();
    // Paths are discovered on the live graph, so every edge is present
    // and positive; a missing bottleneck means there is nothing to do.
    let Some(min_weight) = min_weight else {
        return;
    };

    for step in path.steps() {
        graph.settle_debt(&step.from, &step.to, min_weight);
    }

    if !path.is_closed() {
        if let (Some(start), Some(end)) = (path.start(), path.end()) {
            let (start, end) = (start.clone(), end.clone());
            graph.add_debt(&start, &end, min_weight);
        }
    }
}
