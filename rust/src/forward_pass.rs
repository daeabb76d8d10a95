//! Forward pass: earliest start and finish times.

use crate::graph::TaskGraph;
use crate::interner::TaskIdx;

/// Earliest times per task, indexed by declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardPassResult {
    pub early_start: Vec<f64>,
    pub early_finish: Vec<f64>,
    /// Latest early finish over all tasks (0 for an empty graph).
    pub project_duration: f64,
}

/// Compute earliest start/finish in topological order.
///
/// A task with no predecessors starts at 0; otherwise it starts when its last
/// predecessor finishes. `topo_order` must come from
/// [`crate::topo::topological_sort`] on the same graph.
pub fn forward_pass(graph: &TaskGraph, topo_order: &[TaskIdx]) -> ForwardPassResult {
    let n = graph.len();
    let mut early_start = vec![0.0; n];
    let mut early_finish = vec![0.0; n];
    let mut project_duration: f64 = 0.0;

    for &idx in topo_order {
        let i = idx as usize;

        let start = graph
            .predecessors(idx)
            .iter()
            .map(|&p| early_finish[p as usize])
            .fold(0.0, f64::max);

        early_start[i] = start;
        early_finish[i] = start + graph.duration(idx);
        project_duration = project_duration.max(early_finish[i]);
    }

    ForwardPassResult {
        early_start,
        early_finish,
        project_duration,
    }
}
