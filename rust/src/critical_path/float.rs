//! Total float, free float and criticality.

use crate::backward_pass::BackwardPassResult;
use crate::forward_pass::ForwardPassResult;
use crate::graph::TaskGraph;

use super::types::TaskTiming;

/// Combine both passes into per-task timings, indexed by declaration order.
///
/// `total_float = late_start - early_start`; `free_float` is the gap to the
/// earliest-starting successor, or 0 for a task with no successors. A task is
/// critical when `|total_float| < epsilon`.
pub fn compute_floats(
    graph: &TaskGraph,
    forward: &ForwardPassResult,
    backward: &BackwardPassResult,
    epsilon: f64,
) -> Vec<TaskTiming> {
    graph
        .indices()
        .map(|idx| {
            let i = idx as usize;
            let early_start = forward.early_start[i];
            let early_finish = forward.early_finish[i];
            let late_start = backward.late_start[i];
            let late_finish = backward.late_finish[i];
            let total_float = late_start - early_start;

            let free_float = graph
                .successors(idx)
                .iter()
                .map(|&s| forward.early_start[s as usize])
                .reduce(f64::min)
                .map_or(0.0, |min_start| min_start - early_finish);

            TaskTiming {
                early_start,
                early_finish,
                late_start,
                late_finish,
                total_float,
                free_float,
                is_critical: total_float.abs() < epsilon,
            }
        })
        .collect()
}
