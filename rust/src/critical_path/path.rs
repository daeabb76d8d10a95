//! Extraction of a representative critical chain.

use crate::graph::TaskGraph;
use crate::interner::TaskIdx;

use super::types::TaskTiming;

/// Walk one chain of critical tasks from project start to project finish.
///
/// The walk starts at the first-declared critical task with no critical
/// predecessor and repeatedly steps to the first-declared critical successor
/// whose early start meets the current task's early finish (within
/// `epsilon`). The tightness check keeps the walk on an actual zero-float
/// chain when a critical task also feeds a critical task on another branch.
///
/// Only ONE chain is returned. When several parallel critical chains of equal
/// length exist, the others are not reported; callers that need them must
/// inspect `TaskTiming::is_critical` directly.
pub fn build_critical_path(graph: &TaskGraph, timings: &[TaskTiming], epsilon: f64) -> Vec<TaskIdx> {
    let is_critical = |idx: TaskIdx| timings[idx as usize].is_critical;

    let start = graph.indices().find(|&idx| {
        is_critical(idx) && !graph.predecessors(idx).iter().any(|&p| is_critical(p))
    });

    let Some(mut current) = start else {
        return Vec::new();
    };

    let mut path = vec![current];
    loop {
        let finish = timings[current as usize].early_finish;
        let next = graph
            .successors(current)
            .iter()
            .copied()
            .filter(|&s| is_critical(s) && (timings[s as usize].early_start - finish).abs() < epsilon)
            .min();

        match next {
            Some(succ) => {
                path.push(succ);
                current = succ;
            }
            None => break,
        }
    }

    path
}
