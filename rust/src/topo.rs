//! Topological ordering with Kahn's algorithm.

use std::collections::VecDeque;

use crate::error::CycleError;
use crate::graph::TaskGraph;
use crate::interner::TaskIdx;

/// Order tasks so every predecessor precedes its successors.
///
/// The queue is seeded with zero in-degree tasks in declaration order and
/// successors are released in edge order, so the result is deterministic for
/// a given input. If some tasks are never released, the graph has a cycle and
/// the unreleased tasks are reported.
pub fn topological_sort(graph: &TaskGraph) -> Result<Vec<TaskIdx>, CycleError> {
    let mut in_degree: Vec<usize> = graph
        .indices()
        .map(|idx| graph.predecessors(idx).len())
        .collect();

    let mut queue: VecDeque<TaskIdx> = graph
        .indices()
        .filter(|&idx| in_degree[idx as usize] == 0)
        .collect();

    let mut order: Vec<TaskIdx> = Vec::with_capacity(graph.len());

    while let Some(idx) = queue.pop_front() {
        order.push(idx);

        for &succ in graph.successors(idx) {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    if order.len() != graph.len() {
        let involved_tasks = graph
            .indices()
            .filter(|&idx| in_degree[idx as usize] > 0)
            .map(|idx| graph.id(idx).to_string())
            .collect();
        return Err(CycleError { involved_tasks });
    }

    Ok(order)
}
