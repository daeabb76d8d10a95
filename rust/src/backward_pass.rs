//! Backward pass: latest start and finish times.

use crate::graph::TaskGraph;
use crate::interner::TaskIdx;

/// Latest times per task, indexed by declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackwardPassResult {
    pub late_start: Vec<f64>,
    pub late_finish: Vec<f64>,
}

/// Compute latest start/finish in reverse topological order.
///
/// A task with no successors must finish by `project_duration`; otherwise it
/// must finish before its earliest-starting successor's latest start.
///
/// # Arguments
/// * `graph` - The validated task graph
/// * `topo_order` - Topological order from [`crate::topo::topological_sort`]
/// * `project_duration` - Project duration from the forward pass
pub fn backward_pass(
    graph: &TaskGraph,
    topo_order: &[TaskIdx],
    project_duration: f64,
) -> BackwardPassResult {
    let n = graph.len();
    let mut late_start = vec![0.0; n];
    let mut late_finish = vec![0.0; n];

    for &idx in topo_order.iter().rev() {
        let i = idx as usize;
        let successors = graph.successors(idx);

        let finish = if successors.is_empty() {
            project_duration
        } else {
            successors
                .iter()
                .map(|&s| late_start[s as usize])
                .fold(f64::INFINITY, f64::min)
        };

        late_finish[i] = finish;
        late_start[i] = finish - graph.duration(idx);
    }

    BackwardPassResult {
        late_start,
        late_finish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward_pass::forward_pass;
    use crate::models::{Dependency, Task};
    use crate::topo::topological_sort;

    fn run(tasks: &[(&str, f64)], edges: &[(&str, &str)]) -> (TaskGraph, BackwardPassResult) {
        let tasks: Vec<Task> = tasks.iter().map(|(id, d)| Task::new(*id, *id, *d)).collect();
        let deps: Vec<Dependency> = edges.iter().map(|(p, s)| Dependency::new(*p, *s)).collect();
        let graph = TaskGraph::new(&tasks, &deps).unwrap();
        let order = topological_sort(&graph).unwrap();
        let forward = forward_pass(&graph, &order);
        let result = backward_pass(&graph, &order, forward.project_duration);
        (graph, result)
    }

    #[test]
    fn test_single_task() {
        let (_, result) = run(&[("a", 5.0)], &[]);
        assert_eq!(result.late_start, vec![0.0]);
        assert_eq!(result.late_finish, vec![5.0]);
    }

    #[test]
    fn test_diamond_dependency() {
        // A(1) -> B(5) -> D(1), A -> C(2) -> D
        let (_, result) = run(
            &[("A", 1.0), ("B", 5.0), ("C", 2.0), ("D", 1.0)],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        assert_eq!(result.late_finish, vec![1.0, 6.0, 6.0, 7.0]);
        assert_eq!(result.late_start, vec![0.0, 1.0, 4.0, 6.0]);
    }

    #[test]
    fn test_short_sink_finishes_at_project_end() {
        // b is a short dangling branch; it may finish as late as the project end
        let (graph, result) = run(
            &[("a", 2.0), ("b", 1.0), ("c", 10.0)],
            &[("a", "b"), ("a", "c")],
        );
        let b = graph.index_of("b").unwrap() as usize;
        assert_eq!(result.late_finish[b], 12.0);
        assert_eq!(result.late_start[b], 11.0);
    }

    #[test]
    fn test_tightest_successor_wins() {
        // a feeds both b (long) and c (short); a's latest finish is set by b
        let (graph, result) = run(
            &[("a", 1.0), ("b", 8.0), ("c", 2.0), ("end", 1.0)],
            &[("a", "b"), ("a", "c"), ("b", "end"), ("c", "end")],
        );
        let a = graph.index_of("a").unwrap() as usize;
        assert_eq!(result.late_finish[a], 1.0);
        assert_eq!(result.late_start[a], 0.0);
    }
}
