//! Critical path calculation: sort, forward pass, backward pass, floats and
//! path extraction, run in sequence.

use std::collections::BTreeMap;

use crate::backward_pass::backward_pass;
use crate::config::CpmConfig;
use crate::error::Result;
use crate::forward_pass::forward_pass;
use crate::graph::TaskGraph;
use crate::interner::TaskIdx;
use crate::models::{Dependency, Task};
use crate::topo::topological_sort;
use crate::{log_changes, log_checks, log_debug};

use super::float::compute_floats;
use super::path::build_critical_path;
use super::types::{ScheduleResult, TaskDetail, TaskTiming};

/// A fully computed CPM schedule.
///
/// Owns its graph; later stages (resources, risks, scenarios) read from it.
/// Built fresh for every request and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CpmSchedule {
    graph: TaskGraph,
    topo_order: Vec<TaskIdx>,
    timings: Vec<TaskTiming>,
    project_duration: f64,
    critical_path: Vec<TaskIdx>,
    epsilon: f64,
}

impl CpmSchedule {
    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn project_duration(&self) -> f64 {
        self.project_duration
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Timing for a task index.
    pub fn timing(&self, idx: TaskIdx) -> &TaskTiming {
        &self.timings[idx as usize]
    }

    /// Timing for a task id, if the task exists.
    pub fn timing_for(&self, id: &str) -> Option<&TaskTiming> {
        self.graph.index_of(id).map(|idx| self.timing(idx))
    }

    /// Timings in declaration order.
    pub fn timings(&self) -> &[TaskTiming] {
        &self.timings
    }

    pub fn topological_order(&self) -> &[TaskIdx] {
        &self.topo_order
    }

    pub fn critical_path(&self) -> &[TaskIdx] {
        &self.critical_path
    }

    pub fn critical_path_ids(&self) -> Vec<String> {
        self.critical_path
            .iter()
            .map(|&idx| self.graph.id(idx).to_string())
            .collect()
    }

    pub fn num_critical_tasks(&self) -> usize {
        self.timings.iter().filter(|t| t.is_critical).count()
    }

    /// Build the serializable summary.
    pub fn to_result(&self) -> ScheduleResult {
        let task_details: BTreeMap<String, TaskDetail> = self
            .graph
            .indices()
            .map(|idx| {
                let task = self.graph.task(idx);
                (
                    task.id.clone(),
                    TaskDetail {
                        name: task.name.clone(),
                        duration: task.duration,
                        timing: *self.timing(idx),
                    },
                )
            })
            .collect();

        let num_total_tasks = self.graph.len();
        let num_critical_tasks = self.num_critical_tasks();
        let critical_path_percentage = if num_total_tasks == 0 {
            0.0
        } else {
            num_critical_tasks as f64 / num_total_tasks as f64 * 100.0
        };

        ScheduleResult {
            critical_path: self.critical_path_ids(),
            project_duration: self.project_duration,
            task_details,
            num_critical_tasks,
            num_total_tasks,
            critical_path_percentage,
            total_work: self.graph.tasks().iter().map(|t| t.duration).sum(),
            topological_order: self
                .topo_order
                .iter()
                .map(|&idx| self.graph.id(idx).to_string())
                .collect(),
        }
    }
}

/// Compute the full CPM schedule for a set of tasks and dependencies.
///
/// # Returns
/// * `Ok(CpmSchedule)` with timings, floats and a representative critical path
/// * `Err(ScheduleError)` for invalid configuration, invalid input or a cycle;
///   no partial schedule is produced in that case
pub fn compute_schedule(
    tasks: &[Task],
    dependencies: &[Dependency],
    config: &CpmConfig,
) -> Result<CpmSchedule> {
    config.validate()?;
    let verbosity = config.verbosity;

    let graph = TaskGraph::new(tasks, dependencies)?;
    let topo_order = topological_sort(&graph)?;
    log_debug!(verbosity, order = ?topo_order, "topological order");

    let forward = forward_pass(&graph, &topo_order);
    let backward = backward_pass(&graph, &topo_order, forward.project_duration);
    let timings = compute_floats(&graph, &forward, &backward, config.epsilon);

    for idx in graph.indices() {
        let t = &timings[idx as usize];
        log_checks!(
            verbosity,
            task = graph.id(idx),
            es = t.early_start,
            ef = t.early_finish,
            ls = t.late_start,
            lf = t.late_finish,
            total_float = t.total_float,
            critical = t.is_critical,
            "task timing"
        );
    }

    let critical_path = build_critical_path(&graph, &timings, config.epsilon);

    let schedule = CpmSchedule {
        graph,
        topo_order,
        timings,
        project_duration: forward.project_duration,
        critical_path,
        epsilon: config.epsilon,
    };

    log_changes!(
        verbosity,
        project_duration = schedule.project_duration,
        critical_path = ?schedule.critical_path_ids(),
        "schedule computed"
    );

    Ok(schedule)
}
