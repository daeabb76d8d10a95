//! Types for critical path results.

use serde::Serialize;
use std::collections::BTreeMap;

/// Per-task timing information from the forward and backward passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub early_start: f64,
    /// Earliest possible finish time (from forward pass).
    pub early_finish: f64,
    /// Latest allowable start time (from backward pass).
    pub late_start: f64,
    /// Latest allowable finish time (from backward pass).
    pub late_finish: f64,
    /// late_start - early_start.
    pub total_float: f64,
    /// Slack before the earliest successor is delayed; 0 for sinks.
    pub free_float: f64,
    /// |total_float| < epsilon.
    pub is_critical: bool,
}

impl TaskTiming {
    /// Whether this task has no float at the given tolerance.
    pub fn has_zero_float(&self, epsilon: f64) -> bool {
        self.total_float.abs() < epsilon
    }
}

/// Timing plus task identity, as reported to callers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskDetail {
    pub name: String,
    pub duration: f64,
    #[serde(flatten)]
    pub timing: TaskTiming,
}

/// Serializable schedule summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScheduleResult {
    /// One representative critical chain, start to finish.
    pub critical_path: Vec<String>,
    pub project_duration: f64,
    pub task_details: BTreeMap<String, TaskDetail>,
    /// Count of all tasks with zero float, on the path or not.
    pub num_critical_tasks: usize,
    pub num_total_tasks: usize,
    /// num_critical_tasks / num_total_tasks * 100 (0 when there are no tasks).
    pub critical_path_percentage: f64,
    /// Sum of all task durations.
    pub total_work: f64,
    pub topological_order: Vec<String>,
}
