//! Immutable task graph built from validated input.

use rustc_hash::FxHashSet;

use crate::error::{Result, ScheduleError};
use crate::interner::{TaskIdInterner, TaskIdx};
use crate::models::{Dependency, Task};

/// Tasks and dependency edges, indexed by declaration order.
///
/// Construction validates ids, durations and edge endpoints; acyclicity is
/// checked later by [`crate::topo::topological_sort`]. Duplicate edges are
/// collapsed so in-degree counts match the distinct predecessor sets.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    index: TaskIdInterner,
    tasks: Vec<Task>,
    predecessors: Vec<Vec<TaskIdx>>,
    successors: Vec<Vec<TaskIdx>>,
}

impl TaskGraph {
    /// Validate and build a graph.
    ///
    /// Fails on empty ids, duplicate ids, negative or non-finite durations,
    /// and edges naming undeclared tasks. All of these are checked before
    /// any sorting happens.
    pub fn new(tasks: &[Task], dependencies: &[Dependency]) -> Result<Self> {
        let mut index = TaskIdInterner::with_capacity(tasks.len());

        for (position, task) in tasks.iter().enumerate() {
            if task.id.is_empty() {
                return Err(ScheduleError::EmptyTaskId { position });
            }
            if index.intern_unique(&task.id).is_none() {
                return Err(ScheduleError::DuplicateTaskId {
                    task_id: task.id.clone(),
                });
            }
            if !task.duration.is_finite() || task.duration < 0.0 {
                return Err(ScheduleError::InvalidDuration {
                    task_id: task.id.clone(),
                    duration: task.duration,
                });
            }
        }

        let n = index.len();
        let mut predecessors: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];
        let mut seen: FxHashSet<(TaskIdx, TaskIdx)> = FxHashSet::default();

        for dep in dependencies {
            let lookup = |id: &str| {
                index
                    .get(id)
                    .ok_or_else(|| ScheduleError::UnknownTaskReference {
                        task_id: id.to_string(),
                        context: format!("Dependency {} -> {}", dep.predecessor, dep.successor),
                    })
            };
            let pred = lookup(&dep.predecessor)?;
            let succ = lookup(&dep.successor)?;

            if seen.insert((pred, succ)) {
                successors[pred as usize].push(succ);
                predecessors[succ as usize].push(pred);
            }
        }

        Ok(Self {
            index,
            tasks: tasks.to_vec(),
            predecessors,
            successors,
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, idx: TaskIdx) -> &Task {
        &self.tasks[idx as usize]
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn duration(&self, idx: TaskIdx) -> f64 {
        self.tasks[idx as usize].duration
    }

    pub fn id(&self, idx: TaskIdx) -> &str {
        &self.tasks[idx as usize].id
    }

    pub fn index_of(&self, id: &str) -> Option<TaskIdx> {
        self.index.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.get(id).is_some()
    }

    /// Predecessors in edge declaration order.
    pub fn predecessors(&self, idx: TaskIdx) -> &[TaskIdx] {
        &self.predecessors[idx as usize]
    }

    /// Successors in edge declaration order.
    pub fn successors(&self, idx: TaskIdx) -> &[TaskIdx] {
        &self.successors[idx as usize]
    }

    /// Task indices in declaration order.
    pub fn indices(&self) -> impl Iterator<Item = TaskIdx> + '_ {
        (0..self.tasks.len()).map(|i| i as TaskIdx)
    }

    /// Tasks with no successors.
    pub fn sinks(&self) -> impl Iterator<Item = TaskIdx> + '_ {
        self.indices().filter(|&i| self.successors(i).is_empty())
    }
}
