//! Error taxonomy and non-fatal input warnings.
//!
//! Fatal errors are detected while validating input and building the task
//! graph. Once topological sorting succeeds, every later stage is plain
//! arithmetic and cannot fail.

use serde::Serialize;
use thiserror::Error;

/// The dependency graph contains at least one cycle.
///
/// `involved_tasks` lists every task Kahn's algorithm could not release,
/// in declaration order. This is a superset of the cycle itself: tasks
/// downstream of a cycle are never released either.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Circular dependency detected among tasks: {}", .involved_tasks.join(", "))]
pub struct CycleError {
    pub involved_tasks: Vec<String>,
}

/// Fatal errors for a scheduling request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error("{context} references unknown task: {task_id}")]
    UnknownTaskReference { task_id: String, context: String },

    #[error("Duplicate task id: {task_id}")]
    DuplicateTaskId { task_id: String },

    #[error("Task {task_id} has invalid duration {duration} (must be finite and non-negative)")]
    InvalidDuration { task_id: String, duration: f64 },

    #[error("Task at position {position} has an empty id")]
    EmptyTaskId { position: usize },

    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl ScheduleError {
    /// Task ids named by this error, for callers that report them separately.
    pub fn task_ids(&self) -> Vec<&str> {
        match self {
            Self::Cycle(e) => e.involved_tasks.iter().map(String::as_str).collect(),
            Self::UnknownTaskReference { task_id, .. }
            | Self::DuplicateTaskId { task_id }
            | Self::InvalidDuration { task_id, .. } => vec![task_id.as_str()],
            Self::EmptyTaskId { .. } | Self::InvalidConfig { .. } => Vec::new(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Problems in optional decoration inputs. These are logged and skipped;
/// the schedule is still computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputWarning {
    UnknownDeadlineTask { task_id: String },
    UnknownResourceTask { task_id: String },
    InvalidDeadline { task_id: String, deadline: f64 },
    DateDeadlineWithoutStartDate { task_id: String },
    InvalidEstimate { task_id: String },
    InvalidScenarioMultiplier { name: String, multiplier: f64 },
    EmptyScenarioSet,
}

impl std::fmt::Display for InputWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDeadlineTask { task_id } => {
                write!(f, "Deadline given for unknown task {}; ignored", task_id)
            }
            Self::UnknownResourceTask { task_id } => {
                write!(
                    f,
                    "Resource requirement given for unknown task {}; ignored",
                    task_id
                )
            }
            Self::InvalidDeadline { task_id, deadline } => {
                write!(f, "Deadline {} for task {} is not finite; ignored", deadline, task_id)
            }
            Self::DateDeadlineWithoutStartDate { task_id } => write!(
                f,
                "Deadline for task {} is a date but no project start date is configured; ignored",
                task_id
            ),
            Self::InvalidEstimate { task_id } => write!(
                f,
                "Three-point estimate for task {} is not ordered optimistic <= most likely <= pessimistic; ignored",
                task_id
            ),
            Self::InvalidScenarioMultiplier { name, multiplier } => write!(
                f,
                "Scenario {} has multiplier {} (must be finite and non-negative); ignored",
                name, multiplier
            ),
            Self::EmptyScenarioSet => write!(f, "No scenarios supplied; scenario analysis is empty"),
        }
    }
}

impl InputWarning {
    /// Log this warning through `tracing` and hand it back for collection.
    pub fn emit(self) -> Self {
        tracing::warn!(warning = %self, "ignoring invalid optional input");
        self
    }
}

/// A successful result plus any warnings raised while computing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<InputWarning>,
}

impl<T> Outcome<T> {
    pub fn new(value: T, warnings: Vec<InputWarning>) -> Self {
        Self { value, warnings }
    }
}
