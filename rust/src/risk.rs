//! Deadline, zero-float and long-duration risk flags.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::calendar::{offset_to_date, resolve_deadline};
use crate::config::CpmConfig;
use crate::critical_path::CpmSchedule;
use crate::error::{InputWarning, Outcome};
use crate::models::Deadline;
use crate::{log_changes, log_checks};

/// Risk severity. Ordered so that `Low < Medium < High < Critical`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskType {
    /// Latest finish leaves too little buffer before an external deadline.
    DeadlineBuffer,
    /// Task on the critical path with no float at all.
    CriticalPathNoFloat,
    /// Task duration exceeds the long-duration threshold.
    LongDuration,
}

/// A single flagged risk. Optional fields are filled where they apply to
/// the risk type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Risk {
    pub task_id: String,
    pub task_name: String,
    pub risk_type: RiskType,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_finish: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_float: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl Risk {
    fn new(
        task_id: &str,
        task_name: &str,
        risk_type: RiskType,
        severity: Severity,
        message: String,
    ) -> Self {
        Self {
            task_id: task_id.to_string(),
            task_name: task_name.to_string(),
            risk_type,
            severity,
            message,
            deadline: None,
            deadline_date: None,
            late_finish: None,
            buffer: None,
            total_float: None,
            duration: None,
        }
    }
}

/// Severity for a deadline buffer, or `None` if the buffer is comfortable.
pub fn deadline_severity(buffer: f64, config: &CpmConfig) -> Option<Severity> {
    if buffer < 0.0 {
        Some(Severity::Critical)
    } else if buffer < config.high_risk_buffer_days {
        Some(Severity::High)
    } else if buffer < config.buffer_days {
        Some(Severity::Medium)
    } else {
        None
    }
}

/// Flag schedule risks, most severe first.
///
/// Within a severity, deadline risks come first (in task declaration order),
/// then zero-float critical path tasks (in path order), then long-duration
/// tasks (in declaration order).
pub fn flag_risks(
    schedule: &CpmSchedule,
    deadlines: &BTreeMap<String, Deadline>,
    config: &CpmConfig,
) -> Outcome<Vec<Risk>> {
    let graph = schedule.graph();
    let epsilon = schedule.epsilon();
    let mut warnings: Vec<InputWarning> = deadlines
        .keys()
        .filter(|id| !graph.contains(id))
        .map(|id| {
            InputWarning::UnknownDeadlineTask {
                task_id: id.clone(),
            }
            .emit()
        })
        .collect();

    let mut risks = Vec::new();

    for idx in graph.indices() {
        let task = graph.task(idx);
        let Some(raw) = deadlines.get(&task.id) else {
            continue;
        };
        let Some(deadline) = resolve_deadline(raw, config.start_date) else {
            let warning = match *raw {
                Deadline::Days(days) => InputWarning::InvalidDeadline {
                    task_id: task.id.clone(),
                    deadline: days,
                },
                Deadline::Date(_) => InputWarning::DateDeadlineWithoutStartDate {
                    task_id: task.id.clone(),
                },
            };
            warnings.push(warning.emit());
            continue;
        };

        let late_finish = schedule.timing(idx).late_finish;
        let buffer = deadline - late_finish;
        log_checks!(config.verbosity, task = %task.id, deadline, late_finish, buffer, "deadline check");

        let Some(severity) = deadline_severity(buffer, config) else {
            continue;
        };
        let message = if buffer < 0.0 {
            format!(
                "Latest finish (day {:.1}) is {:.1} days past the deadline (day {:.1})",
                late_finish, -buffer, deadline
            )
        } else {
            format!(
                "Only {:.1} days of buffer between latest finish (day {:.1}) and deadline (day {:.1})",
                buffer, late_finish, deadline
            )
        };

        let mut risk = Risk::new(&task.id, &task.name, RiskType::DeadlineBuffer, severity, message);
        risk.deadline = Some(deadline);
        risk.deadline_date = config.start_date.and_then(|s| offset_to_date(s, deadline));
        risk.late_finish = Some(late_finish);
        risk.buffer = Some(buffer);
        risks.push(risk);
    }

    for &idx in schedule.critical_path() {
        let timing = schedule.timing(idx);
        if !timing.has_zero_float(epsilon) {
            continue;
        }
        let task = graph.task(idx);
        let mut risk = Risk::new(
            &task.id,
            &task.name,
            RiskType::CriticalPathNoFloat,
            Severity::Medium,
            "On the critical path with no float; any delay extends the project".to_string(),
        );
        risk.total_float = Some(timing.total_float);
        risks.push(risk);
    }

    for task in graph.tasks() {
        if task.duration <= config.long_duration_days {
            continue;
        }
        let mut risk = Risk::new(
            &task.id,
            &task.name,
            RiskType::LongDuration,
            Severity::Low,
            format!(
                "Duration of {:.1} days exceeds {:.0} days; consider splitting",
                task.duration, config.long_duration_days
            ),
        );
        risk.duration = Some(task.duration);
        risks.push(risk);
    }

    risks.sort_by_key(|r| Reverse(r.severity));

    log_changes!(config.verbosity, count = risks.len(), "risks flagged");

    Outcome::new(risks, warnings)
}
