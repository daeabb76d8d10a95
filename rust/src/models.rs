//! Core input data types for a scheduling request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Three-point (PERT) duration estimate. Carried through for reporting;
/// the CPM passes only ever read `Task::duration`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreePointEstimate {
    pub optimistic: f64,
    pub most_likely: f64,
    pub pessimistic: f64,
}

/// A task to be scheduled. Durations are in (possibly fractional) days.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<ThreePointEstimate>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            estimate: None,
        }
    }

    pub fn with_estimate(mut self, optimistic: f64, most_likely: f64, pessimistic: f64) -> Self {
        self.estimate = Some(ThreePointEstimate {
            optimistic,
            most_likely,
            pessimistic,
        });
        self
    }
}

/// `predecessor` must finish before `successor` can start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub predecessor: String,
    pub successor: String,
}

impl Dependency {
    pub fn new(predecessor: impl Into<String>, successor: impl Into<String>) -> Self {
        Self {
            predecessor: predecessor.into(),
            successor: successor.into(),
        }
    }
}

/// Absolute deadline for a task, either as days from project start or as a
/// calendar date (converted using `CpmConfig::start_date`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deadline {
    Days(f64),
    Date(NaiveDate),
}

impl From<f64> for Deadline {
    fn from(days: f64) -> Self {
        Deadline::Days(days)
    }
}

impl From<NaiveDate> for Deadline {
    fn from(date: NaiveDate) -> Self {
        Deadline::Date(date)
    }
}

/// Staffing and budget a task needs while it runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequirement {
    #[serde(default)]
    pub staff: u32,
    #[serde(default)]
    pub consultants: BTreeMap<String, u32>,
    #[serde(default)]
    pub budget: f64,
}

/// Everything a caller supplies for one scheduling request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub deadlines: BTreeMap<String, Deadline>,
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceRequirement>,
}

impl ProjectInput {
    pub fn new(tasks: Vec<Task>, dependencies: Vec<Dependency>) -> Self {
        Self {
            tasks,
            dependencies,
            ..Default::default()
        }
    }

    pub fn with_deadline(mut self, task_id: impl Into<String>, deadline: impl Into<Deadline>) -> Self {
        self.deadlines.insert(task_id.into(), deadline.into());
        self
    }

    pub fn with_resources(mut self, task_id: impl Into<String>, req: ResourceRequirement) -> Self {
        self.resources.insert(task_id.into(), req);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_deserializes_days_or_date() {
        let days: Deadline = serde_json::from_str("90").unwrap();
        assert_eq!(days, Deadline::Days(90.0));

        let date: Deadline = serde_json::from_str("\"2025-03-01\"").unwrap();
        assert_eq!(
            date,
            Deadline::Date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_project_input_optional_maps_default() {
        let input: ProjectInput =
            serde_json::from_str(r#"{"tasks":[{"id":"a","name":"A","duration":5}]}"#).unwrap();
        assert_eq!(input.tasks.len(), 1);
        assert!(input.dependencies.is_empty());
        assert!(input.deadlines.is_empty());
        assert!(input.resources.is_empty());
        assert!(input.tasks[0].estimate.is_none());
    }
}
