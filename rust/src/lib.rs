//! Critical Path Method scheduling engine.
//!
//! Computes earliest/latest times, float and a representative critical path
//! for a task dependency graph, then derives resource usage, deadline risk
//! and duration scenarios from that schedule.
//!
//! Everything is a synchronous, pure in-memory computation. A schedule is
//! rebuilt from scratch on every call and owned by that call, so independent
//! projects can be scheduled on separate threads without locking.

pub mod backward_pass;
pub mod calendar;
pub mod config;
pub mod critical_path;
pub mod error;
pub mod forward_pass;
pub mod graph;
pub mod interner;
pub mod logging;
mod models;
pub mod pert;
#[cfg(feature = "python")]
mod python;
pub mod resources;
pub mod risk;
pub mod scenario;
pub mod topo;

#[doc(hidden)]
pub use tracing as __tracing;

use serde::Serialize;

pub use config::{CpmConfig, ScenarioConfig};
pub use critical_path::{compute_schedule, CpmSchedule, ScheduleResult, TaskDetail, TaskTiming};
pub use error::{CycleError, InputWarning, Outcome, ScheduleError};
pub use models::{Deadline, Dependency, ProjectInput, ResourceRequirement, Task, ThreePointEstimate};
pub use pert::{pert_summary, PertEstimate, PertSummary};
pub use resources::{aggregate_resources, PeakStrategy, PeakUsage, ResourceResult};
pub use risk::{flag_risks, Risk, RiskType, Severity};
pub use scenario::{analyze_scenarios, ScenarioOutcome, ScenarioResult};

/// Every stage's output for one scheduling request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectAnalysis {
    pub schedule: ScheduleResult,
    pub resources: ResourceResult,
    pub risks: Vec<Risk>,
    pub scenarios: ScenarioResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pert: Option<PertSummary>,
}

/// Run the full pipeline: sort, forward pass, backward pass, floats and
/// critical path, resources, risks, scenarios.
///
/// # Returns
/// * `Ok(Outcome)` with the analysis and any warnings about ignored
///   deadline, resource or estimate entries
/// * `Err(ScheduleError)` for a cycle, duplicate or unknown ids, invalid
///   durations or invalid configuration
pub fn analyze_project(
    input: &ProjectInput,
    config: &CpmConfig,
    scenario_config: &ScenarioConfig,
) -> error::Result<Outcome<ProjectAnalysis>> {
    let schedule = compute_schedule(&input.tasks, &input.dependencies, config)?;
    let mut warnings = Vec::new();

    let resources = aggregate_resources(&schedule, &input.resources, config);
    warnings.extend(resources.warnings);

    let risks = flag_risks(&schedule, &input.deadlines, config);
    warnings.extend(risks.warnings);

    let scenarios = analyze_scenarios(schedule.project_duration(), scenario_config);
    warnings.extend(scenarios.warnings);

    let pert = pert_summary(&schedule);
    warnings.extend(pert.warnings);

    let analysis = ProjectAnalysis {
        schedule: schedule.to_result(),
        resources: resources.value,
        risks: risks.value,
        scenarios: scenarios.value,
        pert: pert.value,
    };

    Ok(Outcome::new(analysis, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_project_collects_warnings_from_all_stages() {
        let input = ProjectInput::new(vec![Task::new("a", "A", 10.0)], vec![])
            .with_deadline("ghost", 5.0)
            .with_resources("phantom", ResourceRequirement::default());
        let outcome =
            analyze_project(&input, &CpmConfig::default(), &ScenarioConfig::default()).unwrap();

        assert_eq!(
            outcome.warnings,
            vec![
                InputWarning::UnknownResourceTask {
                    task_id: "phantom".into()
                },
                InputWarning::UnknownDeadlineTask {
                    task_id: "ghost".into()
                },
            ]
        );
        assert_eq!(outcome.value.schedule.project_duration, 10.0);
        assert!(outcome.value.pert.is_none());
    }

    #[test]
    fn test_analyze_project_propagates_fatal_errors() {
        let input = ProjectInput::new(
            vec![Task::new("a", "A", 1.0)],
            vec![Dependency::new("a", "missing")],
        );
        let err =
            analyze_project(&input, &CpmConfig::default(), &ScenarioConfig::default()).unwrap_err();
        assert_eq!(err.task_ids(), vec!["missing"]);
    }
}
