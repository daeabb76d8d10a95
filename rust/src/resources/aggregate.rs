//! Resource totals, peaks and timeline over a computed schedule.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::calendar::offset_to_date;
use crate::config::CpmConfig;
use crate::critical_path::CpmSchedule;
use crate::error::{InputWarning, Outcome};
use crate::{log_changes, log_debug};
use crate::models::ResourceRequirement;

use super::peak::{PeakUsage, UsageInterval};

/// Resource-days and budget summed over all tasks.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ResourceTotals {
    /// Σ staff × duration.
    pub staff_days: f64,
    /// Σ budget.
    pub budget: f64,
    /// consultant type -> Σ count × duration.
    pub consultant_days: BTreeMap<String, f64>,
}

/// Maximum concurrent usage when every task runs at its early dates.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PeakResources {
    pub staff: u64,
    pub consultants: BTreeMap<String, u64>,
}

/// One timeline row per task, ordered by early start.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub task_id: String,
    pub task_name: String,
    pub early_start: f64,
    pub early_finish: f64,
    pub duration: f64,
    pub is_critical: bool,
    pub staff: u32,
    pub consultants: BTreeMap<String, u32>,
    pub budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceResult {
    pub total_resources: ResourceTotals,
    pub peak_resources: PeakResources,
    pub resource_timeline: Vec<TimelineEntry>,
    pub project_duration: f64,
}

/// Aggregate resources using the peak strategy named in `config`.
pub fn aggregate_resources(
    schedule: &CpmSchedule,
    requirements: &BTreeMap<String, ResourceRequirement>,
    config: &CpmConfig,
) -> Outcome<ResourceResult> {
    aggregate_resources_with(schedule, requirements, config, &config.peak_strategy)
}

/// Aggregate resources with an explicit peak-usage implementation.
///
/// Tasks without an entry in `requirements` use nothing. Entries naming
/// unknown tasks are skipped with a warning.
pub fn aggregate_resources_with(
    schedule: &CpmSchedule,
    requirements: &BTreeMap<String, ResourceRequirement>,
    config: &CpmConfig,
    peak_usage: &dyn PeakUsage,
) -> Outcome<ResourceResult> {
    let graph = schedule.graph();
    let none = ResourceRequirement::default();

    let warnings: Vec<InputWarning> = requirements
        .keys()
        .filter(|id| !graph.contains(id))
        .map(|id| {
            InputWarning::UnknownResourceTask {
                task_id: id.clone(),
            }
            .emit()
        })
        .collect();

    let mut totals = ResourceTotals::default();
    let mut staff_intervals = Vec::with_capacity(graph.len());
    let mut consultant_intervals: BTreeMap<&str, Vec<UsageInterval>> = BTreeMap::new();
    let mut timeline = Vec::with_capacity(graph.len());

    for idx in graph.indices() {
        let task = graph.task(idx);
        let timing = schedule.timing(idx);
        let req = requirements.get(&task.id).unwrap_or(&none);

        totals.staff_days += req.staff as f64 * task.duration;
        totals.budget += req.budget;
        staff_intervals.push(UsageInterval::new(
            timing.early_start,
            timing.early_finish,
            req.staff as u64,
        ));

        for (kind, &count) in &req.consultants {
            *totals.consultant_days.entry(kind.clone()).or_default() +=
                count as f64 * task.duration;
            consultant_intervals
                .entry(kind.as_str())
                .or_default()
                .push(UsageInterval::new(
                    timing.early_start,
                    timing.early_finish,
                    count as u64,
                ));
        }

        timeline.push(TimelineEntry {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            early_start: timing.early_start,
            early_finish: timing.early_finish,
            duration: task.duration,
            is_critical: timing.is_critical,
            staff: req.staff,
            consultants: req.consultants.clone(),
            budget: req.budget,
            start_date: config.start_date.and_then(|s| offset_to_date(s, timing.early_start)),
            end_date: config.start_date.and_then(|s| offset_to_date(s, timing.early_finish)),
        });
    }

    // Stable sort keeps declaration order among tasks starting together
    timeline.sort_by(|a, b| a.early_start.total_cmp(&b.early_start));

    let peak_resources = PeakResources {
        staff: peak_usage.peak(&staff_intervals),
        consultants: consultant_intervals
            .iter()
            .map(|(kind, intervals)| (kind.to_string(), peak_usage.peak(intervals)))
            .collect(),
    };

    for (kind, peak) in &peak_resources.consultants {
        log_debug!(config.verbosity, kind = %kind, peak, "consultant peak");
    }

    log_changes!(
        config.verbosity,
        staff_days = totals.staff_days,
        peak_staff = peak_resources.staff,
        "resources aggregated"
    );

    Outcome::new(
        ResourceResult {
            total_resources: totals,
            peak_resources,
            resource_timeline: timeline,
            project_duration: schedule.project_duration(),
        },
        warnings,
    )
}
