//! PERT three-point estimates.
//!
//! Estimates ride along on tasks and are summarised here for reporting. The
//! CPM passes never read them.

use serde::Serialize;

use crate::critical_path::CpmSchedule;
use crate::error::{InputWarning, Outcome};
use crate::models::ThreePointEstimate;

const Z_90: f64 = 1.645;

/// Beta-distribution approximation of a three-point estimate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PertEstimate {
    /// (o + 4m + p) / 6
    pub expected: f64,
    /// (p - o) / 6
    pub std_dev: f64,
}

impl PertEstimate {
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }
}

impl ThreePointEstimate {
    /// Finite, non-negative and ordered optimistic <= most likely <= pessimistic.
    pub fn is_valid(&self) -> bool {
        let values = [self.optimistic, self.most_likely, self.pessimistic];
        values.iter().all(|v| v.is_finite() && *v >= 0.0)
            && self.optimistic <= self.most_likely
            && self.most_likely <= self.pessimistic
    }

    pub fn pert(&self) -> PertEstimate {
        PertEstimate {
            expected: (self.optimistic + 4.0 * self.most_likely + self.pessimistic) / 6.0,
            std_dev: (self.pessimistic - self.optimistic) / 6.0,
        }
    }
}

/// PERT roll-up over the representative critical path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PertSummary {
    /// Σ expected durations along the path.
    pub expected_duration: f64,
    /// sqrt(Σ variances) along the path.
    pub std_dev: f64,
    pub confidence_interval_90pct: (f64, f64),
    /// How many path tasks carried a usable estimate. The rest contribute
    /// their fixed duration with zero variance.
    pub tasks_with_estimates: usize,
}

/// Summarise three-point estimates along the critical path.
///
/// Returns `None` when no task in the project carries an estimate. Invalid
/// estimates are reported as warnings and treated as absent.
pub fn pert_summary(schedule: &CpmSchedule) -> Outcome<Option<PertSummary>> {
    let graph = schedule.graph();

    let warnings: Vec<InputWarning> = graph
        .tasks()
        .iter()
        .filter(|t| t.estimate.is_some_and(|e| !e.is_valid()))
        .map(|t| {
            InputWarning::InvalidEstimate {
                task_id: t.id.clone(),
            }
            .emit()
        })
        .collect();

    if graph.tasks().iter().all(|t| t.estimate.is_none()) {
        return Outcome::new(None, warnings);
    }

    let mut expected_duration = 0.0;
    let mut variance = 0.0;
    let mut tasks_with_estimates = 0;

    for &idx in schedule.critical_path() {
        let task = graph.task(idx);
        match task.estimate.filter(ThreePointEstimate::is_valid) {
            Some(estimate) => {
                let pert = estimate.pert();
                expected_duration += pert.expected;
                variance += pert.variance();
                tasks_with_estimates += 1;
            }
            None => expected_duration += task.duration,
        }
    }

    let std_dev = variance.sqrt();
    let summary = PertSummary {
        expected_duration,
        std_dev,
        confidence_interval_90pct: (
            (expected_duration - Z_90 * std_dev).max(0.0),
            expected_duration + Z_90 * std_dev,
        ),
        tasks_with_estimates,
    };

    Outcome::new(Some(summary), warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CpmConfig;
    use crate::critical_path::compute_schedule;
    use crate::models::{Dependency, Task};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_pert_estimate() {
        let estimate = ThreePointEstimate {
            optimistic: 2.0,
            most_likely: 4.0,
            pessimistic: 12.0,
        };
        let pert = estimate.pert();
        assert!(approx(pert.expected, 5.0));
        assert!(approx(pert.std_dev, 10.0 / 6.0));
    }

    #[test]
    fn test_invalid_estimate_detected() {
        let estimate = ThreePointEstimate {
            optimistic: 5.0,
            most_likely: 3.0,
            pessimistic: 8.0,
        };
        assert!(!estimate.is_valid());
    }

    #[test]
    fn test_summary_over_critical_path() {
        // a -> b on the path, c off it
        let tasks = vec![
            Task::new("a", "A", 4.0).with_estimate(2.0, 4.0, 12.0),
            Task::new("b", "B", 6.0),
            Task::new("c", "C", 1.0).with_estimate(1.0, 1.0, 100.0),
        ];
        let deps = vec![Dependency::new("a", "b")];
        let schedule = compute_schedule(&tasks, &deps, &CpmConfig::default()).unwrap();

        let summary = pert_summary(&schedule).value.unwrap();
        assert!(approx(summary.expected_duration, 5.0 + 6.0));
        assert!(approx(summary.std_dev, 10.0 / 6.0));
        assert_eq!(summary.tasks_with_estimates, 1);
    }

    #[test]
    fn test_no_estimates_gives_none() {
        let tasks = vec![Task::new("a", "A", 4.0)];
        let schedule = compute_schedule(&tasks, &[], &CpmConfig::default()).unwrap();
        let outcome = pert_summary(&schedule);
        assert!(outcome.value.is_none());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_invalid_estimate_warns_and_falls_back() {
        let tasks = vec![Task::new("a", "A", 4.0).with_estimate(9.0, 1.0, 2.0)];
        let schedule = compute_schedule(&tasks, &[], &CpmConfig::default()).unwrap();
        let outcome = pert_summary(&schedule);
        assert_eq!(
            outcome.warnings,
            vec![InputWarning::InvalidEstimate {
                task_id: "a".into()
            }]
        );
        let summary = outcome.value.unwrap();
        assert!(approx(summary.expected_duration, 4.0));
        assert_eq!(summary.tasks_with_estimates, 0);
    }
}
