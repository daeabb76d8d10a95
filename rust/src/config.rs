//! Configuration types for a scheduling run.
//!
//! Configuration is passed explicitly to every call; nothing is cached
//! between runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, ScheduleError};
use crate::resources::PeakStrategy;

/// Names of the default scenarios.
pub const SCENARIO_BEST: &str = "best";
pub const SCENARIO_LIKELY: &str = "likely";
pub const SCENARIO_WORST: &str = "worst";

/// Configuration for the CPM pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpmConfig {
    /// Tolerance for criticality and float comparisons.
    pub epsilon: f64,
    /// Deadline buffer below which a task is flagged MEDIUM.
    pub buffer_days: f64,
    /// Deadline buffer below which a task is flagged HIGH.
    pub high_risk_buffer_days: f64,
    /// Tasks longer than this are flagged LONG_DURATION.
    pub long_duration_days: f64,
    /// Algorithm used for peak concurrent resource usage.
    pub peak_strategy: PeakStrategy,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
    /// Calendar date of day 0. Enables date fields in timelines and risks,
    /// and date-valued deadlines.
    pub start_date: Option<NaiveDate>,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            buffer_days: 10.0,
            high_risk_buffer_days: 5.0,
            long_duration_days: 60.0,
            peak_strategy: PeakStrategy::SweepLine,
            verbosity: 0,
            start_date: None,
        }
    }
}

impl CpmConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_buffer_days(mut self, buffer_days: f64) -> Self {
        self.buffer_days = buffer_days;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Reject values that would make the comparisons meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ScheduleError::InvalidConfig {
                field: "epsilon",
                reason: format!("must be finite and positive, got {}", self.epsilon),
            });
        }
        for (field, value) in [
            ("buffer_days", self.buffer_days),
            ("high_risk_buffer_days", self.high_risk_buffer_days),
            ("long_duration_days", self.long_duration_days),
        ] {
            if !value.is_finite() {
                return Err(ScheduleError::InvalidConfig {
                    field,
                    reason: format!("must be finite, got {}", value),
                });
            }
        }
        if self.high_risk_buffer_days < 0.0 {
            return Err(ScheduleError::InvalidConfig {
                field: "high_risk_buffer_days",
                reason: format!("must be non-negative, got {}", self.high_risk_buffer_days),
            });
        }
        // HIGH is the tighter band; MEDIUM sits between the two thresholds
        if self.buffer_days < self.high_risk_buffer_days {
            return Err(ScheduleError::InvalidConfig {
                field: "buffer_days",
                reason: format!(
                    "must be at least high_risk_buffer_days ({}), got {}",
                    self.high_risk_buffer_days, self.buffer_days
                ),
            });
        }
        Ok(())
    }
}

/// Multipliers and probability weights for duration scenarios.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// scenario name -> multiplier applied to the base project duration
    pub multipliers: BTreeMap<String, f64>,
    /// scenario name -> probability weight. Missing names fall back to
    /// `default_weight`.
    pub weights: BTreeMap<String, f64>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let multipliers = [
            (SCENARIO_BEST, 0.8),
            (SCENARIO_LIKELY, 1.0),
            (SCENARIO_WORST, 1.3),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self {
            multipliers,
            weights: BTreeMap::new(),
        }
    }
}

impl ScenarioConfig {
    pub fn new(multipliers: BTreeMap<String, f64>) -> Self {
        Self {
            multipliers,
            weights: BTreeMap::new(),
        }
    }

    pub fn with_weight(mut self, name: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(name.into(), weight);
        self
    }

    /// Weight for a scenario: explicit if given, otherwise 20/60/20 for
    /// best/likely/worst and 0 for anything else.
    pub fn weight_for(&self, name: &str) -> f64 {
        if let Some(&w) = self.weights.get(name) {
            return w;
        }
        default_weight(name)
    }
}

pub fn default_weight(name: &str) -> f64 {
    match name {
        SCENARIO_BEST | SCENARIO_WORST => 0.2,
        SCENARIO_LIKELY => 0.6,
        _ => 0.0,
    }
}
