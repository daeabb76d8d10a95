//! Best/likely/worst duration scenarios.
//!
//! Each scenario scales the base project duration by a multiplier. This is a
//! direct approximation: task durations are not compressed or stretched and
//! the passes are not re-run, so a scenario never changes which tasks are
//! critical.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ScenarioConfig;
use crate::error::{InputWarning, Outcome};

/// z-score for a two-sided 90% interval under a normal approximation.
const Z_90: f64 = 1.645;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub multiplier: f64,
    pub duration: f64,
    /// duration - base duration.
    pub variance: f64,
    /// variance as a percentage of the base duration (0 when the base is 0).
    pub variance_pct: f64,
    /// Normalised probability weight.
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub base_duration: f64,
    pub scenarios: BTreeMap<String, ScenarioOutcome>,
    /// max - min scenario duration.
    pub range: f64,
    pub probability_weighted_duration: f64,
    /// (lower, upper) from the weighted mean and standard deviation of the
    /// scenario durations; the lower bound is clamped at 0.
    pub confidence_interval_90pct: (f64, f64),
}

/// Scale `project_duration` by every configured multiplier.
///
/// Multipliers that are negative or not finite are skipped with a warning.
/// Weights come from [`ScenarioConfig::weight_for`] and are normalised by
/// their sum; negative or non-finite weights count as zero. If every weight
/// is zero, scenarios are weighted equally.
pub fn analyze_scenarios(project_duration: f64, config: &ScenarioConfig) -> Outcome<ScenarioResult> {
    let mut warnings = Vec::new();
    let mut valid: Vec<(&str, f64)> = Vec::with_capacity(config.multipliers.len());
    for (name, &multiplier) in &config.multipliers {
        if multiplier.is_finite() && multiplier >= 0.0 {
            valid.push((name.as_str(), multiplier));
        } else {
            warnings.push(
                InputWarning::InvalidScenarioMultiplier {
                    name: name.clone(),
                    multiplier,
                }
                .emit(),
            );
        }
    }

    if valid.is_empty() {
        warnings.push(InputWarning::EmptyScenarioSet.emit());
        let result = ScenarioResult {
            base_duration: project_duration,
            scenarios: BTreeMap::new(),
            range: 0.0,
            probability_weighted_duration: project_duration,
            confidence_interval_90pct: (project_duration, project_duration),
        };
        return Outcome::new(result, warnings);
    }

    let raw_weights: Vec<f64> = valid
        .iter()
        .map(|&(name, _)| {
            let weight = config.weight_for(name);
            if weight.is_finite() {
                weight.max(0.0)
            } else {
                0.0
            }
        })
        .collect();
    let total_weight: f64 = raw_weights.iter().sum();
    let equal = 1.0 / valid.len() as f64;

    let scenarios: BTreeMap<String, ScenarioOutcome> = valid
        .iter()
        .zip(&raw_weights)
        .map(|(&(name, multiplier), &raw)| {
            let duration = project_duration * multiplier;
            let variance = duration - project_duration;
            let variance_pct = if project_duration > 0.0 {
                variance / project_duration * 100.0
            } else {
                0.0
            };
            let weight = if total_weight > 0.0 {
                raw / total_weight
            } else {
                equal
            };
            (
                name.to_string(),
                ScenarioOutcome {
                    multiplier,
                    duration,
                    variance,
                    variance_pct,
                    weight,
                },
            )
        })
        .collect();

    let durations = scenarios.values().map(|s| s.duration);
    let min = durations.clone().fold(f64::INFINITY, f64::min);
    let max = durations.fold(f64::NEG_INFINITY, f64::max);

    let mean: f64 = scenarios.values().map(|s| s.duration * s.weight).sum();
    let std_dev = scenarios
        .values()
        .map(|s| s.weight * (s.duration - mean).powi(2))
        .sum::<f64>()
        .sqrt();

    Outcome::new(
        ScenarioResult {
            base_duration: project_duration,
            scenarios,
            range: max - min,
            probability_weighted_duration: mean,
            confidence_interval_90pct: ((mean - Z_90 * std_dev).max(0.0), mean + Z_90 * std_dev),
        },
        warnings,
    )
}
