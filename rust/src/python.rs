//! Python bindings (feature `python`).
//!
//! Report generators call `analyze_project_json` and receive the full
//! analysis as JSON, ready to render.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::config::{CpmConfig, ScenarioConfig};
use crate::models::{Deadline, Dependency, ProjectInput, ResourceRequirement, Task};

/// A task to be scheduled (PyO3 wrapper).
#[pyclass(name = "Task")]
#[derive(Clone, Debug)]
pub struct PyTask {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: f64,
    #[pyo3(get, set)]
    pub optimistic: Option<f64>,
    #[pyo3(get, set)]
    pub most_likely: Option<f64>,
    #[pyo3(get, set)]
    pub pessimistic: Option<f64>,
}

#[pymethods]
impl PyTask {
    #[new]
    #[pyo3(signature = (id, name, duration, optimistic=None, most_likely=None, pessimistic=None))]
    fn new(
        id: String,
        name: String,
        duration: f64,
        optimistic: Option<f64>,
        most_likely: Option<f64>,
        pessimistic: Option<f64>,
    ) -> Self {
        Self {
            id,
            name,
            duration,
            optimistic,
            most_likely,
            pessimistic,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, name={:?}, duration={})",
            self.id, self.name, self.duration
        )
    }
}

impl From<PyTask> for Task {
    fn from(t: PyTask) -> Self {
        let task = Task::new(t.id, t.name, t.duration);
        match (t.optimistic, t.most_likely, t.pessimistic) {
            (Some(o), Some(m), Some(p)) => task.with_estimate(o, m, p),
            _ => task,
        }
    }
}

/// Staff, consultants and budget for a task (PyO3 wrapper).
#[pyclass(name = "ResourceRequirement")]
#[derive(Clone, Debug)]
pub struct PyResourceRequirement {
    #[pyo3(get, set)]
    pub staff: u32,
    #[pyo3(get, set)]
    pub consultants: HashMap<String, u32>,
    #[pyo3(get, set)]
    pub budget: f64,
}

#[pymethods]
impl PyResourceRequirement {
    #[new]
    #[pyo3(signature = (staff=0, consultants=None, budget=0.0))]
    fn new(staff: u32, consultants: Option<HashMap<String, u32>>, budget: f64) -> Self {
        Self {
            staff,
            consultants: consultants.unwrap_or_default(),
            budget,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ResourceRequirement(staff={}, consultants={}, budget={})",
            self.staff,
            self.consultants.len(),
            self.budget
        )
    }
}

impl From<PyResourceRequirement> for ResourceRequirement {
    fn from(r: PyResourceRequirement) -> Self {
        Self {
            staff: r.staff,
            consultants: r.consultants.into_iter().collect(),
            budget: r.budget,
        }
    }
}

/// Run the full CPM analysis and return it as a JSON string.
///
/// # Arguments
/// * `tasks` - Tasks in declaration order
/// * `dependencies` - (predecessor_id, successor_id) pairs
/// * `deadlines` - task id -> deadline in days from project start
/// * `deadline_dates` - task id -> deadline date (requires `start_date`)
/// * `resources` - task id -> ResourceRequirement
/// * `scenarios` - scenario name -> duration multiplier (default best/likely/worst)
/// * `scenario_weights` - scenario name -> probability weight
/// * `epsilon` - criticality tolerance (default 0.01)
/// * `buffer_days` - deadline buffer for MEDIUM risk (default 10)
/// * `start_date` - calendar date of day 0
///
/// # Returns
/// * JSON with `value` (schedule, resources, risks, scenarios, pert) and `warnings`
///
/// # Raises
/// * ValueError on cycles, duplicate or unknown task ids, invalid durations
///   or invalid configuration
#[pyfunction]
#[pyo3(signature = (
    tasks,
    dependencies,
    deadlines=None,
    deadline_dates=None,
    resources=None,
    scenarios=None,
    scenario_weights=None,
    epsilon=None,
    buffer_days=None,
    start_date=None,
    verbosity=0
))]
#[allow(clippy::too_many_arguments)]
fn analyze_project_json(
    tasks: Vec<PyTask>,
    dependencies: Vec<(String, String)>,
    deadlines: Option<HashMap<String, f64>>,
    deadline_dates: Option<HashMap<String, NaiveDate>>,
    resources: Option<HashMap<String, PyResourceRequirement>>,
    scenarios: Option<HashMap<String, f64>>,
    scenario_weights: Option<HashMap<String, f64>>,
    epsilon: Option<f64>,
    buffer_days: Option<f64>,
    start_date: Option<NaiveDate>,
    verbosity: u8,
) -> PyResult<String> {
    let mut input = ProjectInput::new(
        tasks.into_iter().map(Task::from).collect(),
        dependencies
            .into_iter()
            .map(|(p, s)| Dependency::new(p, s))
            .collect(),
    );
    for (id, days) in deadlines.unwrap_or_default() {
        input.deadlines.insert(id, Deadline::Days(days));
    }
    for (id, date) in deadline_dates.unwrap_or_default() {
        input.deadlines.insert(id, Deadline::Date(date));
    }
    input.resources = resources
        .unwrap_or_default()
        .into_iter()
        .map(|(id, r)| (id, r.into()))
        .collect();

    let defaults = CpmConfig::default();
    let config = CpmConfig {
        epsilon: epsilon.unwrap_or(defaults.epsilon),
        buffer_days: buffer_days.unwrap_or(defaults.buffer_days),
        verbosity,
        start_date,
        ..defaults
    };

    let mut scenario_config = match scenarios {
        Some(multipliers) => ScenarioConfig::new(multipliers.into_iter().collect()),
        None => ScenarioConfig::default(),
    };
    scenario_config.weights = scenario_weights.unwrap_or_default().into_iter().collect();

    let outcome = crate::analyze_project(&input, &config, &scenario_config)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    serde_json::to_string(&outcome).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// The critpath Python module.
#[pymodule]
fn critpath(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTask>()?;
    m.add_class::<PyResourceRequirement>()?;
    m.add_function(wrap_pyfunction!(analyze_project_json, m)?)?;
    Ok(())
}
