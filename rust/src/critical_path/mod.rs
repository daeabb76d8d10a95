//! Critical path analysis.
//!
//! Combines the forward and backward passes into per-task floats, classifies
//! critical tasks and extracts a representative critical chain.

mod calculation;
mod float;
mod path;
mod types;

pub use calculation::{compute_schedule, CpmSchedule};
pub use float::compute_floats;
pub use path::build_critical_path;
pub use types::{ScheduleResult, TaskDetail, TaskTiming};
