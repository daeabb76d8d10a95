//! Resource aggregation over a computed schedule.
//!
//! Peak usage sits behind the [`PeakUsage`] trait so the O(n²) scan and the
//! sweep line can be swapped without touching callers.

mod aggregate;
mod peak;

pub use aggregate::{
    aggregate_resources, aggregate_resources_with, PeakResources, ResourceResult, ResourceTotals,
    TimelineEntry,
};
pub use peak::{NaiveScan, PeakStrategy, PeakUsage, SweepLine, UsageInterval};
