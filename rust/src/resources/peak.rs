//! Peak concurrent usage over half-open intervals.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// `amount` units in use over `[start, end)`. Empty intervals
/// (`end <= start`, e.g. zero-duration milestones) never count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UsageInterval {
    pub start: f64,
    pub end: f64,
    pub amount: u64,
}

impl UsageInterval {
    pub fn new(start: f64, end: f64, amount: u64) -> Self {
        Self { start, end, amount }
    }

    fn is_active(&self) -> bool {
        self.end > self.start && self.amount > 0
    }

    fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

/// Computes the maximum total `amount` in use at any single instant.
pub trait PeakUsage {
    fn peak(&self, intervals: &[UsageInterval]) -> u64;
}

/// Checks every interval start against every interval. O(n²); fine for a
/// few hundred tasks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaiveScan;

impl PeakUsage for NaiveScan {
    fn peak(&self, intervals: &[UsageInterval]) -> u64 {
        // The running total can only rise at an interval start, so the
        // maximum is attained at one of them.
        intervals
            .iter()
            .filter(|iv| iv.is_active())
            .map(|probe| {
                intervals
                    .iter()
                    .filter(|iv| iv.is_active() && iv.contains(probe.start))
                    .map(|iv| iv.amount)
                    .sum::<u64>()
            })
            .max()
            .unwrap_or(0)
    }
}

/// Sorted start/end event sweep. O(n log n).
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepLine;

impl PeakUsage for SweepLine {
    fn peak(&self, intervals: &[UsageInterval]) -> u64 {
        // (time, is_start, amount). Ends sort before starts at the same
        // instant because intervals are half-open.
        let mut events: Vec<(f64, bool, u64)> = Vec::with_capacity(intervals.len() * 2);
        for iv in intervals.iter().filter(|iv| iv.is_active()) {
            events.push((iv.start, true, iv.amount));
            events.push((iv.end, false, iv.amount));
        }
        events.sort_by(|a, b| match a.0.total_cmp(&b.0) {
            Ordering::Equal => a.1.cmp(&b.1),
            other => other,
        });

        let mut running: u64 = 0;
        let mut peak: u64 = 0;
        for (_, is_start, amount) in events {
            if is_start {
                running += amount;
                peak = peak.max(running);
            } else {
                running -= amount;
            }
        }
        peak
    }
}

/// Selects the peak-usage algorithm from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakStrategy {
    NaiveScan,
    #[default]
    SweepLine,
}

impl PeakUsage for PeakStrategy {
    fn peak(&self, intervals: &[UsageInterval]) -> u64 {
        match self {
            PeakStrategy::NaiveScan => NaiveScan.peak(intervals),
            PeakStrategy::SweepLine => SweepLine.peak(intervals),
        }
    }
}
