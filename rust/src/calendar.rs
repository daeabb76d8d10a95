//! Conversion between day offsets and calendar dates.
//!
//! Schedules are computed in (possibly fractional) days from project start.
//! When a caller supplies a start date, offsets are projected onto the
//! calendar by rounding up to whole days.

use chrono::{Days, NaiveDate};

use crate::models::Deadline;

/// Calendar date for a day offset from `start`. Fractional offsets round up,
/// so a task finishing at day 2.5 is reported as finishing on day 3.
///
/// Returns `None` when the offset is not finite or the date falls outside
/// the range chrono can represent.
pub fn offset_to_date(start: NaiveDate, offset_days: f64) -> Option<NaiveDate> {
    let days = offset_days.ceil();
    if !days.is_finite() || days.abs() > u64::MAX as f64 {
        return None;
    }
    if days >= 0.0 {
        start.checked_add_days(Days::new(days as u64))
    } else {
        start.checked_sub_days(Days::new((-days) as u64))
    }
}

/// Whole days from `start` to `date` (negative if `date` is earlier).
pub fn date_to_offset(start: NaiveDate, date: NaiveDate) -> f64 {
    (date - start).num_days() as f64
}

/// Deadline as days from project start.
///
/// Returns `None` for a date deadline when no start date is known, or for a
/// non-finite day count.
pub fn resolve_deadline(deadline: &Deadline, start: Option<NaiveDate>) -> Option<f64> {
    match *deadline {
        Deadline::Days(days) if days.is_finite() => Some(days),
        Deadline::Days(_) => None,
        Deadline::Date(date) => start.map(|s| date_to_offset(s, date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_offset_to_date_rounds_up() {
        let start = d(2025, 1, 1);
        assert_eq!(offset_to_date(start, 0.0), Some(d(2025, 1, 1)));
        assert_eq!(offset_to_date(start, 2.0), Some(d(2025, 1, 3)));
        assert_eq!(offset_to_date(start, 2.5), Some(d(2025, 1, 4)));
        assert_eq!(offset_to_date(start, -1.0), Some(d(2024, 12, 31)));
    }

    #[test]
    fn test_offset_out_of_calendar_range() {
        let start = d(2025, 1, 1);
        assert_eq!(offset_to_date(start, 1e12 + 3.0), None);
        assert_eq!(offset_to_date(start, -1e12), None);
        assert_eq!(offset_to_date(start, f64::INFINITY), None);
        assert_eq!(offset_to_date(start, 1e30), None);
    }

    #[test]
    fn test_date_to_offset() {
        assert_eq!(date_to_offset(d(2025, 1, 1), d(2025, 4, 1)), 90.0);
        assert_eq!(date_to_offset(d(2025, 1, 10), d(2025, 1, 1)), -9.0);
    }

    #[test]
    fn test_resolve_deadline() {
        let start = Some(d(2025, 1, 1));
        assert_eq!(resolve_deadline(&Deadline::Days(45.0), None), Some(45.0));
        assert_eq!(resolve_deadline(&Deadline::Days(f64::NAN), start), None);
        assert_eq!(
            resolve_deadline(&Deadline::Date(d(2025, 1, 31)), start),
            Some(30.0)
        );
        assert_eq!(resolve_deadline(&Deadline::Date(d(2025, 1, 31)), None), None);
    }
}
