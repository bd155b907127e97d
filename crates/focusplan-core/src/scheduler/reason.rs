//! Human-readable explanations for rejected tasks.

use crate::timeline::FreeTimeSet;

pub const NO_SLOTS_REMAINING: &str = "No available time slots remaining";
pub const NO_SUITABLE_SLOT: &str = "Could not find suitable time slot";
pub const EMPTY_DURATION: &str = "Task has no duration to schedule";

/// Explain why a task whose chunk of `chunk_minutes` failed could not be placed.
///
/// `free` is the shared free-time set at the moment of failure, before any of
/// the task's provisional chunks; `total_minutes` is the whole task.
pub fn rejection_reason(free: &FreeTimeSet, chunk_minutes: u32, total_minutes: u32) -> String {
    let Some(largest) = free.largest_minutes() else {
        return NO_SLOTS_REMAINING.to_string();
    };

    if i64::from(chunk_minutes) > largest {
        return format!(
            "Task requires {chunk_minutes} minutes, but largest available slot is {largest} minutes"
        );
    }

    let free_minutes = free.total_minutes();
    if i64::from(total_minutes) > free_minutes {
        return format!(
            "Task requires {total_minutes} minutes, but only {free_minutes} minutes remain free \
             (largest available slot is {largest} minutes)"
        );
    }

    NO_SUITABLE_SLOT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Interval;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 27)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn lunch_break_day() -> FreeTimeSet {
        FreeTimeSet::new(at(9), at(17), &[Interval::new(at(12), at(13)).unwrap()])
    }

    #[test]
    fn empty_set_reports_no_slots() {
        assert_eq!(rejection_reason(&FreeTimeSet::default(), 30, 30), NO_SLOTS_REMAINING);
    }

    #[test]
    fn oversized_chunk_reports_largest_slot() {
        assert_eq!(
            rejection_reason(&lunch_break_day(), 300, 300),
            "Task requires 300 minutes, but largest available slot is 240 minutes"
        );
    }

    #[test]
    fn oversized_task_reports_free_total() {
        assert_eq!(
            rejection_reason(&lunch_break_day(), 90, 480),
            "Task requires 480 minutes, but only 420 minutes remain free \
             (largest available slot is 240 minutes)"
        );
    }

    #[test]
    fn otherwise_generic() {
        assert_eq!(rejection_reason(&lunch_break_day(), 90, 180), NO_SUITABLE_SLOT);
    }
}
