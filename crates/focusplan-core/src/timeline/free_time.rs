//! The free-time set of a single scheduling run.
//!
//! Starts as the work-hours window, has every blocked interval subtracted in
//! the order given, and is then narrowed by each committed block. Members stay
//! disjoint, non-touching, and ascending by start after every mutation.

use chrono::NaiveDateTime;

use super::Interval;

/// Ordered, disjoint free intervals of one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeTimeSet {
    intervals: Vec<Interval>,
}

impl FreeTimeSet {
    /// Build the set for `[work_start, work_end)` minus `blocked`.
    ///
    /// `blocked` may be unsorted, overlapping, or partly outside the window.
    /// An empty or inverted work window yields an empty set.
    pub fn new(work_start: NaiveDateTime, work_end: NaiveDateTime, blocked: &[Interval]) -> Self {
        let mut set = Self {
            intervals: Interval::new(work_start, work_end).into_iter().collect(),
        };
        for interval in blocked {
            set.subtract(interval);
        }
        set
    }

    /// Build the set for an already validated work window.
    pub fn from_window(window: Interval, blocked: &[Interval]) -> Self {
        Self::new(window.start(), window.end(), blocked)
    }

    /// Remove `blocked` from every member interval.
    pub fn subtract(&mut self, blocked: &Interval) {
        let mut remaining = Vec::with_capacity(self.intervals.len() + 1);

        for slot in self.intervals.drain(..) {
            if blocked.end() <= slot.start() || blocked.start() >= slot.end() {
                // No overlap
                remaining.push(slot);
            } else if blocked.start() <= slot.start() && blocked.end() >= slot.end() {
                // Fully covered
                continue;
            } else if blocked.start() > slot.start() && blocked.end() < slot.end() {
                // Strictly inside: split
                remaining.extend(Interval::new(slot.start(), blocked.start()));
                remaining.extend(Interval::new(blocked.end(), slot.end()));
            } else if blocked.start() <= slot.start() {
                // Covers the start
                remaining.extend(Interval::new(blocked.end(), slot.end()));
            } else {
                // Covers the end
                remaining.extend(Interval::new(slot.start(), blocked.start()));
            }
        }

        self.intervals = remaining;
    }

    /// First interval, by ascending start, that can hold `minutes`.
    pub fn first_fit(&self, minutes: i64) -> Option<Interval> {
        self.intervals.iter().find(|slot| slot.can_fit(minutes)).copied()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Length of the longest member in minutes, if any.
    pub fn largest_minutes(&self) -> Option<i64> {
        self.intervals.iter().map(Interval::duration_minutes).max()
    }

    pub fn total_minutes(&self) -> i64 {
        self.intervals.iter().map(Interval::duration_minutes).sum()
    }
}
