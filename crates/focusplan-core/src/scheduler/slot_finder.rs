//! First-fit slot search with the insight veto applied.

use crate::insight::InsightFilter;
use crate::task::Task;
use crate::timeline::{FreeTimeSet, Interval};

/// Finds the earliest free interval that fits a chunk and passes the filter.
#[derive(Debug, Clone, Copy)]
pub struct SlotFinder<'a> {
    filter: InsightFilter<'a>,
}

impl<'a> SlotFinder<'a> {
    pub fn new(filter: InsightFilter<'a>) -> Self {
        Self { filter }
    }

    /// Scan `free` in ascending order for a slot of at least `chunk_minutes`.
    ///
    /// Long-enough intervals vetoed at their start are skipped; the scan
    /// continues with the next interval.
    pub fn find(&self, chunk_minutes: u32, free: &FreeTimeSet, task: &Task) -> Option<Interval> {
        free.iter()
            .filter(|slot| slot.can_fit(i64::from(chunk_minutes)))
            .find(|slot| self.filter.accepts(slot.start(), &task.tags))
            .copied()
    }
}
