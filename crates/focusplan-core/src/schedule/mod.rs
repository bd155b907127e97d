//! Output types of a scheduling run.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Title used for the single entry of a fallback schedule.
pub const FALLBACK_TITLE: &str = "Schedule creation failed";

/// A committed chunk of a task on the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub task_title: String,
    pub task_id: String,
    /// 1-based position of this chunk within its task.
    pub subtask_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScheduleBlock {
    /// Get total duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn overlaps(&self, other: &ScheduleBlock) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A task that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledEntry {
    pub task_title: String,
    pub reason: String,
}

impl UnscheduledEntry {
    pub fn new(task_title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            task_title: task_title.into(),
            reason: reason.into(),
        }
    }
}

/// The plan for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchedule {
    pub date: NaiveDate,
    /// Opaque label; never interpreted.
    pub time_zone: String,
    #[serde(default)]
    pub blocks: Vec<ScheduleBlock>,
    #[serde(default)]
    pub unscheduled: Vec<UnscheduledEntry>,
}

impl DailySchedule {
    /// Minimal schedule reported when planning itself failed.
    pub fn fallback(date: NaiveDate, time_zone: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            date,
            time_zone: time_zone.into(),
            blocks: Vec::new(),
            unscheduled: vec![UnscheduledEntry::new(FALLBACK_TITLE, reason)],
        }
    }

    /// Whether this is a fallback produced by [`DailySchedule::fallback`].
    pub fn is_fallback(&self) -> bool {
        self.blocks.is_empty()
            && self.unscheduled.len() == 1
            && self.unscheduled[0].task_title == FALLBACK_TITLE
    }

    /// Blocks belonging to `task_id`, in subtask order.
    pub fn blocks_for(&self, task_id: &str) -> Vec<&ScheduleBlock> {
        let mut blocks: Vec<_> = self.blocks.iter().filter(|b| b.task_id == task_id).collect();
        blocks.sort_by_key(|b| b.subtask_index);
        blocks
    }

    pub fn scheduled_minutes(&self) -> i64 {
        self.blocks.iter().map(ScheduleBlock::duration_minutes).sum()
    }
}
