//! Wire-level scheduling request and its validation.
//!
//! Requests carry timestamps and clock times as text. [`ScheduleRequest::validate`]
//! turns them into a [`PlanInput`] or rejects the request before the engine
//! ever sees it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::insight::Insight;
use crate::scheduler::{PlanInput, SchedulerConfig, DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES};
use crate::task::{Priority, Recurrence, Task};
use crate::time::{parse_clock, parse_date, require_due_instant, require_instant};
use crate::timeline::Interval;

/// Title given to tasks that arrive without one.
pub const UNTITLED_TASK: &str = "Untitled Task";
/// Time-zone label used when the request names none.
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// Work-hours window as `HH:MM` clock times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHours {
    #[serde(default = "default_work_start")]
    pub start: String,
    #[serde(default = "default_work_end")]
    pub end: String,
}

/// Scheduling preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub work_hours: WorkHours,
    #[serde(default = "default_focus_minutes")]
    pub preferred_focus_minutes: i64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
}

/// An externally imposed unavailable interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedTime {
    pub start: String,
    pub end: String,
}

/// A task as supplied by the upstream extractor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub recurring: Option<Recurrence>,
}

/// Everything needed to plan one day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    /// Absent preferences are filled by the caller (see `Config::preferences`).
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default)]
    pub blocked_times: Vec<BlockedTime>,
    #[serde(default)]
    pub knowledge_insights: Option<Vec<Insight>>,
    /// `YYYY-MM-DD`; today when absent
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

fn default_work_start() -> String {
    "09:00".into()
}
fn default_work_end() -> String {
    "17:00".into()
}
fn default_focus_minutes() -> i64 {
    i64::from(DEFAULT_FOCUS_MINUTES)
}
fn default_break_minutes() -> i64 {
    i64::from(DEFAULT_BREAK_MINUTES)
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start: default_work_start(),
            end: default_work_end(),
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            work_hours: WorkHours::default(),
            preferred_focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl ScheduleRequest {
    /// The date this request plans for, falling back to `today`.
    pub fn date_or(&self, today: NaiveDate) -> NaiveDate {
        self.target_date
            .as_deref()
            .and_then(|d| parse_date(d).ok())
            .unwrap_or(today)
    }

    /// The time-zone label, defaulting to UTC.
    pub fn time_zone(&self) -> &str {
        self.timezone
            .as_deref()
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .unwrap_or(DEFAULT_TIME_ZONE)
    }

    /// Validate every field and produce the engine input.
    pub fn validate(&self, today: NaiveDate) -> Result<PlanInput, ValidationError> {
        let date = match self.target_date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => today,
        };

        let preferences = self.preferences.clone().unwrap_or_default();
        let config = SchedulerConfig {
            preferred_focus_minutes: positive_minutes(
                "preferences.preferred_focus_minutes",
                preferences.preferred_focus_minutes,
            )?,
            break_minutes: u32::try_from(preferences.break_minutes).map_err(|_| {
                ValidationError::InvalidValue {
                    field: "preferences.break_minutes".into(),
                    message: format!("must be zero or positive, got {}", preferences.break_minutes),
                }
            })?,
        };

        let work_start = date.and_time(parse_clock(
            "preferences.work_hours.start",
            &preferences.work_hours.start,
        )?);
        let work_end = date.and_time(parse_clock(
            "preferences.work_hours.end",
            &preferences.work_hours.end,
        )?);
        let work_window =
            Interval::new(work_start, work_end).ok_or_else(|| ValidationError::InvalidTimeRange {
                field: "preferences.work_hours".into(),
                start: work_start,
                end: work_end,
            })?;

        let blocked = self
            .blocked_times
            .iter()
            .enumerate()
            .map(|(i, b)| b.to_interval(i))
            .collect::<Result<Vec<_>, _>>()?;

        let tasks = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| t.to_task(i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PlanInput {
            date,
            time_zone: self.time_zone().to_string(),
            work_window,
            blocked,
            tasks,
            insights: self.knowledge_insights.clone().unwrap_or_default(),
            config,
        })
    }
}

impl BlockedTime {
    fn to_interval(&self, index: usize) -> Result<Interval, ValidationError> {
        let field = format!("blocked_times[{index}]");
        let start = require_instant(&format!("{field}.start"), &self.start)?;
        let end = require_instant(&format!("{field}.end"), &self.end)?;
        Interval::new(start, end).ok_or(ValidationError::InvalidTimeRange { field, start, end })
    }
}

impl TaskRecord {
    fn to_task(&self, index: usize) -> Result<Task, ValidationError> {
        let title = match self.title.trim() {
            "" => UNTITLED_TASK.to_string(),
            t => t.to_string(),
        };

        let due_date = self
            .due_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(|d| require_due_instant(&format!("tasks[{index}].due_date"), d))
            .transpose()?;

        let duration_minutes = self
            .duration_minutes
            .map(|m| positive_minutes(&format!("tasks[{index}].duration_minutes"), m))
            .transpose()?;

        Ok(Task {
            title,
            description: self.description.clone(),
            priority: self.priority.unwrap_or_default(),
            due_date,
            duration_minutes,
            tags: self.tags.clone(),
            recurring: self.recurring,
        })
    }
}

fn positive_minutes(field: &str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("must be a positive number of minutes, got {value}"),
        })
}
