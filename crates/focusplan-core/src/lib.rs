//! # focusplan Core Library
//!
//! This library builds conflict-free daily schedules. Given tasks, a
//! work-hours window, blocked intervals, and optional advisory insights, it
//! partitions the day into non-overlapping blocks, splits long tasks into
//! focus-sized chunks, and reports which tasks could not be placed and why.
//!
//! ## Architecture
//!
//! - **Timeline**: half-open intervals and the per-run free-time set
//! - **Task**: task records, deterministic ordering, duration splitting
//! - **Insight**: advisory text acting as a soft constraint on slots
//! - **Scheduler**: first-fit slot search and atomic per-task placement
//! - **Request / Service**: validation at the boundary, fallback schedules,
//!   caller-level deadlines
//! - **Storage**: TOML-based configuration of request defaults
//!
//! ## Key Components
//!
//! - [`ScheduleBuilder`]: per-run placement state
//! - [`FreeTimeSet`]: ordered disjoint free intervals
//! - [`ScheduleRequest`]: wire-level input
//! - [`DailySchedule`]: the produced plan
//! - [`Config`]: request defaults

pub mod error;
pub mod insight;
pub mod request;
pub mod schedule;
pub mod scheduler;
pub mod service;
pub mod storage;
pub mod task;
pub mod time;
pub mod timeline;

pub use error::{ConfigError, CoreError, ValidationError};
pub use insight::{Confidence, Insight, InsightFilter};
pub use request::{BlockedTime, Preferences, ScheduleRequest, TaskRecord, WorkHours};
pub use schedule::{DailySchedule, ScheduleBlock, UnscheduledEntry};
pub use scheduler::{build_schedule, PlanInput, ScheduleBuilder, SchedulerConfig, SlotFinder, TaskOutcome};
pub use service::{plan, plan_for, plan_or_fallback, plan_or_fallback_for, plan_with_timeout};
pub use storage::Config;
pub use task::{order_tasks, split_duration, Priority, Recurrence, Task};
pub use timeline::{FreeTimeSet, Interval};
