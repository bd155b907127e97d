//! Daily schedule builder.
//!
//! This module places tasks into the free time of a single day:
//! - Orders tasks by due date, then priority, then input order
//! - Splits each task into focus-sized chunks
//! - Finds a first-fit slot per chunk, honouring insight vetoes
//! - Commits a task only when every chunk found a slot
//!
//! Each run owns its [`FreeTimeSet`]; nothing is shared between runs.

mod reason;
mod slot_finder;

pub use reason::{rejection_reason, EMPTY_DURATION, NO_SLOTS_REMAINING, NO_SUITABLE_SLOT};
pub use slot_finder::SlotFinder;

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::insight::{Insight, InsightFilter};
use crate::schedule::{DailySchedule, ScheduleBlock, UnscheduledEntry};
use crate::task::{order_tasks, split_duration, Task};
use crate::timeline::{FreeTimeSet, Interval};

/// Default focus chunk length (minutes)
pub const DEFAULT_FOCUS_MINUTES: u32 = 90;
/// Default break between chunks of the same task (minutes)
pub const DEFAULT_BREAK_MINUTES: u32 = 15;

const SLUG_MAX_CHARS: usize = 20;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Chunk length used for splitting, and the duration of tasks without one
    pub preferred_focus_minutes: u32,
    /// Upper bound on the break kept between consecutive chunks of a task
    pub break_minutes: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            preferred_focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

/// Fully validated input of one scheduling run.
#[derive(Debug, Clone)]
pub struct PlanInput {
    pub date: NaiveDate,
    pub time_zone: String,
    pub work_window: Interval,
    pub blocked: Vec<Interval>,
    pub tasks: Vec<Task>,
    pub insights: Vec<Insight>,
    pub config: SchedulerConfig,
}

/// Outcome of attempting one task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// Every chunk was placed
    Committed(Vec<ScheduleBlock>),
    /// Nothing was placed
    Rejected(UnscheduledEntry),
}

/// Per-run scheduling state.
///
/// Construct one per run with [`ScheduleBuilder::new`] and consume it with
/// [`ScheduleBuilder::build`].
pub struct ScheduleBuilder<'a> {
    input: &'a PlanInput,
    free: FreeTimeSet,
    filter: InsightFilter<'a>,
    issued_ids: HashMap<String, u32>,
}

impl<'a> ScheduleBuilder<'a> {
    pub fn new(input: &'a PlanInput) -> Self {
        Self {
            input,
            free: FreeTimeSet::from_window(input.work_window, &input.blocked),
            filter: InsightFilter::new(&input.insights),
            issued_ids: HashMap::new(),
        }
    }

    /// Free time not yet committed.
    pub fn free_time(&self) -> &FreeTimeSet {
        &self.free
    }

    /// Place every task and produce the day's schedule.
    pub fn build(mut self) -> DailySchedule {
        let input = self.input;
        let mut blocks = Vec::new();
        let mut unscheduled = Vec::new();

        for task in order_tasks(&input.tasks) {
            match self.place_task(task) {
                TaskOutcome::Committed(placed) => blocks.extend(placed),
                TaskOutcome::Rejected(entry) => {
                    debug!(task = %task.title, reason = %entry.reason, "task rejected");
                    unscheduled.push(entry);
                }
            }
        }

        blocks.sort_by_key(|b| b.start);

        info!(
            date = %input.date,
            blocks = blocks.len(),
            unscheduled = unscheduled.len(),
            "schedule built"
        );

        DailySchedule {
            date: input.date,
            time_zone: input.time_zone.clone(),
            blocks,
            unscheduled,
        }
    }

    /// Attempt one task atomically against the current free time.
    ///
    /// A task longer than all remaining free time is rejected before it is
    /// split, so the chunk count stays bounded by the free minutes.
    /// Chunks are searched in a working copy of the free set from which each
    /// earlier chunk of the same task (plus the break after it) is removed.
    /// Only a fully placed task touches the shared set.
    pub fn place_task(&mut self, task: &Task) -> TaskOutcome {
        let input = self.input;
        let config = &input.config;
        let task_id = self.issue_task_id(&task.title);
        let focus = config.preferred_focus_minutes;
        let total = task.effective_minutes(focus);

        if total == 0 {
            return TaskOutcome::Rejected(UnscheduledEntry::new(&task.title, EMPTY_DURATION));
        }
        if i64::from(total) > self.free.total_minutes() {
            let first_chunk = if focus == 0 { total } else { total.min(focus) };
            let reason = rejection_reason(&self.free, first_chunk, total);
            return TaskOutcome::Rejected(UnscheduledEntry::new(&task.title, reason));
        }

        let chunks = split_duration(total, focus);

        let finder = SlotFinder::new(self.filter);
        let mut working = self.free.clone();
        let mut placed: Vec<Interval> = Vec::with_capacity(chunks.len());

        for (index, &minutes) in chunks.iter().enumerate() {
            let found = finder.find(minutes, &working, task).and_then(|slot| {
                Interval::starting_at(slot.start(), i64::from(minutes)).map(|chunk| (slot, chunk))
            });

            let Some((slot, chunk)) = found else {
                let reason = rejection_reason(&self.free, minutes, total);
                return TaskOutcome::Rejected(UnscheduledEntry::new(&task.title, reason));
            };

            debug!(
                task = %task.title,
                chunk = index + 1,
                of = chunks.len(),
                slot = %chunk,
                "chunk placed"
            );

            let mut reserved_end = chunk.end();
            if index + 1 < chunks.len() {
                let room = slot.end() - chunk.end();
                reserved_end += room.min(Duration::minutes(i64::from(config.break_minutes)));
            }
            if let Some(reserved) = Interval::new(chunk.start(), reserved_end) {
                working.subtract(&reserved);
            }
            placed.push(chunk);
        }

        let blocks = placed
            .iter()
            .zip(1u32..)
            .map(|(chunk, subtask_index)| ScheduleBlock {
                start: chunk.start(),
                end: chunk.end(),
                task_title: task.title.clone(),
                task_id: task_id.clone(),
                subtask_index,
                notes: self.filter.annotate(chunk.start(), &task.tags),
            })
            .collect();

        for chunk in &placed {
            self.free.subtract(chunk);
        }

        TaskOutcome::Committed(blocks)
    }

    /// Deterministic id from the title slug and date, suffixed on repeats.
    fn issue_task_id(&mut self, title: &str) -> String {
        let base = format!("{}-{}", task_slug(title), self.input.date.format("%Y%m%d"));
        let count = self.issued_ids.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}-{count}")
        }
    }
}

/// Build the schedule for `input` with fresh per-run state.
pub fn build_schedule(input: &PlanInput) -> DailySchedule {
    ScheduleBuilder::new(input).build()
}

/// Lower-case slug of a title, at most 20 characters.
pub fn task_slug(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .take(SLUG_MAX_CHARS)
        .collect();

    if slug.is_empty() {
        "task".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::NaiveDateTime;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 27).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        date().and_hms_opt(h, m, 0).unwrap()
    }

    fn span(h1: u32, m1: u32, h2: u32, m2: u32) -> Interval {
        Interval::new(at(h1, m1), at(h2, m2)).unwrap()
    }

    fn make_input(tasks: Vec<Task>, blocked: Vec<Interval>) -> PlanInput {
        PlanInput {
            date: date(),
            time_zone: "UTC".to_string(),
            work_window: span(9, 0, 17, 0),
            blocked,
            tasks,
            insights: Vec::new(),
            config: SchedulerConfig::default(),
        }
    }

    #[test]
    fn single_task_takes_first_slot() {
        let input = make_input(
            vec![Task::new("Review project proposal")
                .with_duration(60)
                .with_priority(Priority::High)
                .with_due(at(15, 0))],
            Vec::new(),
        );
        let schedule = build_schedule(&input);

        assert_eq!(schedule.blocks.len(), 1);
        let block = &schedule.blocks[0];
        assert_eq!((block.start, block.end), (at(9, 0), at(10, 0)));
        assert_eq!(block.task_id, "review-project-propo-20251127");
        assert_eq!(block.subtask_index, 1);
        assert!(schedule.unscheduled.is_empty());
    }

    #[test]
    fn long_task_is_split_with_breaks() {
        let input = make_input(vec![Task::new("Long coding session").with_duration(180)], Vec::new());
        let schedule = build_schedule(&input);

        let spans: Vec<_> = schedule.blocks.iter().map(|b| (b.start, b.end, b.subtask_index)).collect();
        assert_eq!(
            spans,
            vec![(at(9, 0), at(10, 30), 1), (at(10, 45), at(12, 15), 2)]
        );
    }

    #[test]
    fn chunks_of_one_task_never_share_a_start() {
        let mut input = make_input(
            vec![Task::new("deep work").with_duration(120)],
            vec![span(11, 0, 17, 0)],
        );
        input.config.preferred_focus_minutes = 60;
        let schedule = build_schedule(&input);

        // 09:00-10:00 plus a break leaves 45 minutes for the second chunk
        assert!(schedule.blocks.is_empty());
        assert_eq!(
            schedule.unscheduled,
            vec![UnscheduledEntry::new("deep work", NO_SUITABLE_SLOT)]
        );
    }

    #[test]
    fn break_pushes_next_chunk_to_later_interval() {
        let mut input = make_input(
            vec![Task::new("deep work").with_duration(120)],
            vec![span(11, 5, 12, 0)],
        );
        input.config.preferred_focus_minutes = 60;
        input.work_window = span(9, 0, 13, 0);
        let schedule = build_schedule(&input);

        // [09:00,11:05) then [12:00,13:00): chunk 1 09:00-10:00, break to 10:15,
        // chunk 2 needs 60 minutes and 10:15-11:05 is only 50, so 12:00-13:00
        let spans: Vec<_> = schedule.blocks.iter().map(|b| (b.start, b.end)).collect();
        assert_eq!(spans, vec![(at(9, 0), at(10, 0)), (at(12, 0), at(13, 0))]);
    }

    #[test]
    fn rejected_task_commits_nothing() {
        let input = make_input(
            vec![
                Task::new("too big").with_duration(480).with_due(at(10, 0)),
                Task::new("small").with_duration(30),
            ],
            vec![span(12, 0, 13, 0)],
        );
        let schedule = build_schedule(&input);

        assert!(schedule.blocks.iter().all(|b| b.task_title == "small"));
        assert_eq!(schedule.blocks[0].start, at(9, 0));
        assert_eq!(schedule.unscheduled.len(), 1);
        assert_eq!(schedule.unscheduled[0].task_title, "too big");
    }

    #[test]
    fn blocks_are_chronological_across_tasks() {
        let input = make_input(
            vec![
                Task::new("second").with_duration(240),
                Task::new("first").with_duration(60).with_due(at(12, 0)),
            ],
            vec![span(12, 0, 13, 0)],
        );
        let schedule = build_schedule(&input);

        for pair in schedule.blocks.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        assert_eq!(schedule.blocks[0].task_title, "first");
    }

    #[test]
    fn duplicate_titles_get_distinct_ids() {
        let input = make_input(
            vec![Task::new("Standup").with_duration(15), Task::new("Standup").with_duration(15)],
            Vec::new(),
        );
        let schedule = build_schedule(&input);
        let ids: Vec<_> = schedule.blocks.iter().map(|b| b.task_id.as_str()).collect();
        assert_eq!(ids, vec!["standup-20251127", "standup-20251127-2"]);
    }

    #[test]
    fn vetoed_slot_moves_task_and_notes_follow() {
        let mut input = make_input(
            vec![Task::new("Run").with_duration(30).with_tags(["outdoor"])],
            vec![span(10, 0, 10, 30)],
        );
        input.insights = vec![
            Insight::new("weather")
                .with_summary("Outdoor air quality is poor")
                .with_impact("Avoid outdoor activity at 09:00"),
        ];
        let schedule = build_schedule(&input);

        let block = &schedule.blocks[0];
        // 09:00 is vetoed, the next interval starts at 10:30
        assert_eq!((block.start, block.end), (at(10, 30), at(11, 0)));
        assert_eq!(block.notes.as_deref(), Some("Outdoor air quality is poor"));
    }

    #[test]
    fn task_beyond_free_time_is_rejected_before_splitting() {
        let mut input = make_input(
            vec![Task::new("endless").with_duration(u32::MAX)],
            vec![span(12, 0, 13, 0)],
        );
        input.config.preferred_focus_minutes = 1;
        let schedule = build_schedule(&input);

        assert!(schedule.blocks.is_empty());
        assert_eq!(
            schedule.unscheduled[0].reason,
            format!(
                "Task requires {} minutes, but only 420 minutes remain free \
                 (largest available slot is 240 minutes)",
                u32::MAX
            )
        );
    }

    #[test]
    fn place_task_leaves_free_time_untouched_on_rejection() {
        let input = make_input(Vec::new(), Vec::new());
        let mut builder = ScheduleBuilder::new(&input);
        let before = builder.free_time().clone();

        let outcome = builder.place_task(&Task::new("huge").with_duration(600));
        assert!(matches!(outcome, TaskOutcome::Rejected(_)));
        assert_eq!(builder.free_time(), &before);

        let outcome = builder.place_task(&Task::new("fits").with_duration(60));
        assert!(matches!(outcome, TaskOutcome::Committed(ref b) if b.len() == 1));
        assert_eq!(builder.free_time().intervals(), &[span(10, 0, 17, 0)]);
    }

    #[test]
    fn slug_rules() {
        assert_eq!(task_slug("Email responses"), "email-responses");
        assert_eq!(task_slug("fix_bug #42!"), "fix-bug-42");
        assert_eq!(task_slug("A very long title that keeps going"), "a-very-long-title-th");
        assert_eq!(task_slug("!!!"), "task");
    }
}
