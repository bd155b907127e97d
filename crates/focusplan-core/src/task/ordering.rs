//! Deterministic attempt order for tasks.

use std::cmp::Ordering;

use super::Task;

/// Compare two tasks by due date (absent = latest), then priority rank.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    let by_due = match (&a.due_date, &b.due_date) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_due.then_with(|| a.priority.rank().cmp(&b.priority.rank()))
}

/// Order tasks for placement. Ties keep their input order.
pub fn order_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    // `sort_by` is stable
    ordered.sort_by(|a, b| compare_tasks(a, b));
    ordered
}
