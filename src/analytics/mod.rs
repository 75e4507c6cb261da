//! Pure derivations over a state snapshot. Nothing here mutates collections
//! or touches storage; the store calls in with its current state and a date.

pub mod insights;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{CompletionRecord, Stats, Task, TaskCategory};

fn local_day(at: &DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// Share of completed tasks as a whole percentage, rounded to the nearest
/// integer. 0 for an empty collection.
pub fn completion_rate(tasks: &[Task]) -> u32 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    (completed as f64 / tasks.len() as f64 * 100.0).round() as u32
}

/// Completed-task counts per category, ordered by first encounter over the
/// collection (most-recent-first, as tasks are stored).
pub fn category_breakdown(tasks: &[Task]) -> Vec<(TaskCategory, usize)> {
    let mut counts: Vec<(TaskCategory, usize)> = Vec::new();
    for task in tasks.iter().filter(|t| t.completed) {
        match counts.iter_mut().find(|(category, _)| *category == task.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((task.category, 1)),
        }
    }
    counts
}

/// The category with the most completions. Ties break toward the category
/// encountered first in the collection, not alphabetically.
pub fn top_category(tasks: &[Task]) -> Option<(TaskCategory, usize)> {
    let mut best: Option<(TaskCategory, usize)> = None;
    for (category, count) in category_breakdown(tasks) {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((category, count)),
        }
    }
    best
}

/// One day in the trailing activity window.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub completed: usize,
}

/// Completed-task counts for the 7 local calendar days ending at `today`,
/// oldest day first.
pub fn weekly_activity(records: &[CompletionRecord], today: NaiveDate) -> Vec<DayActivity> {
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let completed = records.iter().filter(|r| local_day(&r.date) == date).count();
            DayActivity { date, completed }
        })
        .collect()
}

/// Advances the streak when the task collection holds a completed task that
/// was created `today` (local) and the streak has not already been credited
/// for it. Returns whether `stats` changed (the caller persists).
///
/// Only the creation date is inspected, so completing an older task does not
/// credit the day. A lapsed streak is left untouched until the next
/// qualifying completion; there is no background expiry.
pub fn advance_streak(
    tasks: &[Task],
    stats: &mut Stats,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> bool {
    let qualifies = tasks
        .iter()
        .any(|t| t.completed && local_day(&t.created_at) == today);
    if !qualifies {
        return false;
    }

    let last_active = stats.last_active_date.as_ref().map(local_day);
    if last_active == Some(today) {
        return false;
    }

    let yesterday = today - Duration::days(1);
    stats.streak = if last_active == Some(yesterday) {
        stats.streak + 1
    } else {
        1
    };
    stats.last_active_date = Some(now);
    true
}
