use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TaskCategory;

/// Appended when a task flips to completed; never removed, even if the task
/// is later un-completed or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub date: DateTime<Utc>,
    pub category: TaskCategory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_time: u64,
    pub last_active_date: Option<DateTime<Utc>>,
    // Decays lazily: only the next qualifying completion after a gap resets
    // it, never a background check.
    pub streak: u32,
    pub tasks_completed: Vec<CompletionRecord>,
}

impl Stats {
    pub fn record_completion(&mut self, category: TaskCategory, at: DateTime<Utc>) {
        self.tasks_completed.push(CompletionRecord { date: at, category });
    }

    pub fn total_hours(&self) -> u64 {
        self.total_time / 3600
    }
}
