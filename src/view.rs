use serde::Serialize;

use crate::analytics::insights::Insight;
use crate::analytics::DayActivity;
use crate::models::{Goal, Task, Theme};
use crate::timer::TimerState;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub total_hours: u64,
    pub streak: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

/// Everything the display layer needs to render one frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub tasks: Vec<Task>,
    pub goals: Vec<Goal>,
    pub timer: TimerState,
    pub theme: Theme,
    pub summary: StatsSummary,
    pub weekly: Vec<DayActivity>,
    pub insights: Vec<Insight>,
    pub badges: Vec<BadgeStatus>,
}
