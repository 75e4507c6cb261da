mod goal;
mod stats;
mod task;

pub use goal::{Goal, GoalKind};
pub use stats::{CompletionRecord, Stats};
pub use task::{Task, TaskCategory, TaskFilter, TaskPriority};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
