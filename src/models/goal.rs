use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GoalKind {
    #[default]
    ShortTerm,
    LongTerm,
}

impl GoalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalKind::ShortTerm => "short-term",
            GoalKind::LongTerm => "long-term",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: u64,
    pub title: String,
    pub deadline: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: GoalKind,
    pub progress: u8,
    // True iff progress == 100; rederived on every write, never set
    // independently.
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(id: u64, title: String, deadline: Option<NaiveDate>, kind: GoalKind) -> Self {
        Self {
            id,
            title,
            deadline,
            kind,
            progress: 0,
            completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn set_progress(&mut self, value: i64) {
        self.progress = value.clamp(0, 100) as u8;
        self.completed = self.progress == 100;
    }
}
