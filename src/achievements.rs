use crate::models::{Goal, Stats, Task};

#[derive(Clone, Copy)]
pub struct StateView<'a> {
    pub tasks: &'a [Task],
    pub goals: &'a [Goal],
    pub stats: &'a Stats,
}

pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    predicate: fn(StateView<'_>) -> bool,
}

fn any_task(view: StateView<'_>) -> bool {
    !view.tasks.is_empty()
}

fn ten_completed_tasks(view: StateView<'_>) -> bool {
    view.tasks.iter().filter(|t| t.completed).count() >= 10
}

fn week_long_streak(view: StateView<'_>) -> bool {
    view.stats.streak >= 7
}

fn ten_hours_logged(view: StateView<'_>) -> bool {
    view.stats.total_time >= 36_000
}

fn three_completed_goals(view: StateView<'_>) -> bool {
    view.goals.iter().filter(|g| g.completed).count() >= 3
}

fn one_hour_logged(view: StateView<'_>) -> bool {
    view.stats.total_time >= 3_600
}

// Table order is emission order. Both time thresholds can fire in the same
// pass when a single tick crosses them simultaneously.
pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first-task",
        name: "First Steps",
        icon: "🎯",
        description: "Create your first task",
        predicate: any_task,
    },
    AchievementDef {
        id: "task-master",
        name: "Task Master",
        icon: "⭐",
        description: "Complete 10 tasks",
        predicate: ten_completed_tasks,
    },
    AchievementDef {
        id: "week-warrior",
        name: "Week Warrior",
        icon: "🔥",
        description: "Maintain 7-day streak",
        predicate: week_long_streak,
    },
    AchievementDef {
        id: "time-lord",
        name: "Time Lord",
        icon: "⏰",
        description: "Log 10 hours",
        predicate: ten_hours_logged,
    },
    AchievementDef {
        id: "goal-getter",
        name: "Goal Getter",
        icon: "🎊",
        description: "Achieve 3 goals",
        predicate: three_completed_goals,
    },
    AchievementDef {
        id: "focused",
        name: "Deep Focus",
        icon: "🧠",
        description: "Log 1 hour",
        predicate: one_hour_logged,
    },
];

/// Returns the table entries not yet unlocked whose predicate currently
/// holds, in table order. Idempotent across repeated passes.
pub fn evaluate(view: StateView<'_>, unlocked: &[String]) -> Vec<&'static AchievementDef> {
    ACHIEVEMENTS
        .iter()
        .filter(|def| !unlocked.iter().any(|id| id == def.id))
        .filter(|def| (def.predicate)(view))
        .collect()
}
