#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Welcome,
    TaskAdded,
    TaskCompleted,
    GoalCreated,
    GoalAchieved,
    TimerStarted,
    TimerComplete,
    AchievementUnlocked { id: String, name: String },
    Nudge { text: String },
}

impl AppEvent {
    // Short human-readable text the UI shows transiently.
    pub fn message(&self) -> String {
        match self {
            AppEvent::Welcome => "Welcome to ProductivityFlow! 🎯 Let's get started!".into(),
            AppEvent::TaskAdded => "Task added successfully! 🎉".into(),
            AppEvent::TaskCompleted => "Great job completing this task! 🌟".into(),
            AppEvent::GoalCreated => "Goal set! Let's make it happen! 💪".into(),
            AppEvent::GoalAchieved => "🎊 Goal achieved! You're amazing!".into(),
            AppEvent::TimerStarted => "Focus time started! 🎯".into(),
            AppEvent::TimerComplete => "⏰ Timer complete! Great focus session!".into(),
            AppEvent::AchievementUnlocked { name, .. } => {
                format!("🏆 Achievement Unlocked: {name}!")
            }
            AppEvent::Nudge { text } => text.clone(),
        }
    }
}

pub const NUDGE_MESSAGES: [&str; 4] = [
    "💪 Keep pushing! You're doing great!",
    "🌟 Every effort counts towards your goals!",
    "🚀 Take a moment to review your progress!",
    "🎯 Focus on one task at a time for best results!",
];

/// Best-effort desktop notification hook, fired on timer completion. The
/// core behaves identically whether or not one is installed.
pub trait DesktopNotifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_display_texts() {
        assert!(AppEvent::TaskAdded.message().contains("Task added"));
        assert!(AppEvent::TimerComplete.message().contains("Timer complete"));
        let unlocked = AppEvent::AchievementUnlocked {
            id: "first-task".into(),
            name: "First Steps".into(),
        };
        assert_eq!(unlocked.message(), "🏆 Achievement Unlocked: First Steps!");
    }
}
