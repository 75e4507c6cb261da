//! Rule-based insight messages, rebuilt from scratch on every request.

use rand::Rng;
use serde::Serialize;

use super::{completion_rate, top_category};
use crate::models::{Stats, Task};

const MAX_INSIGHTS: usize = 4;
const MIN_BEFORE_FILLER: usize = 3;

const MOTIVATIONAL: [(&str, &str); 4] = [
    ("🚀", "Every small step forward is progress. You're doing great!"),
    ("💡", "Break large tasks into smaller chunks for better results."),
    ("🎯", "Focus on high-priority tasks during your peak energy hours."),
    ("🌱", "Growth happens outside your comfort zone. Challenge yourself!"),
];

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Insight {
    pub icon: String,
    pub text: String,
}

impl Insight {
    fn new(icon: &str, text: impl Into<String>) -> Self {
        Self {
            icon: icon.to_string(),
            text: text.into(),
        }
    }
}

/// Builds the ordered insight list, capped at four entries. The RNG only
/// drives the optional filler pick, so callers with a seeded RNG get fully
/// deterministic output.
pub fn generate_insights<R: Rng>(tasks: &[Task], stats: &Stats, rng: &mut R) -> Vec<Insight> {
    if tasks.is_empty() {
        return vec![Insight::new(
            "👋",
            "Welcome! Start by adding your first task to begin your productivity journey.",
        )];
    }

    let mut insights = Vec::new();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let active = tasks.len() - completed;

    let rate = completion_rate(tasks);
    if rate > 70 {
        insights.push(Insight::new(
            "🌟",
            format!("Amazing! You've completed {rate}% of your tasks. Keep up the excellent work!"),
        ));
    } else if rate > 40 {
        insights.push(Insight::new(
            "💪",
            format!("Good progress! {rate}% completion rate. You're building momentum!"),
        ));
    } else if active > 5 {
        insights.push(Insight::new(
            "🎯",
            "You have many active tasks. Focus on completing a few high-priority items first!",
        ));
    }

    if completed > 3 {
        if let Some((category, _)) = top_category(tasks) {
            insights.push(Insight::new(
                "📊",
                format!(
                    "You're most productive in {} tasks. Consider scheduling more of what works!",
                    category.as_str()
                ),
            ));
        }
    }

    let hours = stats.total_hours();
    if hours > 10 {
        insights.push(Insight::new(
            "⏱️",
            format!("You've logged {hours} hours of focused work. That's dedication!"),
        ));
    }

    if stats.streak >= 7 {
        insights.push(Insight::new(
            "🔥",
            format!("{} day streak! You're on fire! Consistency is key to success.", stats.streak),
        ));
    } else if stats.streak >= 3 {
        insights.push(Insight::new(
            "✨",
            format!("{} days in a row! Keep the momentum going!", stats.streak),
        ));
    }

    if insights.len() < MIN_BEFORE_FILLER {
        let (icon, text) = MOTIVATIONAL[rng.gen_range(0..MOTIVATIONAL.len())];
        insights.push(Insight::new(icon, text));
    }

    insights.truncate(MAX_INSIGHTS);
    insights
}
