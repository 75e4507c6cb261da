//! Canonical application state and its mutation operations: each one mutates
//! in memory, persists the touched blobs, recomputes the streak, evaluates
//! achievements on completion edges, and queues display notifications.

use chrono::{Local, Utc};
use log::{error, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::achievements::{self, StateView, ACHIEVEMENTS};
use crate::analytics::{self, insights::generate_insights};
use crate::error::{Error, Result};
use crate::events::{AppEvent, NUDGE_MESSAGES};
use crate::models::{Goal, GoalKind, Stats, Task, TaskCategory, TaskFilter, TaskPriority, Theme};
use crate::storage::Storage;
use crate::timer::{Tick, TimerState};
use crate::view::{BadgeStatus, Dashboard, StatsSummary};

const TASKS_KEY: &str = "tasks";
const GOALS_KEY: &str = "goals";
const STATS_KEY: &str = "stats";
const THEME_KEY: &str = "theme";
const BADGES_KEY: &str = "badges";

fn load_or_default<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    match storage.load(key) {
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("Discarding malformed '{key}' blob: {err}");
                T::default()
            }
        },
        None => T::default(),
    }
}

pub struct StateStore {
    storage: Box<dyn Storage>,
    tasks: Vec<Task>,
    goals: Vec<Goal>,
    stats: Stats,
    // Unlocked achievement ids, in unlock order. Append-only.
    badges: Vec<String>,
    theme: Theme,
    timer: TimerState,
    filter: TaskFilter,
    goal_tab: GoalKind,
    last_id: u64,
    rng: StdRng,
    pending: Vec<AppEvent>,
}

impl StateStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self::with_rng(storage, StdRng::from_entropy())
    }

    pub fn with_rng(storage: Box<dyn Storage>, rng: StdRng) -> Self {
        let tasks: Vec<Task> = load_or_default(storage.as_ref(), TASKS_KEY);
        let goals: Vec<Goal> = load_or_default(storage.as_ref(), GOALS_KEY);
        let stats: Stats = load_or_default(storage.as_ref(), STATS_KEY);
        let badges: Vec<String> = load_or_default(storage.as_ref(), BADGES_KEY);
        let theme: Theme = load_or_default(storage.as_ref(), THEME_KEY);

        let last_id = tasks
            .iter()
            .map(|t| t.id)
            .chain(goals.iter().map(|g| g.id))
            .max()
            .unwrap_or(0);

        let mut store = Self {
            storage,
            tasks,
            goals,
            stats,
            badges,
            theme,
            timer: TimerState::default(),
            filter: TaskFilter::default(),
            goal_tab: GoalKind::default(),
            last_id,
            rng,
            pending: Vec::new(),
        };

        if store.tasks.is_empty() && store.goals.is_empty() {
            store.pending.push(AppEvent::Welcome);
        }
        store.evaluate_achievements();
        store
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(blob) => self.storage.save(key, &blob),
            Err(err) => error!("Failed to encode '{key}' blob: {err}"),
        }
    }

    fn mint_id(&mut self) -> u64 {
        // Millisecond timestamps, bumped past the last issued id so two
        // creations in the same millisecond stay distinct.
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    fn refresh_streak(&mut self) {
        let today = Local::now().date_naive();
        if analytics::advance_streak(&self.tasks, &mut self.stats, today, Utc::now()) {
            self.persist(STATS_KEY, &self.stats);
        }
    }

    fn evaluate_achievements(&mut self) {
        let newly = {
            let view = StateView {
                tasks: &self.tasks,
                goals: &self.goals,
                stats: &self.stats,
            };
            achievements::evaluate(view, &self.badges)
        };
        if newly.is_empty() {
            return;
        }
        for def in newly {
            self.badges.push(def.id.to_string());
            self.pending.push(AppEvent::AchievementUnlocked {
                id: def.id.to_string(),
                name: def.name.to_string(),
            });
        }
        self.persist(BADGES_KEY, &self.badges);
    }

    // ---- Task operations ----

    pub fn add_task(
        &mut self,
        title: &str,
        category: TaskCategory,
        priority: TaskPriority,
    ) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("task title must not be empty"));
        }
        let id = self.mint_id();
        self.tasks
            .insert(0, Task::new(id, title.to_string(), category, priority));
        self.persist(TASKS_KEY, &self.tasks);
        self.refresh_streak();
        self.pending.push(AppEvent::TaskAdded);
        Ok(())
    }

    /// Flips completion. The false→true edge appends a permanent completion
    /// record; the reverse edge removes nothing.
    pub fn toggle_task(&mut self, id: u64) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        task.completed = !task.completed;
        let now_completed = task.completed;
        let category = task.category;

        if now_completed {
            self.stats.record_completion(category, Utc::now());
            self.evaluate_achievements();
            self.pending.push(AppEvent::TaskCompleted);
        }
        self.persist(TASKS_KEY, &self.tasks);
        self.persist(STATS_KEY, &self.stats);
        self.refresh_streak();
    }

    pub fn delete_task(&mut self, id: u64) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.persist(TASKS_KEY, &self.tasks);
            self.refresh_streak();
        }
    }

    // ---- Goal operations ----

    pub fn add_goal(
        &mut self,
        title: &str,
        deadline: Option<chrono::NaiveDate>,
        kind: Option<GoalKind>,
    ) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("goal title must not be empty"));
        }
        let id = self.mint_id();
        let kind = kind.unwrap_or(self.goal_tab);
        self.goals
            .insert(0, Goal::new(id, title.to_string(), deadline, kind));
        self.persist(GOALS_KEY, &self.goals);
        self.pending.push(AppEvent::GoalCreated);
        Ok(())
    }

    pub fn update_goal_progress(&mut self, id: u64, value: i64) {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return;
        };
        goal.set_progress(value);
        let achieved = goal.completed;
        self.persist(GOALS_KEY, &self.goals);
        // Every write that lands on 100 re-announces, including repeats.
        if achieved {
            self.pending.push(AppEvent::GoalAchieved);
            self.evaluate_achievements();
        }
    }

    pub fn delete_goal(&mut self, id: u64) {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        if self.goals.len() != before {
            self.persist(GOALS_KEY, &self.goals);
        }
    }

    // ---- Timer operations ----

    pub fn start_timer(&mut self) -> bool {
        let started = self.timer.start();
        if started {
            self.pending.push(AppEvent::TimerStarted);
        }
        started
    }

    pub fn pause_timer(&mut self) -> bool {
        self.timer.pause()
    }

    pub fn reset_timer(&mut self, minutes: u32) {
        self.timer.reset(minutes);
    }

    pub fn tick_timer(&mut self) -> Tick {
        let outcome = self.timer.tick();
        match outcome {
            Tick::Advanced => {
                self.stats.total_time += 1;
                self.persist(STATS_KEY, &self.stats);
                self.refresh_streak();
            }
            Tick::Completed => {
                self.pending.push(AppEvent::TimerComplete);
                self.evaluate_achievements();
            }
            Tick::Ignored => {}
        }
        outcome
    }

    // ---- Display state ----

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn set_goal_tab(&mut self, tab: GoalKind) {
        self.goal_tab = tab;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.persist(THEME_KEY, &self.theme);
        self.theme
    }

    pub(crate) fn pick_nudge(&mut self) -> Option<&'static str> {
        if self.tasks.is_empty() {
            return None;
        }
        Some(NUDGE_MESSAGES[self.rng.gen_range(0..NUDGE_MESSAGES.len())])
    }

    pub fn take_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn dashboard(&mut self) -> Dashboard {
        self.refresh_streak();

        let today = Local::now().date_naive();
        let completed_tasks = self.tasks.iter().filter(|t| t.completed).count();
        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .cloned()
            .collect();
        let goals: Vec<Goal> = self
            .goals
            .iter()
            .filter(|g| g.kind == self.goal_tab)
            .cloned()
            .collect();
        let summary = StatsSummary {
            total_tasks: self.tasks.len(),
            completed_tasks,
            total_hours: self.stats.total_hours(),
            streak: self.stats.streak,
        };
        let weekly = analytics::weekly_activity(&self.stats.tasks_completed, today);
        let insights = generate_insights(&self.tasks, &self.stats, &mut self.rng);
        let badges = ACHIEVEMENTS
            .iter()
            .map(|def| BadgeStatus {
                id: def.id,
                name: def.name,
                icon: def.icon,
                description: def.description,
                unlocked: self.badges.iter().any(|b| b == def.id),
            })
            .collect();

        Dashboard {
            tasks,
            goals,
            timer: self.timer.clone(),
            theme: self.theme,
            summary,
            weekly,
            insights,
            badges,
        }
    }

    // ---- Accessors ----

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn badges(&self) -> &[String] {
        &self.badges
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn goal_tab(&self) -> GoalKind {
        self.goal_tab
    }
}
