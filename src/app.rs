use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::error::Result;
use crate::events::{AppEvent, DesktopNotifier};
use crate::models::{GoalKind, TaskCategory, TaskFilter, TaskPriority, Theme};
use crate::storage::Storage;
use crate::store::StateStore;
use crate::timer::{Tick, TimerState};
use crate::view::Dashboard;

const EVENT_CHANNEL_CAPACITY: usize = 64;
const TICK_INTERVAL: Duration = Duration::from_secs(1);
const NUDGE_INTERVAL: Duration = Duration::from_secs(30 * 60);

type TaskSlot = Arc<Mutex<Option<JoinHandle<()>>>>;

fn lock_slot(slot: &TaskSlot) -> MutexGuard<'_, Option<JoinHandle<()>>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn abort_slot(slot: &TaskSlot) {
    if let Some(handle) = lock_slot(slot).take() {
        handle.abort();
    }
}

fn drain_events(
    core: &Arc<Mutex<StateStore>>,
    events: &broadcast::Sender<AppEvent>,
    notifier: &Option<Arc<dyn DesktopNotifier>>,
) {
    let drained = {
        let mut store = core.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        store.take_events()
    };
    for event in drained {
        if event == AppEvent::TimerComplete {
            if let Some(notifier) = notifier {
                notifier.notify("Focus Session Complete", "Time for a break!");
            }
        }
        // Nobody listening is fine; events are transient.
        let _ = events.send(event);
    }
}

/// Top-level controller: the state store behind a lock, the cancellable
/// ticker and nudge tasks, and the notification channel. Timer and nudge
/// scheduling spawn onto the ambient tokio runtime.
pub struct App {
    core: Arc<Mutex<StateStore>>,
    events: broadcast::Sender<AppEvent>,
    ticker: TaskSlot,
    nudger: TaskSlot,
    notifier: Option<Arc<dyn DesktopNotifier>>,
}

impl App {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self::with_rng(storage, StdRng::from_entropy())
    }

    pub fn with_rng(storage: Box<dyn Storage>, rng: StdRng) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            core: Arc::new(Mutex::new(StateStore::with_rng(storage, rng))),
            events,
            ticker: Arc::new(Mutex::new(None)),
            nudger: Arc::new(Mutex::new(None)),
            notifier: None,
        }
    }

    // Install before starting the timer; the ticker captures it at spawn.
    pub fn set_notifier(&mut self, notifier: Arc<dyn DesktopNotifier>) {
        self.notifier = Some(notifier);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    fn lock_core(&self) -> MutexGuard<'_, StateStore> {
        self.core.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn flush_events(&self) {
        drain_events(&self.core, &self.events, &self.notifier);
    }

    // ---- Task and goal actions ----

    pub fn add_task(
        &self,
        title: &str,
        category: TaskCategory,
        priority: TaskPriority,
    ) -> Result<()> {
        let result = self.lock_core().add_task(title, category, priority);
        self.flush_events();
        result
    }

    pub fn toggle_task(&self, id: u64) {
        self.lock_core().toggle_task(id);
        self.flush_events();
    }

    pub fn delete_task(&self, id: u64) {
        self.lock_core().delete_task(id);
        self.flush_events();
    }

    pub fn add_goal(
        &self,
        title: &str,
        deadline: Option<chrono::NaiveDate>,
        kind: Option<GoalKind>,
    ) -> Result<()> {
        let result = self.lock_core().add_goal(title, deadline, kind);
        self.flush_events();
        result
    }

    pub fn update_goal_progress(&self, id: u64, value: i64) {
        self.lock_core().update_goal_progress(id, value);
        self.flush_events();
    }

    pub fn delete_goal(&self, id: u64) {
        self.lock_core().delete_goal(id);
        self.flush_events();
    }

    pub fn set_filter(&self, filter: TaskFilter) {
        self.lock_core().set_filter(filter);
    }

    pub fn set_goal_tab(&self, tab: GoalKind) {
        self.lock_core().set_goal_tab(tab);
    }

    pub fn toggle_theme(&self) -> Theme {
        self.lock_core().toggle_theme()
    }

    // ---- Timer control ----

    pub fn start_timer(&self) {
        let started = self.lock_core().start_timer();
        if started {
            self.spawn_ticker();
        }
        self.flush_events();
    }

    pub fn pause_timer(&self) {
        self.lock_core().pause_timer();
        abort_slot(&self.ticker);
    }

    pub fn reset_timer(&self, minutes: u32) {
        self.lock_core().reset_timer(minutes);
        abort_slot(&self.ticker);
    }

    pub fn tick_timer(&self) -> Tick {
        let outcome = self.lock_core().tick_timer();
        self.flush_events();
        outcome
    }

    pub fn timer_state(&self) -> TimerState {
        self.lock_core().timer().clone()
    }

    fn spawn_ticker(&self) {
        let mut slot = lock_slot(&self.ticker);
        if let Some(handle) = slot.take() {
            handle.abort();
        }

        let core = Arc::clone(&self.core);
        let events = self.events.clone();
        let notifier = self.notifier.clone();
        let handle = tokio::spawn(async move {
            // First tick lands one full second after start.
            let mut interval = time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
            loop {
                interval.tick().await;
                let outcome = {
                    let mut store = core.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                    store.tick_timer()
                };
                drain_events(&core, &events, &notifier);
                match outcome {
                    Tick::Advanced => {}
                    // Completion stops the run; a pause elsewhere makes
                    // further ticks pointless.
                    Tick::Completed | Tick::Ignored => break,
                }
            }
        });
        *slot = Some(handle);
    }

    // ---- Nudges ----

    pub fn start_nudges(&self) {
        let mut slot = lock_slot(&self.nudger);
        if let Some(handle) = slot.take() {
            handle.abort();
        }

        let core = Arc::clone(&self.core);
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + NUDGE_INTERVAL, NUDGE_INTERVAL);
            loop {
                interval.tick().await;
                let nudge = {
                    let mut store = core.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                    store.pick_nudge()
                };
                if let Some(text) = nudge {
                    let _ = events.send(AppEvent::Nudge { text: text.to_string() });
                }
            }
        });
        *slot = Some(handle);
    }

    pub fn stop_nudges(&self) {
        abort_slot(&self.nudger);
    }

    // ---- Display ----

    pub fn dashboard(&self) -> Dashboard {
        self.lock_core().dashboard()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        abort_slot(&self.ticker);
        abort_slot(&self.nudger);
    }
}
