//! End-to-end flows through the public `App` surface with fake storage.

use prodflow::models::{GoalKind, TaskCategory, TaskFilter, TaskPriority, Theme};
use prodflow::{App, AppEvent, Error, JsonFileStorage, MemoryStorage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::broadcast;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn seeded_app() -> App {
    init_logs();
    App::with_rng(Box::new(MemoryStorage::new()), StdRng::seed_from_u64(7))
}

fn drain(rx: &mut broadcast::Receiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn add_task(app: &App, title: &str) -> u64 {
    app.add_task(title, TaskCategory::Work, TaskPriority::Medium)
        .unwrap();
    app.dashboard().tasks[0].id
}

#[test]
fn welcome_event_reaches_the_first_subscriber() {
    let app = seeded_app();
    let mut rx = app.subscribe();
    app.flush_events();

    assert_eq!(drain(&mut rx), vec![AppEvent::Welcome]);
}

#[test]
fn task_lifecycle_emits_in_order() {
    let app = seeded_app();
    app.flush_events(); // discard the startup welcome
    let mut rx = app.subscribe();

    let id = add_task(&app, "write the report");
    app.toggle_task(id);

    let events = drain(&mut rx);
    assert_eq!(
        events,
        vec![
            AppEvent::TaskAdded,
            AppEvent::AchievementUnlocked {
                id: "first-task".into(),
                name: "First Steps".into(),
            },
            AppEvent::TaskCompleted,
        ]
    );
}

#[test]
fn rejected_titles_change_nothing() {
    let app = seeded_app();
    let err = app
        .add_task("  \t ", TaskCategory::Personal, TaskPriority::Low)
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(app.dashboard().summary.total_tasks, 0);
}

#[test]
fn ten_completions_earn_task_master_but_not_goal_getter() {
    let app = seeded_app();
    app.flush_events();
    let mut rx = app.subscribe();

    for i in 0..10 {
        let id = add_task(&app, &format!("task {i}"));
        app.toggle_task(id);
    }

    let unlocked: Vec<String> = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            AppEvent::AchievementUnlocked { id, .. } => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(unlocked, vec!["first-task".to_string(), "task-master".to_string()]);

    let dashboard = app.dashboard();
    let badge = |id: &str| dashboard.badges.iter().find(|b| b.id == id).unwrap();
    assert!(badge("first-task").unlocked);
    assert!(badge("task-master").unlocked);
    assert!(!badge("goal-getter").unlocked);
}

#[test]
fn repeated_full_progress_re_announces_the_goal() {
    let app = seeded_app();
    app.add_goal("finish the draft", None, None).unwrap();
    let id = app.dashboard().goals[0].id;
    app.flush_events();
    let mut rx = app.subscribe();

    app.update_goal_progress(id, 100);
    app.update_goal_progress(id, 130);

    let achieved = drain(&mut rx)
        .into_iter()
        .filter(|e| *e == AppEvent::GoalAchieved)
        .count();
    assert_eq!(achieved, 2);
    assert_eq!(app.dashboard().goals[0].progress, 100);
}

#[test]
fn filter_and_tab_shape_the_dashboard() {
    let app = seeded_app();
    let done = add_task(&app, "done");
    add_task(&app, "open");
    app.toggle_task(done);
    app.add_goal("this week", None, Some(GoalKind::ShortTerm)).unwrap();
    app.add_goal("this year", None, Some(GoalKind::LongTerm)).unwrap();

    app.set_filter(TaskFilter::Completed);
    app.set_goal_tab(GoalKind::LongTerm);
    let dashboard = app.dashboard();

    assert_eq!(dashboard.tasks.len(), 1);
    assert_eq!(dashboard.tasks[0].title, "done");
    assert_eq!(dashboard.goals.len(), 1);
    assert_eq!(dashboard.goals[0].title, "this year");
    assert_eq!(dashboard.summary.total_tasks, 2);
    assert_eq!(dashboard.summary.completed_tasks, 1);
}

#[test]
fn empty_dashboard_leads_with_the_welcome_insight() {
    let app = seeded_app();
    let dashboard = app.dashboard();
    assert_eq!(dashboard.insights.len(), 1);
    assert_eq!(dashboard.insights[0].icon, "👋");
}

#[test]
fn same_seed_means_same_insights() {
    let first = App::with_rng(Box::new(MemoryStorage::new()), StdRng::seed_from_u64(99));
    let second = App::with_rng(Box::new(MemoryStorage::new()), StdRng::seed_from_u64(99));
    add_task(&first, "only task");
    add_task(&second, "only task");

    assert_eq!(first.dashboard().insights, second.dashboard().insights);
}

#[test]
fn theme_toggle_round_trips_through_storage() {
    init_logs();
    let storage = MemoryStorage::new();
    {
        let app = App::with_rng(Box::new(storage.clone()), StdRng::seed_from_u64(7));
        assert_eq!(app.toggle_theme(), Theme::Dark);
    }
    let app = App::with_rng(Box::new(storage), StdRng::seed_from_u64(7));
    assert_eq!(app.dashboard().theme, Theme::Dark);
}

#[test]
fn sessions_survive_a_restart_on_disk() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();

    {
        let app = App::new(Box::new(
            JsonFileStorage::new(dir.path().to_path_buf()).unwrap(),
        ));
        let id = add_task(&app, "persisted");
        app.toggle_task(id);
        app.add_goal("carry me over", None, None).unwrap();
    }

    let app = App::new(Box::new(
        JsonFileStorage::new(dir.path().to_path_buf()).unwrap(),
    ));
    let dashboard = app.dashboard();
    assert_eq!(dashboard.summary.total_tasks, 1);
    assert_eq!(dashboard.summary.completed_tasks, 1);
    assert_eq!(dashboard.goals.len(), 1);
    assert!(dashboard.badges.iter().any(|b| b.id == "first-task" && b.unlocked));
    // The startup pass must not re-announce badges unlocked last session.
    let mut rx = app.subscribe();
    app.flush_events();
    assert!(drain(&mut rx)
        .iter()
        .all(|e| !matches!(e, AppEvent::AchievementUnlocked { .. })));
}

/// Storage that loses every write and has nothing to load.
struct BrokenStorage;

impl prodflow::Storage for BrokenStorage {
    fn load(&self, _key: &str) -> Option<serde_json::Value> {
        None
    }

    fn save(&self, _key: &str, _value: &serde_json::Value) {}
}

#[test]
fn the_core_runs_fine_with_no_persistence_at_all() {
    init_logs();
    let app = App::with_rng(Box::new(BrokenStorage), StdRng::seed_from_u64(7));
    let id = add_task(&app, "ephemeral but functional");
    app.toggle_task(id);

    let dashboard = app.dashboard();
    assert_eq!(dashboard.summary.completed_tasks, 1);
    assert!(dashboard.badges.iter().any(|b| b.id == "first-task" && b.unlocked));
}

#[test]
fn deleting_never_rewrites_history() {
    let app = seeded_app();
    let id = add_task(&app, "ephemeral");
    app.toggle_task(id);
    app.delete_task(id);

    let dashboard = app.dashboard();
    assert_eq!(dashboard.summary.total_tasks, 0);
    // Today's completion still shows in the weekly histogram.
    assert_eq!(dashboard.weekly[6].completed, 1);
}
