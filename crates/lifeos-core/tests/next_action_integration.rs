//! Integration tests for the recommendation workflow.
//!
//! Exercises the full path the server and CLI use: persist tasks through
//! the store, materialize a snapshot, and run scoring, selection, and
//! stats over it.

use chrono::{Duration, NaiveDate, NaiveTime};
use lifeos_core::{
    score, select_next_action, Context, EnergyLevel, Priority, Status, TaskDb, TaskDraft,
    TaskKind, TaskStats, TaskUpdate, TimeAnalytics, V2gFields, V2gStats,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn at_hour(hour: u32) -> chrono::NaiveDateTime {
    today().and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
}

fn draft(title: &str, priority: Priority, energy: EnergyLevel) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        context: Context::Avl,
        priority,
        energy_needed: energy,
        ..TaskDraft::default()
    }
}

#[test]
fn full_recommendation_workflow() {
    let db = TaskDb::open_memory().unwrap();

    // A critical PhD task due today and a trivial personal errand.
    let mut thesis = draft("Finish chapter draft", Priority::Critical, EnergyLevel::Medium);
    thesis.context = Context::Phd;
    thesis.due_date = Some(today().format("%Y-%m-%d").to_string());
    db.create_task(&thesis, today()).unwrap();

    let mut errand = draft("Buy stamps", Priority::Medium, EnergyLevel::High);
    errand.context = Context::Personal;
    let errand_id = db.create_task(&errand, today()).unwrap();

    let snapshot = db.list_tasks(false).unwrap();
    let scores: Vec<i64> = snapshot.iter().map(|t| score(t, today())).collect();
    assert!(scores.contains(&576)); // (300 + 180) * 1.2
    assert!(scores.contains(&80)); // 100 * 0.8

    // Morning prefers High energy, so the low-score errand wins while it
    // sits inside the scan window.
    let picked = select_next_action(&snapshot, at_hour(9)).unwrap();
    assert_eq!(picked.id, errand_id);

    // Afternoon prefers Medium energy, which the thesis task matches.
    let picked = select_next_action(&snapshot, at_hour(14)).unwrap();
    assert_eq!(picked.title, "Finish chapter draft");
}

#[test]
fn closing_every_task_removes_the_recommendation() {
    let db = TaskDb::open_memory().unwrap();
    let id = db
        .create_task(&draft("only task", Priority::High, EnergyLevel::Low), today())
        .unwrap();

    let snapshot = db.list_tasks(false).unwrap();
    assert!(select_next_action(&snapshot, at_hour(10)).is_some());

    let update = TaskUpdate {
        status: Some(Status::Done),
        ..TaskUpdate::default()
    };
    db.update_task(id, &update, today()).unwrap();

    let snapshot = db.list_tasks(false).unwrap();
    assert!(snapshot.is_empty());
    assert!(select_next_action(&snapshot, at_hour(10)).is_none());
}

#[test]
fn stats_over_persisted_snapshot() {
    let db = TaskDb::open_memory().unwrap();

    let mut blocked = draft("waiting on vendor", Priority::High, EnergyLevel::Medium);
    blocked.status = Status::Blocked;
    blocked.due_date = Some((today() - Duration::days(2)).format("%Y-%m-%d").to_string());
    db.create_task(&blocked, today()).unwrap();

    let mut request = draft("V2G: Alice - charger rollout", Priority::Medium, EnergyLevel::Medium);
    request.kind = TaskKind::V2gRequest;
    request.v2g = Some(V2gFields {
        requester: "Alice".to_string(),
        source: "Email".to_string(),
        needs_consult: true,
        consult_question: Some("Site B too?".to_string()),
    });
    db.create_task(&request, today()).unwrap();

    let all = db.list_tasks(true).unwrap();
    let stats = TaskStats::compute(&all, today());
    assert_eq!(stats.total_active, 2);
    assert_eq!(stats.blocked, 1);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.v2g_needs_consult, 1);

    let requests = db.list_v2g_requests(false).unwrap();
    let v2g_stats = V2gStats::compute(&requests, today());
    assert_eq!(v2g_stats.total, 1);
    assert_eq!(v2g_stats.needs_consult, 1);
    // created today, so not stale yet
    assert_eq!(v2g_stats.stale, 0);
}

#[test]
fn time_analytics_over_persisted_logs() {
    let db = TaskDb::open_memory().unwrap();
    let task_id = db
        .create_task(&draft("deep work", Priority::High, EnergyLevel::High), today())
        .unwrap();

    db.log_time(
        lifeos_core::LogContext::Avl,
        90,
        Some(task_id),
        None,
        at_hour(9),
    )
    .unwrap();
    db.log_time(lifeos_core::LogContext::Wasting, 30, None, None, at_hour(13))
        .unwrap();

    let logs = db.all_time_logs().unwrap();
    let analytics = TimeAnalytics::compute(&logs, today());
    assert_eq!(analytics.today.avl, 1.5);
    assert_eq!(analytics.today.wasting, 0.5);
    assert_eq!(analytics.today_logs, 2);
}
