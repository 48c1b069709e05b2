//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use lifeos_core::{
    score, select_next_action, v2g_title, Context, LogContext, Priority, Status, Task, TaskDb,
    TaskDraft, TaskKind, TaskStats, TaskUpdate, TimeAnalytics, V2gFields, V2gStats,
};

/// Shared application state.
pub struct AppState {
    pub db: Mutex<TaskDb>,
}

pub type SharedState = Arc<AppState>;

type AppError = (StatusCode, String);

fn internal(err: impl std::fmt::Display) -> AppError {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

fn not_found(id: i64) -> AppError {
    (StatusCode::NOT_FOUND, format!("no task with id {id}"))
}

/// Build the API router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/tasks", get(get_tasks).post(create_task))
        .route("/api/tasks/:id", put(update_task).delete(delete_task))
        .route(
            "/api/v2g/requests",
            get(get_v2g_requests).post(create_v2g_request),
        )
        .route(
            "/api/v2g/requests/:id",
            put(update_v2g_request).delete(delete_v2g_request),
        )
        .route("/api/next-action", get(get_next_action))
        .route("/api/time-log", post(log_time))
        .route("/api/time-analytics", get(get_time_analytics))
        .route("/api/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// A task echoed back with its computed score attached for client-side
/// display ordering. The score formula is the committed contract; the
/// attachment is presentation only.
#[derive(serde::Serialize)]
struct ScoredTask {
    #[serde(flatten)]
    task: Task,
    score: i64,
}

// === Tasks ===

async fn get_tasks(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let now = Local::now().naive_local();
    let db = state.db.lock().await;
    let active = db.list_tasks(false).map_err(internal)?;
    let all = db.list_tasks(true).map_err(internal)?;
    let logs = db.all_time_logs().map_err(internal)?;
    drop(db);

    let stats = TaskStats::compute(&all, now.date());
    let next_action = select_next_action(&active, now).cloned();
    let time_analytics = TimeAnalytics::compute(&logs, now.date());
    let tasks: Vec<ScoredTask> = active
        .into_iter()
        .map(|task| ScoredTask {
            score: score(&task, now.date()),
            task,
        })
        .collect();

    Ok(Json(json!({
        "tasks": tasks,
        "stats": stats,
        "next_action": next_action,
        "time_analytics": time_analytics,
    })))
}

async fn create_task(
    State(state): State<SharedState>,
    Json(draft): Json<TaskDraft>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();
    let db = state.db.lock().await;
    let id = db.create_task(&draft, today).map_err(internal)?;
    Ok(Json(json!({ "success": true, "id": id })))
}

async fn update_task(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(update): Json<TaskUpdate>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();
    let db = state.db.lock().await;
    let success = db.update_task(id, &update, today).map_err(internal)?;
    Ok(Json(json!({ "success": success })))
}

async fn delete_task(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let db = state.db.lock().await;
    let success = db.delete_task(id).map_err(internal)?;
    Ok(Json(json!({ "success": success })))
}

// === V2G requests ===

fn default_requester() -> String {
    "Unknown".to_string()
}

fn default_summary() -> String {
    "Request".to_string()
}

fn default_source() -> String {
    "Email".to_string()
}

/// Creation payload for a V2G request; context is always avl and the
/// title is generated from requester and summary.
#[derive(Deserialize)]
struct V2gRequestDraft {
    #[serde(default = "default_requester")]
    requester: String,
    #[serde(default = "default_summary")]
    request_summary: String,
    #[serde(default = "default_source")]
    source: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    target_date: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    needs_consult: bool,
    #[serde(default)]
    consult_question: Option<String>,
}

/// Update payload for a V2G request, mapped onto the task columns.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct V2gRequestUpdate {
    #[serde(default)]
    request_summary: Option<String>,
    #[serde(default)]
    requester: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    status: Option<Status>,
    #[serde(default)]
    target_date: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    needs_consult: Option<bool>,
    #[serde(default)]
    consult_question: Option<String>,
}

async fn get_v2g_requests(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();
    let db = state.db.lock().await;
    let requests = db.list_v2g_requests(false).map_err(internal)?;
    drop(db);

    let stats = V2gStats::compute(&requests, today);
    Ok(Json(json!({ "requests": requests, "stats": stats })))
}

async fn create_v2g_request(
    State(state): State<SharedState>,
    Json(req): Json<V2gRequestDraft>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();
    let draft = TaskDraft {
        title: v2g_title(&req.requester, &req.request_summary),
        context: Context::Avl,
        kind: TaskKind::V2gRequest,
        priority: req.priority,
        status: req.status,
        due_date: req.target_date,
        notes: req.notes,
        v2g: Some(V2gFields {
            requester: req.requester,
            source: req.source,
            needs_consult: req.needs_consult,
            consult_question: req.consult_question,
        }),
        ..TaskDraft::default()
    };

    let db = state.db.lock().await;
    let id = db.create_task(&draft, today).map_err(internal)?;
    Ok(Json(json!({ "success": true, "id": id })))
}

async fn update_v2g_request(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<V2gRequestUpdate>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();
    let db = state.db.lock().await;

    // A new summary regenerates the title against the current (or
    // updated) requester.
    let title = match &req.request_summary {
        Some(summary) => {
            let existing = db.get_task(id).map_err(internal)?.ok_or_else(|| not_found(id))?;
            let requester = req
                .requester
                .clone()
                .or_else(|| existing.v2g.map(|v| v.requester))
                .unwrap_or_else(default_requester);
            Some(v2g_title(&requester, summary))
        }
        None => None,
    };

    let update = TaskUpdate {
        title,
        priority: req.priority,
        status: req.status,
        due_date: req.target_date,
        notes: req.notes,
        requester: req.requester,
        source: req.source,
        needs_consult: req.needs_consult,
        consult_question: req.consult_question,
        ..TaskUpdate::default()
    };
    let success = db.update_task(id, &update, today).map_err(internal)?;
    Ok(Json(json!({ "success": success })))
}

async fn delete_v2g_request(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let db = state.db.lock().await;
    let success = db.delete_task(id).map_err(internal)?;
    Ok(Json(json!({ "success": success })))
}

// === Next action ===

async fn get_next_action(State(state): State<SharedState>) -> Result<Json<Option<Task>>, AppError> {
    let now = Local::now().naive_local();
    let db = state.db.lock().await;
    let tasks = db.list_tasks(false).map_err(internal)?;
    drop(db);

    Ok(Json(select_next_action(&tasks, now).cloned()))
}

// === Time tracking ===

fn default_duration() -> i64 {
    15
}

#[derive(Deserialize)]
struct TimeLogDraft {
    context: LogContext,
    #[serde(default = "default_duration")]
    duration_minutes: i64,
    #[serde(default)]
    task_id: Option<i64>,
    #[serde(default)]
    notes: Option<String>,
}

async fn log_time(
    State(state): State<SharedState>,
    Json(draft): Json<TimeLogDraft>,
) -> Result<Json<Value>, AppError> {
    let now = Local::now().naive_local();
    let db = state.db.lock().await;
    let id = db
        .log_time(
            draft.context,
            draft.duration_minutes,
            draft.task_id,
            draft.notes.as_deref(),
            now,
        )
        .map_err(internal)?;
    Ok(Json(json!({ "success": true, "id": id })))
}

async fn get_time_analytics(State(state): State<SharedState>) -> Result<Json<TimeAnalytics>, AppError> {
    let today = Local::now().date_naive();
    let db = state.db.lock().await;
    let logs = db.all_time_logs().map_err(internal)?;
    drop(db);

    Ok(Json(TimeAnalytics::compute(&logs, today)))
}

// === Statistics ===

async fn get_stats(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();
    let db = state.db.lock().await;
    let tasks = db.list_tasks(true).map_err(internal)?;
    let logs = db.all_time_logs().map_err(internal)?;
    drop(db);

    Ok(Json(json!({
        "tasks": TaskStats::compute(&tasks, today),
        "time": TimeAnalytics::compute(&logs, today),
    })))
}
