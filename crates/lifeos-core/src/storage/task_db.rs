//! SQLite-based storage for tasks, time logs, and settings.
//!
//! One connection, schema created on open. Enum fields are stored as the
//! same display strings the original dashboard used, so an existing
//! `lifeos.db` keeps working.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, ToSql};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::DatabaseError;
use crate::task::{
    Context, EnergyLevel, Priority, Status, Task, TaskDraft, TaskKind, TaskUpdate, V2gFields,
};
use crate::timelog::{LogContext, TimeLog};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TASK_COLUMNS: &str = "id, type, created_date, title, context, priority, status, due_date, \
     energy_needed, estimated_time, project, notes, completed_date, last_update, \
     v2g_requester, v2g_source, v2g_needs_consult, v2g_consult_question";

// === Enum <-> TEXT helpers ===

fn parse_priority(s: &str) -> Priority {
    match s {
        "Low" => Priority::Low,
        "High" => Priority::High,
        "Critical" => Priority::Critical,
        "Urgent" => Priority::Urgent,
        _ => Priority::Medium,
    }
}

fn format_priority(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
        Priority::Critical => "Critical",
        Priority::Urgent => "Urgent",
    }
}

fn parse_context(s: &str) -> Context {
    match s {
        "phd" => Context::Phd,
        "avl" => Context::Avl,
        "vitasana" => Context::Vitasana,
        _ => Context::Personal,
    }
}

fn format_context(context: Context) -> &'static str {
    match context {
        Context::Phd => "phd",
        Context::Avl => "avl",
        Context::Vitasana => "vitasana",
        Context::Personal => "personal",
    }
}

fn parse_status(s: &str) -> Status {
    match s {
        "In Progress" => Status::InProgress,
        "Blocked" => Status::Blocked,
        "Waiting" => Status::Waiting,
        "Done" => Status::Done,
        "Archived" => Status::Archived,
        _ => Status::ToDo,
    }
}

fn format_status(status: Status) -> &'static str {
    match status {
        Status::ToDo => "To Do",
        Status::InProgress => "In Progress",
        Status::Blocked => "Blocked",
        Status::Waiting => "Waiting",
        Status::Done => "Done",
        Status::Archived => "Archived",
    }
}

fn parse_energy(s: Option<&str>) -> EnergyLevel {
    match s {
        Some("Low") => EnergyLevel::Low,
        Some("High") => EnergyLevel::High,
        _ => EnergyLevel::Medium,
    }
}

fn format_energy(energy: EnergyLevel) -> &'static str {
    match energy {
        EnergyLevel::Low => "Low",
        EnergyLevel::Medium => "Medium",
        EnergyLevel::High => "High",
    }
}

fn parse_kind(s: &str) -> TaskKind {
    match s {
        "v2g_request" => TaskKind::V2gRequest,
        _ => TaskKind::General,
    }
}

fn format_kind(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::General => "general",
        TaskKind::V2gRequest => "v2g_request",
    }
}

fn format_consult(needs_consult: bool) -> &'static str {
    if needs_consult {
        "YES"
    } else {
        "NO"
    }
}

fn parse_log_context(s: &str) -> LogContext {
    match s {
        "phd" => LogContext::Phd,
        "avl" => LogContext::Avl,
        "vitasana" => LogContext::Vitasana,
        "personal" => LogContext::Personal,
        _ => LogContext::Wasting,
    }
}

fn format_log_context(context: LogContext) -> &'static str {
    match context {
        LogContext::Phd => "phd",
        LogContext::Avl => "avl",
        LogContext::Vitasana => "vitasana",
        LogContext::Personal => "personal",
        LogContext::Wasting => "wasting",
    }
}

/// Lenient date column parse; legacy rows may hold junk.
fn parse_date_opt(s: Option<String>) -> Option<NaiveDate> {
    s.and_then(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).ok())
}

fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
    let kind = parse_kind(&row.get::<_, String>(1)?);
    let created_raw: String = row.get(2)?;
    let created_date = NaiveDate::parse_from_str(&created_raw, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let v2g = match kind {
        TaskKind::General => None,
        TaskKind::V2gRequest => Some(V2gFields {
            requester: row.get::<_, Option<String>>(14)?.unwrap_or_default(),
            source: row.get::<_, Option<String>>(15)?.unwrap_or_default(),
            needs_consult: row.get::<_, Option<String>>(16)?.as_deref() == Some("YES"),
            consult_question: row.get(17)?,
        }),
    };

    Ok(Task {
        id: row.get(0)?,
        kind,
        created_date,
        title: row.get(3)?,
        context: parse_context(&row.get::<_, String>(4)?),
        priority: parse_priority(&row.get::<_, String>(5)?),
        status: parse_status(&row.get::<_, String>(6)?),
        due_date: row.get(7)?,
        energy_needed: parse_energy(row.get::<_, Option<String>>(8)?.as_deref()),
        estimated_time: row
            .get::<_, Option<String>>(9)?
            .unwrap_or_else(|| "1hour".to_string()),
        project: row.get(10)?,
        notes: row.get(11)?,
        completed_date: parse_date_opt(row.get(12)?),
        last_update: parse_date_opt(row.get(13)?),
        v2g,
    })
}

fn row_to_time_log(row: &rusqlite::Row) -> Result<TimeLog, rusqlite::Error> {
    let ts_raw: String = row.get(1)?;
    let timestamp = NaiveDateTime::parse_from_str(&ts_raw, TIMESTAMP_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(TimeLog {
        id: row.get(0)?,
        timestamp,
        context: parse_log_context(&row.get::<_, String>(2)?),
        duration_minutes: row.get(3)?,
        task_id: row.get(4)?,
        notes: row.get(5)?,
    })
}

/// SQLite database holding tasks, time logs, and the settings kv store.
pub struct TaskDb {
    conn: Connection,
}

impl TaskDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at the configured data directory.
    pub fn open() -> Result<Self, crate::error::CoreError> {
        let path = data_dir()?.join("lifeos.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id            INTEGER PRIMARY KEY AUTOINCREMENT,
                    type          TEXT NOT NULL DEFAULT 'general',
                    created_date  TEXT NOT NULL,
                    title         TEXT NOT NULL,
                    context       TEXT NOT NULL,
                    priority      TEXT NOT NULL DEFAULT 'Medium',
                    status        TEXT NOT NULL DEFAULT 'To Do',
                    due_date      TEXT,
                    energy_needed TEXT DEFAULT 'Medium',
                    estimated_time TEXT DEFAULT '1hour',
                    project       TEXT,
                    notes         TEXT,
                    completed_date TEXT,
                    last_update   TEXT,
                    v2g_requester TEXT,
                    v2g_source    TEXT,
                    v2g_needs_consult TEXT,
                    v2g_consult_question TEXT
                );

                CREATE TABLE IF NOT EXISTS time_logs (
                    id               INTEGER PRIMARY KEY AUTOINCREMENT,
                    timestamp        TEXT NOT NULL,
                    context          TEXT NOT NULL,
                    duration_minutes INTEGER NOT NULL DEFAULT 15,
                    task_id          INTEGER,
                    notes            TEXT,
                    FOREIGN KEY (task_id) REFERENCES tasks(id) ON DELETE SET NULL
                );

                CREATE TABLE IF NOT EXISTS settings (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                -- Indexes for common query patterns
                CREATE INDEX IF NOT EXISTS idx_tasks_context ON tasks(context);
                CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
                CREATE INDEX IF NOT EXISTS idx_tasks_type ON tasks(type);
                CREATE INDEX IF NOT EXISTS idx_time_logs_timestamp ON time_logs(timestamp);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    // === Tasks ===

    /// Create a task; `today` becomes its creation and last-update date.
    pub fn create_task(&self, draft: &TaskDraft, today: NaiveDate) -> Result<i64, DatabaseError> {
        let today_str = today.format(DATE_FORMAT).to_string();
        let v2g = draft.v2g.as_ref();
        self.conn.execute(
            "INSERT INTO tasks (
                type, created_date, title, context, priority, status,
                due_date, energy_needed, estimated_time, project, notes,
                last_update, v2g_requester, v2g_source, v2g_needs_consult,
                v2g_consult_question
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                format_kind(draft.kind),
                today_str,
                draft.title,
                format_context(draft.context),
                format_priority(draft.priority),
                format_status(draft.status),
                draft.due_date,
                format_energy(draft.energy_needed),
                draft.estimated_time,
                draft.project,
                draft.notes,
                today_str,
                v2g.map(|v| v.requester.clone()),
                v2g.map(|v| v.source.clone()),
                v2g.map(|v| format_consult(v.needs_consult)),
                v2g.and_then(|v| v.consult_question.clone()),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List tasks newest first. `include_closed` keeps Done/Archived rows.
    pub fn list_tasks(&self, include_closed: bool) -> Result<Vec<Task>, DatabaseError> {
        let sql = if include_closed {
            format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_date DESC, id DESC")
        } else {
            format!(
                "SELECT {TASK_COLUMNS} FROM tasks \
                 WHERE status NOT IN ('Done', 'Archived') \
                 ORDER BY created_date DESC, id DESC"
            )
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Fetch a single task.
    pub fn get_task(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
        let task = self
            .conn
            .query_row(&sql, params![id], row_to_task)
            .optional()?;
        Ok(task)
    }

    /// Apply an enumerated field update.
    ///
    /// `last_update` is always refreshed; `completed_date` is set
    /// automatically when the status changes to Done and the caller did
    /// not supply one. Returns whether a row was touched.
    pub fn update_task(
        &self,
        id: i64,
        update: &TaskUpdate,
        today: NaiveDate,
    ) -> Result<bool, DatabaseError> {
        if update.is_empty() {
            return Ok(false);
        }

        let mut sets: Vec<&'static str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(title) = &update.title {
            sets.push("title = ?");
            values.push(Box::new(title.clone()));
        }
        if let Some(context) = update.context {
            sets.push("context = ?");
            values.push(Box::new(format_context(context)));
        }
        if let Some(priority) = update.priority {
            sets.push("priority = ?");
            values.push(Box::new(format_priority(priority)));
        }
        if let Some(status) = update.status {
            sets.push("status = ?");
            values.push(Box::new(format_status(status)));
        }
        if let Some(due_date) = &update.due_date {
            sets.push("due_date = ?");
            values.push(Box::new(due_date.clone()));
        }
        if let Some(energy) = update.energy_needed {
            sets.push("energy_needed = ?");
            values.push(Box::new(format_energy(energy)));
        }
        if let Some(estimated_time) = &update.estimated_time {
            sets.push("estimated_time = ?");
            values.push(Box::new(estimated_time.clone()));
        }
        if let Some(project) = &update.project {
            sets.push("project = ?");
            values.push(Box::new(project.clone()));
        }
        if let Some(notes) = &update.notes {
            sets.push("notes = ?");
            values.push(Box::new(notes.clone()));
        }
        if let Some(completed_date) = update.completed_date {
            sets.push("completed_date = ?");
            values.push(Box::new(completed_date.format(DATE_FORMAT).to_string()));
        } else if update.status == Some(Status::Done) {
            sets.push("completed_date = ?");
            values.push(Box::new(today.format(DATE_FORMAT).to_string()));
        }
        if let Some(requester) = &update.requester {
            sets.push("v2g_requester = ?");
            values.push(Box::new(requester.clone()));
        }
        if let Some(source) = &update.source {
            sets.push("v2g_source = ?");
            values.push(Box::new(source.clone()));
        }
        if let Some(needs_consult) = update.needs_consult {
            sets.push("v2g_needs_consult = ?");
            values.push(Box::new(format_consult(needs_consult)));
        }
        if let Some(question) = &update.consult_question {
            sets.push("v2g_consult_question = ?");
            values.push(Box::new(question.clone()));
        }

        sets.push("last_update = ?");
        values.push(Box::new(today.format(DATE_FORMAT).to_string()));
        values.push(Box::new(id));

        let sql = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));
        let changed = self
            .conn
            .execute(&sql, params_from_iter(values.iter().map(|v| &**v)))?;
        Ok(changed > 0)
    }

    /// Delete a task. Returns whether a row existed.
    pub fn delete_task(&self, id: i64) -> Result<bool, DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// List V2G requests newest first.
    pub fn list_v2g_requests(&self, include_closed: bool) -> Result<Vec<Task>, DatabaseError> {
        let sql = if include_closed {
            format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE type = 'v2g_request' \
                 ORDER BY created_date DESC, id DESC"
            )
        } else {
            format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE type = 'v2g_request' \
                 AND status NOT IN ('Done', 'Archived') \
                 ORDER BY created_date DESC, id DESC"
            )
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// List tasks for one context, newest first.
    pub fn list_tasks_by_context(
        &self,
        context: Context,
        include_closed: bool,
    ) -> Result<Vec<Task>, DatabaseError> {
        let sql = if include_closed {
            format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE context = ?1 \
                 ORDER BY created_date DESC, id DESC"
            )
        } else {
            format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE context = ?1 \
                 AND status NOT IN ('Done', 'Archived') \
                 ORDER BY created_date DESC, id DESC"
            )
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params![format_context(context)], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    // === Time logs ===

    /// Record time spent on a context.
    pub fn log_time(
        &self,
        context: LogContext,
        duration_minutes: i64,
        task_id: Option<i64>,
        notes: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO time_logs (timestamp, context, duration_minutes, task_id, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                now.format(TIMESTAMP_FORMAT).to_string(),
                format_log_context(context),
                duration_minutes,
                task_id,
                notes,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Time logs for the last `days` days, newest first.
    pub fn list_time_logs(&self, days: i64, today: NaiveDate) -> Result<Vec<TimeLog>, DatabaseError> {
        let cutoff = (today - chrono::Duration::days(days))
            .format(DATE_FORMAT)
            .to_string();
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, context, duration_minutes, task_id, notes
             FROM time_logs WHERE timestamp >= ?1 ORDER BY timestamp DESC",
        )?;
        let logs = stmt
            .query_map(params![cutoff], row_to_time_log)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    /// Every time log, oldest first.
    pub fn all_time_logs(&self) -> Result<Vec<TimeLog>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, context, duration_minutes, task_id, notes
             FROM time_logs ORDER BY timestamp ASC",
        )?;
        let logs = stmt
            .query_map([], row_to_time_log)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    // === Settings ===

    /// Get a setting value.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Set (or replace) a setting value.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::EnergyLevel;
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            context: Context::Phd,
            priority: Priority::High,
            energy_needed: EnergyLevel::High,
            ..TaskDraft::default()
        }
    }

    #[test]
    fn create_and_get_roundtrip() {
        let db = TaskDb::open_memory().unwrap();
        let id = db.create_task(&draft("Write chapter"), today()).unwrap();

        let task = db.get_task(id).unwrap().unwrap();
        assert_eq!(task.title, "Write chapter");
        assert_eq!(task.context, Context::Phd);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, Status::ToDo);
        assert_eq!(task.created_date, today());
        assert_eq!(task.estimated_time, "1hour");
        assert!(task.v2g.is_none());
    }

    #[test]
    fn reopen_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifeos.db");
        let id = {
            let db = TaskDb::open_at(&path).unwrap();
            db.create_task(&draft("persisted"), today()).unwrap()
        };

        let db = TaskDb::open_at(&path).unwrap();
        let task = db.get_task(id).unwrap().unwrap();
        assert_eq!(task.title, "persisted");
    }

    #[test]
    fn get_missing_task_is_none() {
        let db = TaskDb::open_memory().unwrap();
        assert!(db.get_task(42).unwrap().is_none());
    }

    #[test]
    fn list_excludes_closed_by_default() {
        let db = TaskDb::open_memory().unwrap();
        let open_id = db.create_task(&draft("open"), today()).unwrap();
        let done_id = db.create_task(&draft("done"), today()).unwrap();
        let archived_id = db.create_task(&draft("archived"), today()).unwrap();

        let done = TaskUpdate {
            status: Some(Status::Done),
            ..TaskUpdate::default()
        };
        db.update_task(done_id, &done, today()).unwrap();
        let archived = TaskUpdate {
            status: Some(Status::Archived),
            ..TaskUpdate::default()
        };
        db.update_task(archived_id, &archived, today()).unwrap();

        let active = db.list_tasks(false).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, open_id);

        let all = db.list_tasks(true).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn list_orders_newest_first() {
        let db = TaskDb::open_memory().unwrap();
        let older = db
            .create_task(&draft("older"), today() - chrono::Duration::days(2))
            .unwrap();
        let newer = db.create_task(&draft("newer"), today()).unwrap();
        let same_day = db.create_task(&draft("same day"), today()).unwrap();

        let tasks = db.list_tasks(false).unwrap();
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![same_day, newer, older]);
    }

    #[test]
    fn update_refreshes_last_update() {
        let db = TaskDb::open_memory().unwrap();
        let id = db.create_task(&draft("t"), today()).unwrap();

        let update = TaskUpdate {
            priority: Some(Priority::Urgent),
            due_date: Some("2025-07-01".to_string()),
            ..TaskUpdate::default()
        };
        let later = today() + chrono::Duration::days(2);
        assert!(db.update_task(id, &update, later).unwrap());

        let task = db.get_task(id).unwrap().unwrap();
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.due_date.as_deref(), Some("2025-07-01"));
        assert_eq!(task.last_update, Some(later));
        assert!(task.completed_date.is_none());
    }

    #[test]
    fn completing_sets_completed_date() {
        let db = TaskDb::open_memory().unwrap();
        let id = db.create_task(&draft("t"), today()).unwrap();

        let update = TaskUpdate {
            status: Some(Status::Done),
            ..TaskUpdate::default()
        };
        db.update_task(id, &update, today()).unwrap();

        let task = db.get_task(id).unwrap().unwrap();
        assert_eq!(task.status, Status::Done);
        assert_eq!(task.completed_date, Some(today()));
    }

    #[test]
    fn explicit_completed_date_wins() {
        let db = TaskDb::open_memory().unwrap();
        let id = db.create_task(&draft("t"), today()).unwrap();

        let yesterday = today() - chrono::Duration::days(1);
        let update = TaskUpdate {
            status: Some(Status::Done),
            completed_date: Some(yesterday),
            ..TaskUpdate::default()
        };
        db.update_task(id, &update, today()).unwrap();

        let task = db.get_task(id).unwrap().unwrap();
        assert_eq!(task.completed_date, Some(yesterday));
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let db = TaskDb::open_memory().unwrap();
        let id = db.create_task(&draft("t"), today()).unwrap();
        assert!(!db.update_task(id, &TaskUpdate::default(), today()).unwrap());
    }

    #[test]
    fn update_missing_row_returns_false() {
        let db = TaskDb::open_memory().unwrap();
        let update = TaskUpdate {
            title: Some("x".to_string()),
            ..TaskUpdate::default()
        };
        assert!(!db.update_task(99, &update, today()).unwrap());
    }

    #[test]
    fn delete_task_reports_existence() {
        let db = TaskDb::open_memory().unwrap();
        let id = db.create_task(&draft("t"), today()).unwrap();
        assert!(db.delete_task(id).unwrap());
        assert!(!db.delete_task(id).unwrap());
    }

    #[test]
    fn v2g_fields_roundtrip() {
        let db = TaskDb::open_memory().unwrap();
        let mut d = draft("V2G: Alice - fleet question");
        d.kind = TaskKind::V2gRequest;
        d.context = Context::Avl;
        d.v2g = Some(V2gFields {
            requester: "Alice".to_string(),
            source: "Teams".to_string(),
            needs_consult: true,
            consult_question: Some("Which charger model?".to_string()),
        });
        let id = db.create_task(&d, today()).unwrap();

        let requests = db.list_v2g_requests(false).unwrap();
        assert_eq!(requests.len(), 1);
        let v2g = requests[0].v2g.as_ref().unwrap();
        assert_eq!(v2g.requester, "Alice");
        assert!(v2g.needs_consult);
        assert_eq!(v2g.consult_question.as_deref(), Some("Which charger model?"));

        // general tasks are not v2g requests
        db.create_task(&draft("plain"), today()).unwrap();
        assert_eq!(db.list_v2g_requests(false).unwrap().len(), 1);

        let update = TaskUpdate {
            needs_consult: Some(false),
            ..TaskUpdate::default()
        };
        db.update_task(id, &update, today()).unwrap();
        let task = db.get_task(id).unwrap().unwrap();
        assert!(!task.v2g.unwrap().needs_consult);
    }

    #[test]
    fn tasks_by_context() {
        let db = TaskDb::open_memory().unwrap();
        db.create_task(&draft("phd task"), today()).unwrap();
        let mut personal = draft("errand");
        personal.context = Context::Personal;
        db.create_task(&personal, today()).unwrap();

        let phd = db.list_tasks_by_context(Context::Phd, false).unwrap();
        assert_eq!(phd.len(), 1);
        assert_eq!(phd[0].title, "phd task");
    }

    #[test]
    fn time_logs_roundtrip_and_cutoff() {
        let db = TaskDb::open_memory().unwrap();
        let noon = |date: NaiveDate| date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        db.log_time(LogContext::Phd, 45, None, Some("writing"), noon(today()))
            .unwrap();
        db.log_time(
            LogContext::Wasting,
            15,
            None,
            None,
            noon(today() - chrono::Duration::days(10)),
        )
        .unwrap();

        let recent = db.list_time_logs(7, today()).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].context, LogContext::Phd);
        assert_eq!(recent[0].duration_minutes, 45);
        assert_eq!(recent[0].notes.as_deref(), Some("writing"));

        let all = db.all_time_logs().unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn settings_kv_upsert() {
        let db = TaskDb::open_memory().unwrap();
        assert!(db.get_setting("theme").unwrap().is_none());
        db.set_setting("theme", "dark").unwrap();
        db.set_setting("theme", "light").unwrap();
        assert_eq!(db.get_setting("theme").unwrap().as_deref(), Some("light"));
    }
}
