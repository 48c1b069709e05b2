//! Task types shared by the scorer, selector, stats, and storage layers.
//!
//! A single `tasks` table backs two task kinds: general tasks and V2G
//! intake requests (general tasks carry no [`V2gFields`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User-set importance of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
    Urgent,
}

impl Priority {
    /// Base score points contributed by this priority.
    pub fn base_points(self) -> i64 {
        match self {
            Priority::Low => 50,
            Priority::Medium => 100,
            Priority::High => 200,
            Priority::Critical => 300,
            Priority::Urgent => 300,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Life/work category a task belongs to.
///
/// Each context carries a fixed relative importance weight applied
/// multiplicatively during scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    /// PhD research (long-term impact boost)
    Phd,
    /// Current employer work
    Avl,
    /// Personal business
    Vitasana,
    /// Personal life
    Personal,
}

impl Context {
    /// Relative importance weight for scoring.
    pub fn weight(self) -> f64 {
        match self {
            Context::Phd => 1.2,
            Context::Avl => 1.0,
            Context::Vitasana => 1.1,
            Context::Personal => 0.8,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::Personal
    }
}

/// Task workflow status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    Waiting,
    Done,
    Archived,
}

impl Status {
    /// Closed tasks are excluded from ranking and recommendation.
    pub fn is_closed(self) -> bool {
        matches!(self, Status::Done | Status::Archived)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::ToDo
    }
}

/// Effort/focus level required to perform a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Medium
    }
}

/// Kind of task record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Regular task
    General,
    /// External intake request with extra tracking fields
    V2gRequest,
}

impl Default for TaskKind {
    fn default() -> Self {
        TaskKind::General
    }
}

/// Longest request summary kept in a generated V2G title.
const V2G_TITLE_SUMMARY_LIMIT: usize = 50;

/// Generated title for a V2G request.
pub fn v2g_title(requester: &str, summary: &str) -> String {
    let summary: String = summary.chars().take(V2G_TITLE_SUMMARY_LIMIT).collect();
    format!("V2G: {requester} - {summary}")
}

/// Extra fields carried by V2G intake requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct V2gFields {
    /// Who asked for this
    pub requester: String,
    /// Intake channel (e.g. "Email")
    pub source: String,
    /// Whether a named third party must be consulted before acting
    #[serde(default)]
    pub needs_consult: bool,
    /// The open question for that third party, if any
    #[serde(default)]
    pub consult_question: Option<String>,
}

/// A task record as returned by the store.
///
/// `due_date` is kept as the raw stored string; it may be missing or
/// malformed. [`Task::parse_due_date`] is the single place that turns it
/// into a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: TaskKind,
    pub created_date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub energy_needed: EnergyLevel,
    #[serde(default = "default_estimated_time")]
    pub estimated_time: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_update: Option<NaiveDate>,
    #[serde(flatten)]
    pub v2g: Option<V2gFields>,
}

fn default_estimated_time() -> String {
    "1hour".to_string()
}

impl Task {
    /// Lenient due-date parse.
    ///
    /// Returns `None` when the due date is absent or not a valid
    /// `YYYY-MM-DD` date. Callers treat `None` as "no urgency
    /// contribution" rather than an error.
    pub fn parse_due_date(&self) -> Option<NaiveDate> {
        self.due_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    /// Days from `today` until the due date (negative when overdue).
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.parse_due_date().map(|due| (due - today).num_days())
    }
}

/// Creation payload for a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub context: Context,
    #[serde(rename = "type", default)]
    pub kind: TaskKind,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub energy_needed: EnergyLevel,
    #[serde(default = "default_estimated_time")]
    pub estimated_time: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub v2g: Option<V2gFields>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            context: Context::default(),
            kind: TaskKind::default(),
            priority: Priority::default(),
            status: Status::default(),
            due_date: None,
            energy_needed: EnergyLevel::default(),
            estimated_time: default_estimated_time(),
            project: None,
            notes: None,
            v2g: None,
        }
    }
}

/// Enumerated field-update request.
///
/// Every patchable column is listed explicitly and unknown fields are
/// rejected at deserialization, so update statements are never built from
/// an arbitrary mapping.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_needed: Option<EnergyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_consult: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consult_question: Option<String>,
}

impl TaskUpdate {
    /// True when no field is set (nothing to persist).
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.context.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.energy_needed.is_none()
            && self.estimated_time.is_none()
            && self.project.is_none()
            && self.notes.is_none()
            && self.completed_date.is_none()
            && self.requester.is_none()
            && self.source.is_none()
            && self.needs_consult.is_none()
            && self.consult_question.is_none()
    }
}
