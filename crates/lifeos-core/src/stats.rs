//! Task and V2G aggregate statistics.
//!
//! Computed over a full task snapshot (closed tasks included, since the
//! completion counters need them). Malformed dates are skipped via the
//! lenient parse on [`Task`], contributing nothing.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::{Context, Status, Task, TaskKind};

/// Active-task counts per context.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextCounts {
    pub phd: u32,
    pub avl: u32,
    pub vitasana: u32,
    pub personal: u32,
}

impl ContextCounts {
    fn bump(&mut self, context: Context) {
        match context {
            Context::Phd => self.phd += 1,
            Context::Avl => self.avl += 1,
            Context::Vitasana => self.vitasana += 1,
            Context::Personal => self.personal += 1,
        }
    }
}

/// Dashboard statistics over the whole task list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStats {
    pub total_active: u32,
    pub overdue: u32,
    pub due_today: u32,
    pub due_week: u32,
    pub blocked: u32,
    pub by_context: ContextCounts,
    pub completed_today: u32,
    pub completed_week: u32,
    pub v2g_needs_consult: u32,
    pub v2g_overdue: u32,
}

impl TaskStats {
    /// Compute stats for `today` over a full snapshot.
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let week_ago = today - Duration::days(7);
        let mut stats = Self::default();

        for task in tasks {
            if task.status == Status::Done {
                if let Some(completed) = task.completed_date {
                    if completed == today {
                        stats.completed_today += 1;
                    }
                    if completed >= week_ago {
                        stats.completed_week += 1;
                    }
                }
                continue;
            }
            if task.status == Status::Archived {
                continue;
            }

            stats.total_active += 1;
            stats.by_context.bump(task.context);

            if task.status == Status::Blocked {
                stats.blocked += 1;
            }

            if task.kind == TaskKind::V2gRequest
                && task.v2g.as_ref().is_some_and(|v2g| v2g.needs_consult)
            {
                stats.v2g_needs_consult += 1;
            }

            if let Some(days) = task.days_until_due(today) {
                if days < 0 {
                    stats.overdue += 1;
                    if task.kind == TaskKind::V2gRequest {
                        stats.v2g_overdue += 1;
                    }
                } else if days == 0 {
                    stats.due_today += 1;
                } else if days <= 7 {
                    stats.due_week += 1;
                }
            }
        }

        stats
    }
}

/// Statistics over open V2G requests.
///
/// The due buckets keep the original dashboard's short `today`/`week`
/// JSON keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct V2gStats {
    pub total: u32,
    pub overdue: u32,
    #[serde(rename = "today")]
    pub due_today: u32,
    #[serde(rename = "week")]
    pub due_week: u32,
    pub needs_consult: u32,
    /// Requests with no update for 3+ days
    pub stale: u32,
}

impl V2gStats {
    /// Days without an update after which a request counts as stale.
    pub const STALE_AFTER_DAYS: i64 = 3;

    /// Compute stats for `today` over open V2G requests.
    pub fn compute(requests: &[Task], today: NaiveDate) -> Self {
        let mut stats = Self::default();

        for request in requests {
            if request.kind != TaskKind::V2gRequest || request.status.is_closed() {
                continue;
            }

            stats.total += 1;

            if request.v2g.as_ref().is_some_and(|v2g| v2g.needs_consult) {
                stats.needs_consult += 1;
            }

            if let Some(days) = request.days_until_due(today) {
                if days < 0 {
                    stats.overdue += 1;
                } else if days == 0 {
                    stats.due_today += 1;
                } else if days <= 7 {
                    stats.due_week += 1;
                }
            }

            if let Some(last) = request.last_update {
                if (today - last).num_days() >= Self::STALE_AFTER_DAYS {
                    stats.stale += 1;
                }
            }
        }

        stats
    }
}
