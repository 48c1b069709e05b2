//! Priority scoring engine.
//!
//! Maps a task record to a single integer score, combining:
//!
//! - user-set priority (base points)
//! - deadline proximity (urgency points, bucketed by days until due)
//! - context weight (multiplicative)
//! - blocked damping (multiplicative, 0.5)
//! - quick-win bonus (flat, applied after all multipliers)
//!
//! Scoring is pure and deterministic given the task and `today`; the
//! caller injects the process-local date. A malformed due date simply
//! contributes zero urgency.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{Status, Task};

/// Estimated-time bucket that earns the quick-win bonus.
pub const QUICK_WIN_ESTIMATE: &str = "15min";

/// Flat bonus for quick-win tasks, added after all multipliers.
pub const QUICK_WIN_BONUS: i64 = 20;

/// Damping factor applied to blocked tasks.
pub const BLOCKED_DAMPING: f64 = 0.5;

/// Urgency points for a deadline `days_until` days away.
///
/// Monotonically non-increasing in `days_until` over the defined buckets;
/// anything more than two weeks out contributes nothing.
pub fn urgency_points(days_until: i64) -> i64 {
    match days_until {
        i64::MIN..=-1 => 200,
        0 => 180,
        1 => 150,
        2..=3 => 120,
        4..=7 => 80,
        8..=14 => 40,
        _ => 0,
    }
}

/// Per-term scoring breakdown for explainability.
///
/// `total` is the committed score; the other fields show where it came
/// from so a recommendation can be justified to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    /// Base points from the task priority
    pub base: i64,
    /// Urgency points from deadline proximity (0 when no parseable due date)
    pub urgency: i64,
    /// Context weight applied to base + urgency
    pub context_weight: f64,
    /// Whether blocked damping (x0.5) was applied
    pub blocked_damped: bool,
    /// Flat quick-win bonus (0 or 20)
    pub quick_win: i64,
    /// Final score, truncated toward zero
    pub total: i64,
}

/// Compute the full scoring breakdown for a task.
pub fn score_breakdown(task: &Task, today: NaiveDate) -> ScoreBreakdown {
    let base = task.priority.base_points();
    let urgency = task
        .days_until_due(today)
        .map(urgency_points)
        .unwrap_or(0);

    let context_weight = task.context.weight();
    let mut total = (base + urgency) as f64 * context_weight;

    let blocked_damped = task.status == Status::Blocked;
    if blocked_damped {
        total *= BLOCKED_DAMPING;
    }

    let quick_win = if task.estimated_time == QUICK_WIN_ESTIMATE {
        QUICK_WIN_BONUS
    } else {
        0
    };
    total += quick_win as f64;

    ScoreBreakdown {
        base,
        urgency,
        context_weight,
        blocked_damped,
        quick_win,
        total: total as i64,
    }
}

/// Score a task. Pure and deterministic given `task` and `today`.
pub fn score(task: &Task, today: NaiveDate) -> i64 {
    score_breakdown(task, today).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Context, EnergyLevel, Priority, TaskKind};
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn make_task(priority: Priority, context: Context, status: Status) -> Task {
        Task {
            id: 0,
            kind: TaskKind::General,
            created_date: today(),
            title: "t".to_string(),
            context,
            priority,
            status,
            due_date: None,
            energy_needed: EnergyLevel::Medium,
            estimated_time: "1hour".to_string(),
            project: None,
            notes: None,
            completed_date: None,
            last_update: None,
            v2g: None,
        }
    }

    fn due_in(days: i64) -> Option<String> {
        Some((today() + chrono::Duration::days(days)).format("%Y-%m-%d").to_string())
    }

    #[test]
    fn urgent_no_due_date_is_base_times_weight() {
        for (context, expected) in [
            (Context::Phd, 360),
            (Context::Avl, 300),
            (Context::Vitasana, 330),
            (Context::Personal, 240),
        ] {
            let task = make_task(Priority::Urgent, context, Status::ToDo);
            assert_eq!(score(&task, today()), expected, "{context:?}");
        }
    }

    #[test]
    fn due_today_contributes_exactly_180() {
        let mut task = make_task(Priority::Low, Context::Avl, Status::ToDo);
        task.due_date = due_in(0);
        // avl weight is 1.0 so the urgency term is visible directly
        assert_eq!(score(&task, today()), 50 + 180);
    }

    #[test]
    fn urgency_buckets() {
        assert_eq!(urgency_points(-30), 200);
        assert_eq!(urgency_points(-1), 200);
        assert_eq!(urgency_points(0), 180);
        assert_eq!(urgency_points(1), 150);
        assert_eq!(urgency_points(2), 120);
        assert_eq!(urgency_points(3), 120);
        assert_eq!(urgency_points(4), 80);
        assert_eq!(urgency_points(7), 80);
        assert_eq!(urgency_points(8), 40);
        assert_eq!(urgency_points(14), 40);
        assert_eq!(urgency_points(15), 0);
        assert_eq!(urgency_points(365), 0);
    }

    #[test]
    fn malformed_due_date_contributes_nothing() {
        let clean = make_task(Priority::High, Context::Avl, Status::ToDo);
        let mut garbled = clean.clone();
        garbled.due_date = Some("next tuesday".to_string());
        assert_eq!(score(&garbled, today()), score(&clean, today()));
    }

    #[test]
    fn blocked_is_damped_not_excluded() {
        let open = make_task(Priority::Critical, Context::Avl, Status::ToDo);
        let mut blocked = open.clone();
        blocked.status = Status::Blocked;
        assert_eq!(score(&open, today()), 300);
        assert_eq!(score(&blocked, today()), 150);
    }

    #[test]
    fn quick_win_bonus_is_not_multiplied() {
        // blocked phd task: (300 + 0) * 1.2 * 0.5 = 180, then +20 flat
        let mut task = make_task(Priority::Critical, Context::Phd, Status::Blocked);
        task.estimated_time = "15min".to_string();
        assert_eq!(score(&task, today()), 200);
    }

    #[test]
    fn worked_examples() {
        // Critical phd task due today: (300 + 180) * 1.2 = 576
        let mut a = make_task(Priority::Critical, Context::Phd, Status::ToDo);
        a.due_date = due_in(0);
        a.energy_needed = EnergyLevel::Medium;
        assert_eq!(score(&a, today()), 576);

        // Medium personal task, no deadline: 100 * 0.8 = 80
        let b = make_task(Priority::Medium, Context::Personal, Status::ToDo);
        assert_eq!(score(&b, today()), 80);
    }

    #[test]
    fn breakdown_matches_score() {
        let mut task = make_task(Priority::High, Context::Vitasana, Status::Blocked);
        task.due_date = due_in(2);
        task.estimated_time = "15min".to_string();
        let breakdown = score_breakdown(&task, today());
        assert_eq!(breakdown.base, 200);
        assert_eq!(breakdown.urgency, 120);
        assert_eq!(breakdown.context_weight, 1.1);
        assert!(breakdown.blocked_damped);
        assert_eq!(breakdown.quick_win, 20);
        assert_eq!(breakdown.total, score(&task, today()));
        // (200 + 120) * 1.1 * 0.5 + 20 = 196
        assert_eq!(breakdown.total, 196);
    }

    proptest! {
        #[test]
        fn urgency_monotonic_non_increasing(a in -60i64..60, b in -60i64..60) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(urgency_points(near) >= urgency_points(far));
        }

        #[test]
        fn blocked_never_scores_higher(
            days in -30i64..30,
            quick in proptest::bool::ANY,
        ) {
            let mut open = make_task(Priority::High, Context::Phd, Status::ToDo);
            open.due_date = due_in(days);
            if quick {
                open.estimated_time = "15min".to_string();
            }
            let mut blocked = open.clone();
            blocked.status = Status::Blocked;
            prop_assert!(score(&blocked, today()) <= score(&open, today()));
        }
    }
}
