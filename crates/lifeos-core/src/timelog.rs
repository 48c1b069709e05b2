//! Time-log records and analytics.
//!
//! Time is logged in 15-minute-default increments against a context
//! (including an explicit "wasting" bucket that tasks never use), and
//! aggregated into per-context hours for today and the trailing week.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Context a time entry is booked against.
///
/// Same categories as tasks, plus a wasted-time bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogContext {
    Phd,
    Avl,
    Vitasana,
    Personal,
    Wasting,
}

/// A single time-log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeLog {
    pub id: i64,
    /// Local wall-clock time of the entry
    pub timestamp: NaiveDateTime,
    pub context: LogContext,
    pub duration_minutes: i64,
    /// Task this time was spent on, if any
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Hours per context for one period, rounded to one decimal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ContextHours {
    pub phd: f64,
    pub avl: f64,
    pub vitasana: f64,
    pub personal: f64,
    pub wasting: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct ContextMinutes {
    phd: i64,
    avl: i64,
    vitasana: i64,
    personal: i64,
    wasting: i64,
    total: i64,
}

impl ContextMinutes {
    fn add(&mut self, context: LogContext, minutes: i64) {
        match context {
            LogContext::Phd => self.phd += minutes,
            LogContext::Avl => self.avl += minutes,
            LogContext::Vitasana => self.vitasana += minutes,
            LogContext::Personal => self.personal += minutes,
            LogContext::Wasting => self.wasting += minutes,
        }
        self.total += minutes;
    }

    fn into_hours(self) -> ContextHours {
        fn round1(minutes: i64) -> f64 {
            (minutes as f64 / 60.0 * 10.0).round() / 10.0
        }
        ContextHours {
            phd: round1(self.phd),
            avl: round1(self.avl),
            vitasana: round1(self.vitasana),
            personal: round1(self.personal),
            wasting: round1(self.wasting),
            total: round1(self.total),
        }
    }
}

/// Time spent per context, today and over the trailing 7 days.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TimeAnalytics {
    pub today: ContextHours,
    pub week: ContextHours,
    pub today_logs: u32,
    pub week_logs: u32,
}

impl TimeAnalytics {
    /// Aggregate a set of logs relative to `today`.
    pub fn compute(logs: &[TimeLog], today: NaiveDate) -> Self {
        let week_ago = today - Duration::days(7);
        let mut today_minutes = ContextMinutes::default();
        let mut week_minutes = ContextMinutes::default();
        let mut today_logs = 0;
        let mut week_logs = 0;

        for log in logs {
            let log_date = log.timestamp.date();
            if log_date == today {
                today_minutes.add(log.context, log.duration_minutes);
                today_logs += 1;
            }
            if log_date >= week_ago {
                week_minutes.add(log.context, log.duration_minutes);
                week_logs += 1;
            }
        }

        Self {
            today: today_minutes.into_hours(),
            week: week_minutes.into_hours(),
            today_logs,
            week_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn log_at(id: i64, date: NaiveDate, context: LogContext, minutes: i64) -> TimeLog {
        TimeLog {
            id,
            timestamp: date.and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
            context,
            duration_minutes: minutes,
            task_id: None,
            notes: None,
        }
    }

    #[test]
    fn today_entries_count_in_both_periods() {
        let logs = vec![
            log_at(1, today(), LogContext::Phd, 90),
            log_at(2, today(), LogContext::Wasting, 30),
        ];
        let analytics = TimeAnalytics::compute(&logs, today());
        assert_eq!(analytics.today.phd, 1.5);
        assert_eq!(analytics.today.wasting, 0.5);
        assert_eq!(analytics.today.total, 2.0);
        assert_eq!(analytics.week.total, 2.0);
        assert_eq!(analytics.today_logs, 2);
        assert_eq!(analytics.week_logs, 2);
    }

    #[test]
    fn week_window_is_seven_days() {
        let logs = vec![
            log_at(1, today() - Duration::days(7), LogContext::Avl, 60),
            log_at(2, today() - Duration::days(8), LogContext::Avl, 60),
        ];
        let analytics = TimeAnalytics::compute(&logs, today());
        assert_eq!(analytics.week.avl, 1.0);
        assert_eq!(analytics.week_logs, 1);
        assert_eq!(analytics.today_logs, 0);
    }

    #[test]
    fn hours_round_to_one_decimal() {
        // 25 minutes = 0.41666... hours, rounds to 0.4
        let logs = vec![log_at(1, today(), LogContext::Vitasana, 25)];
        let analytics = TimeAnalytics::compute(&logs, today());
        assert_eq!(analytics.today.vitasana, 0.4);
    }

    #[test]
    fn empty_logs_yield_zeroes() {
        let analytics = TimeAnalytics::compute(&[], today());
        assert_eq!(analytics, TimeAnalytics::default());
    }
}
