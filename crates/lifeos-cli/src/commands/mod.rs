//! CLI subcommand implementations.

pub mod next;
pub mod stats;
pub mod task;
pub mod timelog;
pub mod v2g;

use lifeos_core::{Context, EnergyLevel, LogContext, Priority, Status};

pub(crate) fn parse_context(s: &str) -> Result<Context, String> {
    match s {
        "phd" => Ok(Context::Phd),
        "avl" => Ok(Context::Avl),
        "vitasana" => Ok(Context::Vitasana),
        "personal" => Ok(Context::Personal),
        other => Err(format!(
            "unknown context '{other}' (expected phd, avl, vitasana, or personal)"
        )),
    }
}

pub(crate) fn parse_log_context(s: &str) -> Result<LogContext, String> {
    match s {
        "phd" => Ok(LogContext::Phd),
        "avl" => Ok(LogContext::Avl),
        "vitasana" => Ok(LogContext::Vitasana),
        "personal" => Ok(LogContext::Personal),
        "wasting" => Ok(LogContext::Wasting),
        other => Err(format!(
            "unknown context '{other}' (expected phd, avl, vitasana, personal, or wasting)"
        )),
    }
}

pub(crate) fn parse_priority(s: &str) -> Result<Priority, String> {
    match s {
        "low" | "Low" => Ok(Priority::Low),
        "medium" | "Medium" => Ok(Priority::Medium),
        "high" | "High" => Ok(Priority::High),
        "critical" | "Critical" => Ok(Priority::Critical),
        "urgent" | "Urgent" => Ok(Priority::Urgent),
        other => Err(format!("unknown priority '{other}'")),
    }
}

pub(crate) fn parse_status(s: &str) -> Result<Status, String> {
    match s {
        "todo" | "To Do" => Ok(Status::ToDo),
        "in-progress" | "In Progress" => Ok(Status::InProgress),
        "blocked" | "Blocked" => Ok(Status::Blocked),
        "waiting" | "Waiting" => Ok(Status::Waiting),
        "done" | "Done" => Ok(Status::Done),
        "archived" | "Archived" => Ok(Status::Archived),
        other => Err(format!("unknown status '{other}'")),
    }
}

pub(crate) fn parse_energy(s: &str) -> Result<EnergyLevel, String> {
    match s {
        "low" | "Low" => Ok(EnergyLevel::Low),
        "medium" | "Medium" => Ok(EnergyLevel::Medium),
        "high" | "High" => Ok(EnergyLevel::High),
        other => Err(format!("unknown energy level '{other}'")),
    }
}
