//! Combined statistics command.

use chrono::Local;
use lifeos_core::{TaskDb, TaskStats, TimeAnalytics};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = TaskDb::open()?;
    let today = Local::now().date_naive();

    let tasks = db.list_tasks(true)?;
    let task_stats = TaskStats::compute(&tasks, today);

    let logs = db.all_time_logs()?;
    let time_analytics = TimeAnalytics::compute(&logs, today);

    let out = serde_json::json!({
        "tasks": task_stats,
        "time": time_analytics,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
