//! Next-action recommendation command.

use chrono::Local;
use lifeos_core::{score_breakdown, select_next_action, TaskDb};

pub fn run(explain: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = TaskDb::open()?;
    let now = Local::now().naive_local();

    let tasks = db.list_tasks(false)?;
    match select_next_action(&tasks, now) {
        Some(task) => {
            println!("{}", serde_json::to_string_pretty(task)?);
            if explain {
                let breakdown = score_breakdown(task, now.date());
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            }
        }
        None => println!("No actionable tasks."),
    }

    Ok(())
}
