//! Time logging commands.

use chrono::Local;
use clap::Subcommand;
use lifeos_core::{TaskDb, TimeAnalytics};

use super::parse_log_context;

#[derive(Subcommand)]
pub enum TimeAction {
    /// Log time spent on a context
    Log {
        /// Context: phd, avl, vitasana, personal, or wasting
        context: String,
        /// Duration in minutes
        #[arg(long, default_value = "15")]
        minutes: i64,
        /// Task this time was spent on
        #[arg(long)]
        task_id: Option<i64>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List recent time logs
    List {
        /// How many days back to look
        #[arg(long, default_value = "7")]
        days: i64,
    },
    /// Per-context hours for today and the trailing week
    Analytics,
}

pub fn run(action: TimeAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = TaskDb::open()?;
    let now = Local::now().naive_local();

    match action {
        TimeAction::Log {
            context,
            minutes,
            task_id,
            notes,
        } => {
            let id = db.log_time(
                parse_log_context(&context)?,
                minutes,
                task_id,
                notes.as_deref(),
                now,
            )?;
            println!("Time logged: {id} ({minutes}min on {context})");
        }
        TimeAction::List { days } => {
            let logs = db.list_time_logs(days, now.date())?;
            println!("{}", serde_json::to_string_pretty(&logs)?);
        }
        TimeAction::Analytics => {
            let logs = db.all_time_logs()?;
            let analytics = TimeAnalytics::compute(&logs, now.date());
            println!("{}", serde_json::to_string_pretty(&analytics)?);
        }
    }

    Ok(())
}
