//! Task management commands for CLI.

use chrono::Local;
use clap::Subcommand;
use lifeos_core::{TaskDb, TaskDraft, TaskUpdate};

use super::{parse_context, parse_energy, parse_priority, parse_status};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Context: phd, avl, vitasana, or personal (default: personal)
        #[arg(long, default_value = "personal")]
        context: String,
        /// Priority: low, medium, high, critical, or urgent (default: medium)
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<String>,
        /// Energy needed: low, medium, or high (default: medium)
        #[arg(long, default_value = "medium")]
        energy: String,
        /// Estimated time bucket (e.g. 15min, 1hour)
        #[arg(long, default_value = "1hour")]
        estimated_time: String,
        /// Project name
        #[arg(long)]
        project: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List tasks
    List {
        /// Filter by context
        #[arg(long)]
        context: Option<String>,
        /// Include Done and Archived tasks
        #[arg(long)]
        all: bool,
    },
    /// Get task details
    Get {
        /// Task ID
        id: i64,
    },
    /// Update a task
    Update {
        /// Task ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New context
        #[arg(long)]
        context: Option<String>,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
        /// New status: todo, in-progress, blocked, waiting, done, or archived
        #[arg(long)]
        status: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<String>,
        /// New energy level
        #[arg(long)]
        energy: Option<String>,
        /// New estimated time bucket
        #[arg(long)]
        estimated_time: Option<String>,
        /// New project name
        #[arg(long)]
        project: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = TaskDb::open()?;
    let today = Local::now().date_naive();

    match action {
        TaskAction::Create {
            title,
            context,
            priority,
            due_date,
            energy,
            estimated_time,
            project,
            notes,
        } => {
            let draft = TaskDraft {
                title,
                context: parse_context(&context)?,
                priority: parse_priority(&priority)?,
                due_date,
                energy_needed: parse_energy(&energy)?,
                estimated_time,
                project,
                notes,
                ..TaskDraft::default()
            };
            let id = db.create_task(&draft, today)?;
            println!("Task created: {id}");
            if let Some(task) = db.get_task(id)? {
                println!("{}", serde_json::to_string_pretty(&task)?);
            }
        }
        TaskAction::List { context, all } => {
            let tasks = match context {
                Some(context) => db.list_tasks_by_context(parse_context(&context)?, all)?,
                None => db.list_tasks(all)?,
            };
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => match db.get_task(id)? {
            Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
            None => return Err(format!("no task with id {id}").into()),
        },
        TaskAction::Update {
            id,
            title,
            context,
            priority,
            status,
            due_date,
            energy,
            estimated_time,
            project,
            notes,
        } => {
            let update = TaskUpdate {
                title,
                context: context.as_deref().map(parse_context).transpose()?,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                due_date,
                energy_needed: energy.as_deref().map(parse_energy).transpose()?,
                estimated_time,
                project,
                notes,
                ..TaskUpdate::default()
            };
            if update.is_empty() {
                return Err("nothing to update".into());
            }
            if !db.update_task(id, &update, today)? {
                return Err(format!("no task with id {id}").into());
            }
            println!("Task {id} updated");
        }
        TaskAction::Delete { id } => {
            if !db.delete_task(id)? {
                return Err(format!("no task with id {id}").into());
            }
            println!("Task {id} deleted");
        }
    }

    Ok(())
}
