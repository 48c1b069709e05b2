//! V2G request tracking commands.
//!
//! V2G requests are tasks with intake metadata; they always live in the
//! avl context and carry a generated "V2G: requester - summary" title.

use chrono::Local;
use clap::Subcommand;
use lifeos_core::{
    v2g_title, Context, TaskDb, TaskDraft, TaskKind, TaskUpdate, V2gFields, V2gStats,
};

use super::{parse_priority, parse_status};

#[derive(Subcommand)]
pub enum V2gAction {
    /// Create a new V2G request
    Create {
        /// Who asked for this
        requester: String,
        /// Short summary of the request
        summary: String,
        /// Intake channel (default: Email)
        #[arg(long, default_value = "Email")]
        source: String,
        /// Priority: low, medium, high, critical, or urgent
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        target_date: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// A third party must be consulted before acting
        #[arg(long)]
        needs_consult: bool,
        /// The open question for that third party
        #[arg(long)]
        consult_question: Option<String>,
    },
    /// List V2G requests with stats
    List {
        /// Include Done and Archived requests
        #[arg(long)]
        all: bool,
    },
    /// Update a V2G request
    Update {
        /// Request ID
        id: i64,
        /// New summary (regenerates the title)
        #[arg(long)]
        summary: Option<String>,
        /// New requester
        #[arg(long)]
        requester: Option<String>,
        /// New source
        #[arg(long)]
        source: Option<String>,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
        /// New status
        #[arg(long)]
        status: Option<String>,
        /// New target date (YYYY-MM-DD)
        #[arg(long)]
        target_date: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
        /// Whether a third party must be consulted
        #[arg(long)]
        needs_consult: Option<bool>,
        /// New consult question
        #[arg(long)]
        consult_question: Option<String>,
    },
    /// Delete a V2G request
    Delete {
        /// Request ID
        id: i64,
    },
}

pub fn run(action: V2gAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = TaskDb::open()?;
    let today = Local::now().date_naive();

    match action {
        V2gAction::Create {
            requester,
            summary,
            source,
            priority,
            target_date,
            notes,
            needs_consult,
            consult_question,
        } => {
            let draft = TaskDraft {
                title: v2g_title(&requester, &summary),
                context: Context::Avl,
                kind: TaskKind::V2gRequest,
                priority: parse_priority(&priority)?,
                due_date: target_date,
                notes,
                v2g: Some(V2gFields {
                    requester,
                    source,
                    needs_consult,
                    consult_question,
                }),
                ..TaskDraft::default()
            };
            let id = db.create_task(&draft, today)?;
            println!("V2G request created: {id}");
        }
        V2gAction::List { all } => {
            let requests = db.list_v2g_requests(all)?;
            let stats = V2gStats::compute(&requests, today);
            let out = serde_json::json!({ "requests": requests, "stats": stats });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        V2gAction::Update {
            id,
            summary,
            requester,
            source,
            priority,
            status,
            target_date,
            notes,
            needs_consult,
            consult_question,
        } => {
            // A new summary regenerates the title against the current
            // (or updated) requester.
            let title = match &summary {
                Some(summary) => {
                    let existing = db
                        .get_task(id)?
                        .ok_or_else(|| format!("no V2G request with id {id}"))?;
                    let requester = requester
                        .clone()
                        .or_else(|| existing.v2g.map(|v| v.requester))
                        .unwrap_or_else(|| "Unknown".to_string());
                    Some(v2g_title(&requester, summary))
                }
                None => None,
            };

            let update = TaskUpdate {
                title,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                due_date: target_date,
                notes,
                requester,
                source,
                needs_consult,
                consult_question,
                ..TaskUpdate::default()
            };
            if update.is_empty() {
                return Err("nothing to update".into());
            }
            if !db.update_task(id, &update, today)? {
                return Err(format!("no V2G request with id {id}").into());
            }
            println!("V2G request {id} updated");
        }
        V2gAction::Delete { id } => {
            if !db.delete_task(id)? {
                return Err(format!("no V2G request with id {id}").into());
            }
            println!("V2G request {id} deleted");
        }
    }

    Ok(())
}
