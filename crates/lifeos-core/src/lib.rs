//! # LifeOS Core Library
//!
//! This library provides the core business logic for LifeOS, a personal
//! productivity tracker combining task management, V2G request tracking,
//! and time-logging analytics. It implements a CLI-first philosophy where
//! all operations are available via a standalone CLI binary, with the HTTP
//! server being a thin API layer over the same core library.
//!
//! ## Architecture
//!
//! - **Scoring**: A pure, deterministic priority scorer over task snapshots
//! - **Next Action**: Score ranking plus time-of-day energy matching to pick
//!   the single recommended task
//! - **Storage**: SQLite-based task/time-log storage and TOML-based
//!   configuration
//! - **Stats**: Task and time-tracking aggregates for dashboards
//!
//! ## Key Components
//!
//! - [`score`] / [`ScoreBreakdown`]: Priority scoring with explainability
//! - [`select_next_action`]: Energy-aware recommendation engine
//! - [`TaskDb`]: Task, time-log, and settings persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod next_action;
pub mod scoring;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timelog;

pub use error::{ConfigError, CoreError, DatabaseError, Result};
pub use next_action::{energy_preference, select_next_action, SCAN_WINDOW};
pub use scoring::{score, score_breakdown, ScoreBreakdown};
pub use stats::{ContextCounts, TaskStats, V2gStats};
pub use storage::{Config, TaskDb};
pub use task::{
    v2g_title, Context, EnergyLevel, Priority, Status, Task, TaskDraft, TaskKind, TaskUpdate,
    V2gFields,
};
pub use timelog::{LogContext, TimeAnalytics, TimeLog};
