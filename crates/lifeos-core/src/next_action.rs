//! Next-action recommendation engine.
//!
//! Ranks the active task snapshot by score, then biases toward a task
//! whose energy requirement matches the current time of day. Pure score
//! ranking would always surface the top item regardless of whether the
//! user has the energy slot to do it; the energy pass picks an actionable
//! match near the top of the ranking without abandoning score order.
//!
//! One-shot computation per call; holds no state between invocations and
//! never mutates its input.

use chrono::{NaiveDateTime, Timelike};
use std::cmp::Reverse;

use crate::scoring::score;
use crate::task::{EnergyLevel, Task};

/// How deep into the score ranking the energy match may look.
///
/// Capped so a low-score task is never recommended just because it
/// matches the current energy window.
pub const SCAN_WINDOW: usize = 10;

/// Energy preference order for a local hour of day.
///
/// Mornings favor high-energy work, afternoons medium, evenings and
/// nights low.
pub fn energy_preference(hour: u32) -> [EnergyLevel; 3] {
    match hour {
        7..=11 => [EnergyLevel::High, EnergyLevel::Medium, EnergyLevel::Low],
        12..=16 => [EnergyLevel::Medium, EnergyLevel::High, EnergyLevel::Low],
        _ => [EnergyLevel::Low, EnergyLevel::Medium, EnergyLevel::High],
    }
}

/// Pick the single recommended task from a snapshot, or `None` when
/// nothing is actionable.
///
/// Ties in score keep the input order (the store returns tasks newest
/// first, so ranking is stable across calls).
pub fn select_next_action<'a>(tasks: &'a [Task], now: NaiveDateTime) -> Option<&'a Task> {
    let today = now.date();

    let mut ranked: Vec<(&Task, i64)> = tasks
        .iter()
        .filter(|task| !task.status.is_closed())
        .map(|task| (task, score(task, today)))
        .collect();

    if ranked.is_empty() {
        return None;
    }

    ranked.sort_by_key(|&(_, task_score)| Reverse(task_score));

    let window = &ranked[..ranked.len().min(SCAN_WINDOW)];
    for level in energy_preference(now.hour()) {
        if let Some(&(task, _)) = window.iter().find(|&&(task, _)| task.energy_needed == level) {
            return Some(task);
        }
    }

    // No energy match in the window: fall back to the top-scored task.
    Some(ranked[0].0)
}
