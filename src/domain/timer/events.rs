//! Timer push events.
//!
//! The ticker task emits `timer:tick` with a [`super::TimerSnapshot`] while the
//! countdown is running, and `timer:complete` exactly once when it crosses zero.

use super::TimerKind;

pub const TICK_EVENT_NAME: &str = "timer:tick";
pub const COMPLETE_EVENT_NAME: &str = "timer:complete";

#[derive(Debug, Clone, serde::Serialize)]
pub struct TimerCompletePayload {
    pub kind: TimerKind,
    pub task_name: Option<String>,
    pub total_seconds: i64,
    pub interruptions: u32,
    pub started_at: i64,
    pub ended_at: i64,
}
