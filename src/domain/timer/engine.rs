//! Usage: Single-instance countdown engine (idle -> running -> paused -> completed).

use super::events::TimerCompletePayload;
use serde::{Deserialize, Serialize};

pub const MAX_TASK_NAME_CHARS: usize = 50;

const MIN_DURATION_SECONDS: i64 = 1;
const MAX_DURATION_SECONDS: i64 = 12 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::ShortBreak => "short_break",
            Self::LongBreak => "long_break",
        }
    }

    pub fn parse(input: &str) -> Result<Self, String> {
        match input {
            "focus" => Ok(Self::Focus),
            "short_break" => Ok(Self::ShortBreak),
            "long_break" => Ok(Self::LongBreak),
            _ => Err(format!("SEC_INVALID_INPUT: unknown timer kind={input}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub kind: TimerKind,
    pub task_name: Option<String>,
    pub total_seconds: i64,
    pub remaining_seconds: i64,
    pub interruptions: u32,
    pub started_at: Option<i64>,
    pub ends_at_ms: Option<i64>,
}

/// The countdown state machine. All methods take `now_ms` so callers (and
/// tests) control the clock; remaining time derives from a wall-clock deadline
/// rather than accumulated ticks, so a slept machine catches up on the next
/// refresh.
pub struct TimerEngine {
    status: TimerStatus,
    kind: TimerKind,
    task_name: Option<String>,
    total_seconds: i64,
    // Authoritative while paused; while running it is re-derived from ends_at_ms.
    remaining_ms: i64,
    interruptions: u32,
    started_at: Option<i64>,
    ends_at_ms: Option<i64>,
    pending_complete: Option<TimerCompletePayload>,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            status: TimerStatus::Idle,
            kind: TimerKind::Focus,
            task_name: None,
            total_seconds: 0,
            remaining_ms: 0,
            interruptions: 0,
            started_at: None,
            ends_at_ms: None,
            pending_complete: None,
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn start(
        &mut self,
        kind: TimerKind,
        task_name: Option<String>,
        total_seconds: i64,
        now_ms: i64,
    ) -> Result<TimerSnapshot, String> {
        match self.status {
            TimerStatus::Idle | TimerStatus::Completed => {}
            TimerStatus::Running => {
                return Err("TIMER_INVALID_STATE: timer is already running".to_string())
            }
            TimerStatus::Paused => {
                return Err(
                    "TIMER_INVALID_STATE: timer is paused; resume or reset it first".to_string(),
                )
            }
        }

        if !(MIN_DURATION_SECONDS..=MAX_DURATION_SECONDS).contains(&total_seconds) {
            return Err(format!(
                "SEC_INVALID_INPUT: duration must be between {MIN_DURATION_SECONDS} and {MAX_DURATION_SECONDS} seconds"
            ));
        }

        let task_name = normalize_task_name(task_name)?;

        self.status = TimerStatus::Running;
        self.kind = kind;
        self.task_name = task_name;
        self.total_seconds = total_seconds;
        self.remaining_ms = total_seconds * 1000;
        self.interruptions = 0;
        self.started_at = Some(now_ms / 1000);
        self.ends_at_ms = Some(now_ms + total_seconds * 1000);
        self.pending_complete = None;

        Ok(self.snapshot())
    }

    pub fn pause(&mut self, now_ms: i64) -> Result<TimerSnapshot, String> {
        self.refresh(now_ms);

        if self.status != TimerStatus::Running {
            return Err("TIMER_INVALID_STATE: timer is not running".to_string());
        }

        self.remaining_ms = self.live_remaining_ms(now_ms);
        self.ends_at_ms = None;
        self.status = TimerStatus::Paused;
        if self.kind == TimerKind::Focus {
            self.interruptions = self.interruptions.saturating_add(1);
        }

        Ok(self.snapshot())
    }

    pub fn resume(&mut self, now_ms: i64) -> Result<TimerSnapshot, String> {
        if self.status != TimerStatus::Paused {
            return Err("TIMER_INVALID_STATE: timer is not paused".to_string());
        }

        self.status = TimerStatus::Running;
        self.ends_at_ms = Some(now_ms + self.remaining_ms);

        Ok(self.snapshot())
    }

    /// Valid from any status; drops any not-yet-consumed completion.
    pub fn reset(&mut self) -> TimerSnapshot {
        *self = Self::new();
        self.snapshot()
    }

    /// Re-derives the countdown from the wall clock. When the deadline has
    /// passed, moves to `Completed` and stages a completion payload for the
    /// ticker to consume via [`Self::take_completion`].
    pub fn refresh(&mut self, now_ms: i64) {
        if self.status != TimerStatus::Running {
            return;
        }
        let Some(ends_at_ms) = self.ends_at_ms else {
            return;
        };
        if now_ms < ends_at_ms {
            return;
        }

        self.status = TimerStatus::Completed;
        self.remaining_ms = 0;
        self.ends_at_ms = None;
        self.pending_complete = Some(TimerCompletePayload {
            kind: self.kind,
            task_name: self.task_name.clone(),
            total_seconds: self.total_seconds,
            interruptions: self.interruptions,
            started_at: self.started_at.unwrap_or(0),
            ended_at: ends_at_ms / 1000,
        });
    }

    /// Returns the staged completion payload at most once per countdown.
    pub fn take_completion(&mut self) -> Option<TimerCompletePayload> {
        self.pending_complete.take()
    }

    pub fn snapshot_at(&self, now_ms: i64) -> TimerSnapshot {
        let remaining_ms = match self.status {
            TimerStatus::Running => self.live_remaining_ms(now_ms),
            _ => self.remaining_ms,
        };

        TimerSnapshot {
            status: self.status,
            kind: self.kind,
            task_name: self.task_name.clone(),
            total_seconds: self.total_seconds,
            // Ceiling so the display shows the full first second.
            remaining_seconds: (remaining_ms + 999) / 1000,
            interruptions: self.interruptions,
            started_at: self.started_at,
            ends_at_ms: self.ends_at_ms,
        }
    }

    fn snapshot(&self) -> TimerSnapshot {
        // Only used right after a mutation, where remaining_ms is current.
        let now_ms = self.ends_at_ms.unwrap_or(0) - self.remaining_ms;
        self.snapshot_at(now_ms)
    }

    fn live_remaining_ms(&self, now_ms: i64) -> i64 {
        match self.ends_at_ms {
            Some(ends_at_ms) => (ends_at_ms - now_ms).max(0),
            None => self.remaining_ms,
        }
    }
}

pub(super) fn normalize_task_name(task_name: Option<String>) -> Result<Option<String>, String> {
    let Some(task_name) = task_name else {
        return Ok(None);
    };

    let trimmed = task_name.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_TASK_NAME_CHARS {
        return Err(format!(
            "SEC_INVALID_INPUT: task name must be at most {MAX_TASK_NAME_CHARS} characters"
        ));
    }

    Ok(Some(trimmed.to_string()))
}
