//! Usage: Wall-clock countdown state machine and its push-event payloads.

mod engine;
mod events;

pub use engine::{TimerEngine, TimerKind, TimerSnapshot, TimerStatus, MAX_TASK_NAME_CHARS};
pub use events::{TimerCompletePayload, COMPLETE_EVENT_NAME, TICK_EVENT_NAME};

#[cfg(test)]
mod tests;
