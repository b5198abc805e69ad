//! Usage: Countdown timer Tauri commands backed by the in-memory engine.

use crate::app::app_state::TimerEngineState;
use crate::app::ticker;
use crate::shared::mutex_ext::MutexExt;
use crate::shared::time::now_unix_millis;
use crate::timer::{TimerKind, TimerSnapshot};
use crate::{blocking, settings};

#[tauri::command]
pub(crate) async fn timer_start(
    app: tauri::AppHandle,
    timer_state: tauri::State<'_, TimerEngineState>,
    kind: String,
    task_name: Option<String>,
    duration_seconds: Option<i64>,
) -> Result<TimerSnapshot, String> {
    let kind = TimerKind::parse(&kind)?;

    let total_seconds = match duration_seconds {
        Some(seconds) => seconds,
        None => {
            let app = app.clone();
            blocking::run("timer_start_read_settings", move || {
                Ok(settings::read(&app).unwrap_or_default())
            })
            .await?
            .duration_seconds(kind)
        }
    };

    let snapshot = {
        let mut engine = timer_state.0.lock_or_recover();
        engine.start(kind, task_name, total_seconds, now_unix_millis())?
    };

    ticker::emit_tick(&app, &snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub(crate) fn timer_pause(
    app: tauri::AppHandle,
    timer_state: tauri::State<'_, TimerEngineState>,
) -> Result<TimerSnapshot, String> {
    let snapshot = {
        let mut engine = timer_state.0.lock_or_recover();
        engine.pause(now_unix_millis())?
    };

    ticker::emit_tick(&app, &snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub(crate) fn timer_resume(
    app: tauri::AppHandle,
    timer_state: tauri::State<'_, TimerEngineState>,
) -> Result<TimerSnapshot, String> {
    let snapshot = {
        let mut engine = timer_state.0.lock_or_recover();
        engine.resume(now_unix_millis())?
    };

    ticker::emit_tick(&app, &snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub(crate) fn timer_reset(
    app: tauri::AppHandle,
    timer_state: tauri::State<'_, TimerEngineState>,
) -> Result<TimerSnapshot, String> {
    let snapshot = {
        let mut engine = timer_state.0.lock_or_recover();
        engine.reset()
    };

    ticker::emit_tick(&app, &snapshot);
    Ok(snapshot)
}

// Refreshes against the wall clock first, so a snapshot requested after a
// sleep reflects completion. The staged completion event itself stays queued
// for the ticker.
#[tauri::command]
pub(crate) fn timer_state_get(
    timer_state: tauri::State<'_, TimerEngineState>,
) -> Result<TimerSnapshot, String> {
    let now_ms = now_unix_millis();
    let mut engine = timer_state.0.lock_or_recover();
    engine.refresh(now_ms);
    Ok(engine.snapshot_at(now_ms))
}
