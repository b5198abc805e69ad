//! Usage: 1s background tick loop driving countdown refresh and push events.

use crate::app::app_state::TimerEngineState;
use crate::app::notice;
use crate::shared::mutex_ext::MutexExt;
use crate::shared::time::now_unix_millis;
use crate::timer::{
    TimerCompletePayload, TimerKind, TimerSnapshot, TimerStatus, COMPLETE_EVENT_NAME,
    TICK_EVENT_NAME,
};
use crate::{blocking, settings};
use std::time::Duration;
use tauri::{Emitter, Manager};

pub(crate) fn spawn(app: tauri::AppHandle) {
    tauri::async_runtime::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            tick_once(&app).await;
        }
    });
}

async fn tick_once(app: &tauri::AppHandle) {
    let now_ms = now_unix_millis();

    let (completion, snapshot) = {
        let state = app.state::<TimerEngineState>();
        let mut engine = state.0.lock_or_recover();
        engine.refresh(now_ms);
        let completion = engine.take_completion();
        let snapshot = engine.snapshot_at(now_ms);
        (completion, snapshot)
    };

    if let Some(payload) = completion {
        emit_complete(app, payload).await;
        return;
    }

    if snapshot.status == TimerStatus::Running {
        emit_tick(app, &snapshot);
    }
}

pub(crate) fn emit_tick(app: &tauri::AppHandle, snapshot: &TimerSnapshot) {
    if let Err(err) = app.emit(TICK_EVENT_NAME, snapshot) {
        tracing::warn!("failed to emit timer tick: {}", err);
    }
}

async fn emit_complete(app: &tauri::AppHandle, payload: TimerCompletePayload) {
    tracing::info!(
        kind = payload.kind.as_str(),
        total_seconds = payload.total_seconds,
        interruptions = payload.interruptions,
        "countdown completed"
    );

    if let Err(err) = app.emit(COMPLETE_EVENT_NAME, &payload) {
        tracing::warn!("failed to emit timer completion: {}", err);
    }

    let cfg = match blocking::run("ticker_read_settings", {
        let app = app.clone();
        move || Ok(settings::read(&app).unwrap_or_default())
    })
    .await
    {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!("settings read failed, using defaults: {}", err);
            settings::AppSettings::default()
        }
    };

    if cfg.notify_on_complete {
        let body = match payload.kind {
            TimerKind::Focus => "Focus phase finished. Time for a break.",
            TimerKind::ShortBreak | TimerKind::LongBreak => "Break is over. Back to focus.",
        };
        let result = notice::emit(
            app,
            notice::build(notice::NoticeLevel::Success, None, body.to_string()),
        );
        if let Err(err) = result {
            tracing::warn!("completion notice failed: {}", err);
        }
    }
}
