//! Usage: Session history and statistics Tauri commands.

use crate::app_state::{ensure_db_ready, DbInitState};
use crate::{blocking, session_stats, sessions};

#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub(crate) async fn session_save(
    app: tauri::AppHandle,
    db_state: tauri::State<'_, DbInitState>,
    kind: String,
    task_name: Option<String>,
    planned_seconds: i64,
    actual_seconds: i64,
    interruptions: i64,
    started_at: i64,
    ended_at: i64,
) -> Result<sessions::SessionSummary, String> {
    let db = ensure_db_ready(app, db_state.inner()).await?;
    blocking::run("session_save", move || {
        sessions::save(
            &db,
            &sessions::NewSession {
                kind,
                task_name,
                planned_seconds,
                actual_seconds,
                interruptions,
                started_at,
                ended_at,
            },
        )
    })
    .await
}

#[tauri::command]
pub(crate) async fn sessions_list(
    app: tauri::AppHandle,
    db_state: tauri::State<'_, DbInitState>,
    limit: Option<i64>,
) -> Result<Vec<sessions::SessionSummary>, String> {
    let db = ensure_db_ready(app, db_state.inner()).await?;
    blocking::run("sessions_list", move || sessions::list_recent(&db, limit)).await
}

#[tauri::command]
pub(crate) async fn sessions_clear_all(
    app: tauri::AppHandle,
    db_state: tauri::State<'_, DbInitState>,
) -> Result<i64, String> {
    let db = ensure_db_ready(app, db_state.inner()).await?;
    blocking::run("sessions_clear_all", move || sessions::clear_all(&db)).await
}

#[tauri::command]
pub(crate) async fn session_stats_summary(
    app: tauri::AppHandle,
    db_state: tauri::State<'_, DbInitState>,
    range: String,
) -> Result<session_stats::StatsSummary, String> {
    let db = ensure_db_ready(app, db_state.inner()).await?;
    blocking::run("session_stats_summary", move || {
        session_stats::summary(&db, &range)
    })
    .await
}

#[tauri::command]
pub(crate) async fn session_stats_daily(
    app: tauri::AppHandle,
    db_state: tauri::State<'_, DbInitState>,
    days: u32,
) -> Result<Vec<session_stats::StatsDayRow>, String> {
    let db = ensure_db_ready(app, db_state.inner()).await?;
    blocking::run("session_stats_daily", move || {
        session_stats::daily_series(&db, days)
    })
    .await
}
