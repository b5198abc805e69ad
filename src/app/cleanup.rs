//! Usage: Best-effort cleanup hooks for app lifecycle events (exit).

use crate::app::resident::MAIN_WINDOW_LABEL;
use crate::blocking;
use crate::window_state;
use std::sync::atomic::{AtomicBool, Ordering};
use tauri::Manager;

static CLEANUP_STARTED: AtomicBool = AtomicBool::new(false);

pub(crate) async fn cleanup_before_exit(app: &tauri::AppHandle) {
    if CLEANUP_STARTED.swap(true, Ordering::SeqCst) {
        return;
    }

    flush_window_position(app).await;
}

// The frontend persists position on move, but a final flush on exit catches
// the last drag.
async fn flush_window_position(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    let Ok(position) = window.outer_position() else {
        return;
    };

    let app = app.clone();
    let result = blocking::run("cleanup_flush_window_position", move || {
        let mut state = window_state::read(&app);
        state.x = Some(position.x);
        state.y = Some(position.y);
        window_state::write(&app, &state).map(|_| ())
    })
    .await;

    if let Err(err) = result {
        tracing::warn!("exit cleanup: window position flush failed: {}", err);
    }
}
