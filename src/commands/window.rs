//! Usage: Main-window Tauri commands (position, opacity, always-on-top).
//!
//! Position and always-on-top apply natively; opacity is persisted here and
//! rendered by the frontend, since the window API has no portable opacity.

use crate::resident::MAIN_WINDOW_LABEL;
use crate::{blocking, window_state};
use tauri::{Manager, PhysicalPosition};

fn main_window(app: &tauri::AppHandle) -> Result<tauri::WebviewWindow, String> {
    app.get_webview_window(MAIN_WINDOW_LABEL)
        .ok_or_else(|| "WINDOW_NOT_FOUND: main window is not available".to_string())
}

#[tauri::command]
pub(crate) async fn window_state_get(
    app: tauri::AppHandle,
) -> Result<window_state::WindowState, String> {
    let live_position = main_window(&app)
        .ok()
        .and_then(|window| window.outer_position().ok());

    let mut state = {
        let app = app.clone();
        blocking::run("window_state_get", move || Ok(window_state::read(&app))).await?
    };

    if let Some(position) = live_position {
        state.x = Some(position.x);
        state.y = Some(position.y);
    }

    Ok(state)
}

#[tauri::command]
pub(crate) async fn window_position_set(
    app: tauri::AppHandle,
    x: i32,
    y: i32,
) -> Result<window_state::WindowState, String> {
    let window = main_window(&app)?;
    window
        .set_position(PhysicalPosition::new(x, y))
        .map_err(|e| format!("WINDOW_ERROR: failed to move window: {e}"))?;

    blocking::run("window_position_set", move || {
        let mut state = window_state::read(&app);
        state.x = Some(x);
        state.y = Some(y);
        window_state::write(&app, &state)
    })
    .await
}

#[tauri::command]
pub(crate) async fn window_opacity_set(
    app: tauri::AppHandle,
    opacity: f64,
) -> Result<window_state::WindowState, String> {
    blocking::run("window_opacity_set", move || {
        let mut state = window_state::read(&app);
        state.opacity = opacity;
        window_state::write(&app, &state)
    })
    .await
}

#[tauri::command]
pub(crate) async fn window_always_on_top_set(
    app: tauri::AppHandle,
    enabled: bool,
) -> Result<window_state::WindowState, String> {
    let window = main_window(&app)?;
    window
        .set_always_on_top(enabled)
        .map_err(|e| format!("WINDOW_ERROR: failed to set always-on-top: {e}"))?;

    blocking::run("window_always_on_top_set", move || {
        let mut state = window_state::read(&app);
        state.always_on_top = enabled;
        window_state::write(&app, &state)
    })
    .await
}
