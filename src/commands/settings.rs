//! Usage: Settings Tauri commands (read/update settings.json).

use crate::resident::ResidentState;
use crate::{blocking, settings};
use tauri::Manager;

#[tauri::command]
pub(crate) async fn settings_get(app: tauri::AppHandle) -> Result<settings::AppSettings, String> {
    blocking::run("settings_get", move || settings::read(&app)).await
}

#[tauri::command]
pub(crate) async fn settings_set(
    app: tauri::AppHandle,
    settings: settings::AppSettings,
) -> Result<settings::AppSettings, String> {
    let saved = {
        let app = app.clone();
        blocking::run("settings_set", move || settings::write(&app, &settings)).await?
    };

    app.state::<ResidentState>().set_tray_enabled(saved.tray_enabled);
    apply_autostart(&app, saved.auto_start);

    Ok(saved)
}

#[cfg(desktop)]
fn apply_autostart(app: &tauri::AppHandle, enabled: bool) {
    use tauri_plugin_autostart::ManagerExt;

    let autolaunch = app.autolaunch();
    let result = if enabled {
        autolaunch.enable()
    } else {
        autolaunch.disable()
    };

    if let Err(err) = result {
        tracing::warn!(enabled, "autostart update failed: {}", err);
    }
}

#[cfg(not(desktop))]
fn apply_autostart(_app: &tauri::AppHandle, _enabled: bool) {}
