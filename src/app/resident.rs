//! Usage: Desktop resident mode (tray + window lifecycle hooks).

use std::sync::atomic::{AtomicBool, Ordering};

pub const MAIN_WINDOW_LABEL: &str = "main";
const TRAY_ID: &str = "main-tray";
const TRAY_MENU_TOGGLE_ID: &str = "tray.toggle";
const TRAY_MENU_TIMER_ID: &str = "tray.timer";
const TRAY_MENU_QUIT_ID: &str = "tray.quit";

pub struct ResidentState {
    tray_enabled: AtomicBool,
}

impl Default for ResidentState {
    fn default() -> Self {
        Self {
            tray_enabled: AtomicBool::new(true),
        }
    }
}

impl ResidentState {
    pub fn set_tray_enabled(&self, enabled: bool) {
        self.tray_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn tray_enabled(&self) -> bool {
        self.tray_enabled.load(Ordering::Relaxed)
    }
}

#[cfg(not(desktop))]
pub fn setup_tray(_app: &tauri::AppHandle) -> Result<(), String> {
    Ok(())
}

#[cfg(not(desktop))]
pub fn show_main_window(_app: &tauri::AppHandle) {}

#[cfg(not(desktop))]
pub fn on_window_event(_window: &tauri::Window, _event: &tauri::WindowEvent) {}

#[cfg(desktop)]
use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
#[cfg(desktop)]
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
#[cfg(desktop)]
use tauri::Manager;

#[cfg(desktop)]
pub fn setup_tray(app: &tauri::AppHandle) -> Result<(), String> {
    let toggle_item = MenuItem::with_id(app, TRAY_MENU_TOGGLE_ID, "Show / Hide", true, None::<&str>)
        .map_err(|e| format!("failed to create tray toggle menu item: {e}"))?;
    let timer_item = MenuItem::with_id(app, TRAY_MENU_TIMER_ID, "Start / Pause", true, None::<&str>)
        .map_err(|e| format!("failed to create tray timer menu item: {e}"))?;
    let quit_item = MenuItem::with_id(app, TRAY_MENU_QUIT_ID, "Quit", true, None::<&str>)
        .map_err(|e| format!("failed to create tray quit menu item: {e}"))?;
    let separator = PredefinedMenuItem::separator(app)
        .map_err(|e| format!("failed to create tray menu separator: {e}"))?;

    let menu = Menu::with_items(app, &[&timer_item, &toggle_item, &separator, &quit_item])
        .map_err(|e| format!("failed to create tray menu: {e}"))?;

    let toggle_id = toggle_item.id().clone();
    let timer_id = timer_item.id().clone();
    let quit_id = quit_item.id().clone();

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .title("Tomodoro")
        .tooltip("Tomodoro")
        .menu(&menu);

    tray_builder
        .show_menu_on_left_click(false)
        .on_menu_event(move |app, event| {
            if event.id == quit_id {
                app.exit(0);
                return;
            }
            if event.id == toggle_id {
                toggle_main_window(app);
                return;
            }
            if event.id == timer_id {
                if let Err(err) = toggle_timer(app) {
                    tracing::warn!("tray timer toggle failed: {}", err);
                }
            }
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button,
                button_state,
                ..
            } = event
            {
                if button == MouseButton::Left && button_state == MouseButtonState::Up {
                    show_main_window(tray.app_handle());
                }
            }
        })
        .build(app)
        .map_err(|e| format!("failed to build tray icon: {e}"))?;

    Ok(())
}

// Running pauses, paused resumes, anything else starts a fresh focus phase
// with the configured duration.
#[cfg(desktop)]
fn toggle_timer(app: &tauri::AppHandle) -> Result<(), String> {
    use crate::app::app_state::TimerEngineState;
    use crate::app::ticker;
    use crate::settings;
    use crate::shared::mutex_ext::MutexExt;
    use crate::shared::time::now_unix_millis;
    use crate::timer::{TimerKind, TimerStatus};

    let state = app.state::<TimerEngineState>();
    let now_ms = now_unix_millis();

    let snapshot = {
        let mut engine = state.0.lock_or_recover();
        match engine.status() {
            TimerStatus::Running => engine.pause(now_ms)?,
            TimerStatus::Paused => engine.resume(now_ms)?,
            TimerStatus::Idle | TimerStatus::Completed => {
                let cfg = settings::read(app).unwrap_or_default();
                engine.start(
                    TimerKind::Focus,
                    None,
                    cfg.duration_seconds(TimerKind::Focus),
                    now_ms,
                )?
            }
        }
    };

    ticker::emit_tick(app, &snapshot);
    Ok(())
}

#[cfg(desktop)]
pub fn show_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let _ = window.show();
    let _ = window.unminimize();
    let _ = window.set_focus();
}

#[cfg(desktop)]
fn toggle_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let is_visible = window.is_visible().unwrap_or(false);
    let is_minimized = window.is_minimized().unwrap_or(false);

    if !is_visible || is_minimized {
        show_main_window(app);
        return;
    }

    let _ = window.hide();
}

#[cfg(desktop)]
pub fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    let tauri::WindowEvent::CloseRequested { api, .. } = event else {
        return;
    };

    api.prevent_close();

    let resident = window.state::<ResidentState>();
    if resident.tray_enabled() {
        let _ = window.hide();
    } else {
        let _ = window.minimize();
    }
}
