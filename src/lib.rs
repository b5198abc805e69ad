mod app;
mod commands;
mod domain;
mod infra;
mod shared;

pub(crate) use app::{app_state, notice, resident};
pub(crate) use domain::{session_stats, sessions, timer};
pub(crate) use infra::{app_paths, db, settings, window_state};
pub(crate) use shared::blocking;

use app_state::{ensure_db_ready, DbInitState, TimerEngineState};
use commands::*;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default()
        .manage(DbInitState::default())
        .manage(TimerEngineState::default())
        .manage(resident::ResidentState::default())
        .plugin(tauri_plugin_opener::init());

    #[cfg(desktop)]
    let builder = builder
        .plugin(tauri_plugin_autostart::Builder::new().build())
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            resident::show_main_window(app);
        }));

    let app = builder
        .on_window_event(resident::on_window_event)
        .setup(|app| {
            app::logging::init(app.handle());

            #[cfg(desktop)]
            if let Err(err) = resident::setup_tray(app.handle()) {
                tracing::error!("tray setup failed: {}", err);
            }

            restore_main_window(app.handle());

            let app_handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                let db_state = app_handle.state::<DbInitState>();
                if let Err(err) = ensure_db_ready(app_handle.clone(), db_state.inner()).await {
                    tracing::error!("database init failed: {}", err);
                }

                let cfg = match blocking::run("startup_read_settings", {
                    let app_handle = app_handle.clone();
                    move || Ok(settings::read(&app_handle).unwrap_or_default())
                })
                .await
                {
                    Ok(cfg) => cfg,
                    Err(err) => {
                        tracing::warn!("settings read failed, using defaults: {}", err);
                        settings::AppSettings::default()
                    }
                };

                app_handle
                    .state::<resident::ResidentState>()
                    .set_tray_enabled(cfg.tray_enabled);
            });

            app::ticker::spawn(app.handle().clone());

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            timer_start,
            timer_pause,
            timer_resume,
            timer_reset,
            timer_state_get,
            session_save,
            sessions_list,
            sessions_clear_all,
            session_stats_summary,
            session_stats_daily,
            settings_get,
            settings_set,
            window_state_get,
            window_position_set,
            window_opacity_set,
            window_always_on_top_set,
            app_about_get,
            app_exit,
            notice_send
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::ExitRequested { api, code, .. } = &event {
            if *code != Some(tauri::RESTART_EXIT_CODE) {
                tracing::info!("exit requested, running cleanup...");
                api.prevent_exit();

                let app_handle = app_handle.clone();
                tauri::async_runtime::spawn(async move {
                    app::cleanup::cleanup_before_exit(&app_handle).await;
                    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                    std::process::exit(0);
                });
            }
            return;
        }

        #[cfg(target_os = "macos")]
        if let tauri::RunEvent::Reopen {
            has_visible_windows,
            ..
        } = event
        {
            if !has_visible_windows {
                resident::show_main_window(app_handle);
            }
        }
    });
}

// Position and always-on-top come back natively; opacity is handed to the
// frontend via `window_state_get`.
fn restore_main_window(app: &tauri::AppHandle) {
    let state = window_state::read(app);

    let Some(window) = app.get_webview_window(resident::MAIN_WINDOW_LABEL) else {
        return;
    };

    if let (Some(x), Some(y)) = (state.x, state.y) {
        if let Err(err) = window.set_position(tauri::PhysicalPosition::new(x, y)) {
            tracing::warn!("window position restore failed: {}", err);
        }
    }

    if state.always_on_top {
        if let Err(err) = window.set_always_on_top(true) {
            tracing::warn!("always-on-top restore failed: {}", err);
        }
    }
}
