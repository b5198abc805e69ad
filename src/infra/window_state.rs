//! Usage: Persisted main-window state (position, opacity, always-on-top).

use crate::app_paths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const WINDOW_STATE_FILE: &str = "window-state.json";

pub const MIN_OPACITY: f64 = 0.2;
pub const MAX_OPACITY: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowState {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub opacity: f64,
    pub always_on_top: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            opacity: MAX_OPACITY,
            always_on_top: false,
        }
    }
}

pub fn clamp_opacity(opacity: f64) -> f64 {
    if !opacity.is_finite() {
        return MAX_OPACITY;
    }
    opacity.clamp(MIN_OPACITY, MAX_OPACITY)
}

fn sanitize(state: &mut WindowState) -> bool {
    let clamped = clamp_opacity(state.opacity);
    if clamped != state.opacity {
        state.opacity = clamped;
        return true;
    }
    false
}

fn state_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join(WINDOW_STATE_FILE))
}

/// Reads the persisted window state; a missing or corrupt file yields defaults.
pub fn read(app: &tauri::AppHandle) -> WindowState {
    let Ok(path) = state_path(app) else {
        return WindowState::default();
    };
    let Ok(content) = std::fs::read_to_string(&path) else {
        return WindowState::default();
    };

    let mut state: WindowState = match serde_json::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            tracing::warn!("invalid {WINDOW_STATE_FILE}; falling back to defaults: {err}");
            return WindowState::default();
        }
    };

    sanitize(&mut state);
    state
}

pub fn write(app: &tauri::AppHandle, state: &WindowState) -> Result<WindowState, String> {
    if !state.opacity.is_finite()
        || state.opacity < MIN_OPACITY
        || state.opacity > MAX_OPACITY
    {
        return Err(format!(
            "SEC_INVALID_INPUT: opacity must be between {MIN_OPACITY} and {MAX_OPACITY}"
        ));
    }

    let path = state_path(app)?;
    let tmp_path = path.with_file_name("window-state.json.tmp");

    let content = serde_json::to_vec_pretty(state)
        .map_err(|e| format!("failed to serialize window state: {e}"))?;

    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("failed to write temp window state file: {e}"))?;
    std::fs::rename(&tmp_path, &path)
        .map_err(|e| format!("failed to finalize window state: {e}"))?;

    Ok(state.clone())
}
