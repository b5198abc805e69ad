//! Usage: Persisted application settings (schema + read/write helpers).

use crate::app_paths;
use crate::timer::TimerKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 2;
const SCHEMA_VERSION_ADD_NOTIFY_ON_COMPLETE: u32 = 2;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;
const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;
const DEFAULT_NOTIFY_ON_COMPLETE: bool = true;

const MIN_PHASE_MINUTES: u32 = 1;
const MAX_PHASE_MINUTES: u32 = 180;
const MAX_LONG_BREAK_INTERVAL: u32 = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub schema_version: u32,
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    // Number of focus sessions the UI suggests before a long break.
    pub long_break_interval: u32,
    pub auto_start: bool,
    pub tray_enabled: bool,
    // Emit a system notice when the countdown completes (default enabled).
    pub notify_on_complete: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            short_break_minutes: DEFAULT_SHORT_BREAK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
            auto_start: false,
            tray_enabled: true,
            notify_on_complete: DEFAULT_NOTIFY_ON_COMPLETE,
        }
    }
}

impl AppSettings {
    pub fn duration_seconds(&self, kind: TimerKind) -> i64 {
        let minutes = match kind {
            TimerKind::Focus => self.focus_minutes,
            TimerKind::ShortBreak => self.short_break_minutes,
            TimerKind::LongBreak => self.long_break_minutes,
        };
        i64::from(minutes) * 60
    }
}

fn sanitize_phase_minutes(settings: &mut AppSettings) -> bool {
    let mut changed = false;

    for minutes in [
        &mut settings.focus_minutes,
        &mut settings.short_break_minutes,
        &mut settings.long_break_minutes,
    ] {
        if *minutes < MIN_PHASE_MINUTES {
            *minutes = MIN_PHASE_MINUTES;
            changed = true;
        }
        if *minutes > MAX_PHASE_MINUTES {
            *minutes = MAX_PHASE_MINUTES;
            changed = true;
        }
    }

    changed
}

fn sanitize_long_break_interval(settings: &mut AppSettings) -> bool {
    let mut changed = false;

    if settings.long_break_interval == 0 {
        settings.long_break_interval = DEFAULT_LONG_BREAK_INTERVAL;
        changed = true;
    }
    if settings.long_break_interval > MAX_LONG_BREAK_INTERVAL {
        settings.long_break_interval = MAX_LONG_BREAK_INTERVAL;
        changed = true;
    }

    changed
}

fn migrate_add_notify_on_complete(
    settings: &mut AppSettings,
    schema_version_present: bool,
) -> bool {
    // v2: Add notify_on_complete toggle (default enabled).
    if schema_version_present
        && settings.schema_version >= SCHEMA_VERSION_ADD_NOTIFY_ON_COMPLETE
    {
        return false;
    }

    let mut changed = false;

    // If schema_version is missing, force a write to persist schema_version so we don't keep
    // "migrating" on every startup.
    if !schema_version_present {
        changed = true;
    }

    if settings.schema_version != SCHEMA_VERSION_ADD_NOTIFY_ON_COMPLETE {
        settings.schema_version = SCHEMA_VERSION_ADD_NOTIFY_ON_COMPLETE;
        changed = true;
    }

    changed
}

fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join("settings.json"))
}

fn parse_settings_json(content: &str) -> Result<(AppSettings, bool), String> {
    let raw: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    let schema_version_present = raw.get("schema_version").is_some();
    let settings: AppSettings =
        serde_json::from_value(raw).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    Ok((settings, schema_version_present))
}

pub fn read(app: &tauri::AppHandle) -> Result<AppSettings, String> {
    let path = settings_path(app)?;

    if !path.exists() {
        let settings = AppSettings::default();
        // Best-effort: create default settings.json on first read to make the config discoverable/editable.
        let _ = write(app, &settings);
        return Ok(settings);
    }

    let content =
        std::fs::read_to_string(&path).map_err(|e| format!("failed to read settings: {e}"))?;
    let (mut settings, schema_version_present) = parse_settings_json(&content)?;

    let mut repaired = false;
    repaired |= migrate_add_notify_on_complete(&mut settings, schema_version_present);
    repaired |= sanitize_phase_minutes(&mut settings);
    repaired |= sanitize_long_break_interval(&mut settings);
    if repaired {
        // Best-effort: persist repaired values while keeping read semantics.
        let _ = write(app, &settings);
    }

    Ok(settings)
}

pub fn write(app: &tauri::AppHandle, settings: &AppSettings) -> Result<AppSettings, String> {
    for (field, minutes) in [
        ("focus_minutes", settings.focus_minutes),
        ("short_break_minutes", settings.short_break_minutes),
        ("long_break_minutes", settings.long_break_minutes),
    ] {
        if !(MIN_PHASE_MINUTES..=MAX_PHASE_MINUTES).contains(&minutes) {
            return Err(format!(
                "SEC_INVALID_INPUT: {field} must be between {MIN_PHASE_MINUTES} and {MAX_PHASE_MINUTES}"
            ));
        }
    }
    if settings.long_break_interval == 0 {
        return Err("SEC_INVALID_INPUT: long_break_interval must be >= 1".to_string());
    }
    if settings.long_break_interval > MAX_LONG_BREAK_INTERVAL {
        return Err(format!(
            "SEC_INVALID_INPUT: long_break_interval must be <= {MAX_LONG_BREAK_INTERVAL}"
        ));
    }

    let path = settings_path(app)?;
    let tmp_path = path.with_file_name("settings.json.tmp");
    let backup_path = path.with_file_name("settings.json.bak");

    let content = serde_json::to_vec_pretty(settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;

    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("failed to write temp settings file: {e}"))?;

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    if path.exists() {
        std::fs::rename(&path, &backup_path)
            .map_err(|e| format!("failed to create settings backup: {e}"))?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::rename(&backup_path, &path);
        return Err(format!("failed to finalize settings: {e}"));
    }

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    Ok(settings.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_pomodoro_lengths() {
        let settings = AppSettings::default();
        assert_eq!(settings.schema_version, SCHEMA_VERSION);
        assert_eq!(settings.duration_seconds(TimerKind::Focus), 25 * 60);
        assert_eq!(settings.duration_seconds(TimerKind::ShortBreak), 5 * 60);
        assert_eq!(settings.duration_seconds(TimerKind::LongBreak), 15 * 60);
        assert!(settings.tray_enabled);
        assert!(settings.notify_on_complete);
    }

    #[test]
    fn parse_tolerates_missing_fields_and_flags_absent_schema_version() {
        let (settings, schema_version_present) =
            parse_settings_json(r#"{"focus_minutes": 50}"#).expect("parse partial settings");
        assert!(!schema_version_present);
        assert_eq!(settings.focus_minutes, 50);
        assert_eq!(settings.short_break_minutes, DEFAULT_SHORT_BREAK_MINUTES);
    }

    #[test]
    fn sanitize_clamps_out_of_range_minutes() {
        let mut settings = AppSettings {
            focus_minutes: 0,
            short_break_minutes: 9999,
            ..AppSettings::default()
        };

        assert!(sanitize_phase_minutes(&mut settings));
        assert_eq!(settings.focus_minutes, MIN_PHASE_MINUTES);
        assert_eq!(settings.short_break_minutes, MAX_PHASE_MINUTES);

        // Already-valid settings are untouched.
        assert!(!sanitize_phase_minutes(&mut settings));
    }

    #[test]
    fn sanitize_repairs_long_break_interval() {
        let mut settings = AppSettings {
            long_break_interval: 0,
            ..AppSettings::default()
        };
        assert!(sanitize_long_break_interval(&mut settings));
        assert_eq!(settings.long_break_interval, DEFAULT_LONG_BREAK_INTERVAL);

        settings.long_break_interval = 100;
        assert!(sanitize_long_break_interval(&mut settings));
        assert_eq!(settings.long_break_interval, MAX_LONG_BREAK_INTERVAL);
    }

    #[test]
    fn migrate_persists_schema_version_when_missing() {
        let mut settings = AppSettings {
            schema_version: 1,
            ..AppSettings::default()
        };

        assert!(migrate_add_notify_on_complete(&mut settings, true));
        assert_eq!(settings.schema_version, SCHEMA_VERSION_ADD_NOTIFY_ON_COMPLETE);

        // Up-to-date config is left alone.
        assert!(!migrate_add_notify_on_complete(&mut settings, true));

        // Missing schema_version forces a persist even when values already match.
        assert!(migrate_add_notify_on_complete(&mut settings, false));
    }
}
