//! Usage: In-app notification events.
//!
//! Frontend listens on `notice:notify` and forwards the payload to the system
//! notification plugin; Rust callers go through `notice::emit`.

use tauri::Emitter;

pub const NOTICE_EVENT_NAME: &str = "notice:notify";

const NOTICE_PREFIX: &str = "Tomodoro";

#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct NoticeEventPayload {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

fn default_title(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "Info",
        NoticeLevel::Success => "Done",
        NoticeLevel::Warning => "Heads up",
        NoticeLevel::Error => "Error",
    }
}

fn normalize_optional_title(title: Option<String>) -> Option<String> {
    let title = title?;
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn format_title(level: NoticeLevel, title: Option<String>) -> String {
    let title = normalize_optional_title(title).unwrap_or_else(|| default_title(level).to_string());
    format!("{NOTICE_PREFIX} · {title}")
}

pub fn build(level: NoticeLevel, title: Option<String>, body: String) -> NoticeEventPayload {
    NoticeEventPayload {
        level,
        title: format_title(level, title),
        body,
    }
}

pub fn emit(app: &tauri::AppHandle, payload: NoticeEventPayload) -> Result<(), String> {
    app.emit(NOTICE_EVENT_NAME, payload)
        .map_err(|e| format!("NOTICE_EMIT: {e}"))?;
    Ok(())
}
