use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub sessions_total: i64,
    pub focus_sessions: i64,
    pub break_sessions: i64,
    pub focus_seconds: i64,
    pub break_seconds: i64,
    pub interruptions_total: i64,
    pub avg_focus_seconds: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsDayRow {
    pub day: String,
    pub focus_sessions: i64,
    pub break_sessions: i64,
    pub focus_seconds: i64,
    pub interruptions: i64,
}
