use crate::db;
use rusqlite::{params, Connection};

use super::{compute_start_ts_last_n_days, StatsDayRow};

pub(super) fn daily_series_query(
    conn: &Connection,
    start_ts: i64,
) -> Result<Vec<StatsDayRow>, String> {
    let mut stmt = conn
        .prepare(
            r#"
SELECT
  strftime('%Y-%m-%d', started_at, 'unixepoch', 'localtime') AS day,
  SUM(CASE WHEN kind = 'focus' THEN 1 ELSE 0 END) AS focus_sessions,
  SUM(CASE WHEN kind != 'focus' THEN 1 ELSE 0 END) AS break_sessions,
  SUM(CASE WHEN kind = 'focus' THEN actual_seconds ELSE 0 END) AS focus_seconds,
  SUM(CASE WHEN kind = 'focus' THEN interruptions ELSE 0 END) AS interruptions
FROM sessions
WHERE started_at >= ?1
GROUP BY day
ORDER BY day ASC
"#,
        )
        .map_err(|e| format!("DB_ERROR: failed to prepare daily series query: {e}"))?;

    let rows = stmt
        .query_map(params![start_ts], |row| {
            Ok(StatsDayRow {
                day: row.get("day")?,
                focus_sessions: row.get::<_, Option<i64>>("focus_sessions")?.unwrap_or(0),
                break_sessions: row.get::<_, Option<i64>>("break_sessions")?.unwrap_or(0),
                focus_seconds: row.get::<_, Option<i64>>("focus_seconds")?.unwrap_or(0),
                interruptions: row.get::<_, Option<i64>>("interruptions")?.unwrap_or(0),
            })
        })
        .map_err(|e| format!("DB_ERROR: failed to run daily series query: {e}"))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| format!("DB_ERROR: failed to read daily row: {e}"))?);
    }
    Ok(out)
}

pub fn daily_series(db: &db::Db, days: u32) -> Result<Vec<StatsDayRow>, String> {
    let conn = db.open_connection()?;
    let days = days.clamp(1, 90);
    let start_ts = compute_start_ts_last_n_days(&conn, days)?;

    daily_series_query(&conn, start_ts)
}
