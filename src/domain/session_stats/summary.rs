use crate::db;
use rusqlite::{params, Connection};

use super::{compute_start_ts, parse_range, StatsSummary};

pub(super) fn summary_query(
    conn: &Connection,
    start_ts: Option<i64>,
) -> Result<StatsSummary, String> {
    conn.query_row(
        r#"
SELECT
  COUNT(*) AS sessions_total,
  SUM(CASE WHEN kind = 'focus' THEN 1 ELSE 0 END) AS focus_sessions,
  SUM(CASE WHEN kind != 'focus' THEN 1 ELSE 0 END) AS break_sessions,
  SUM(CASE WHEN kind = 'focus' THEN actual_seconds ELSE 0 END) AS focus_seconds,
  SUM(CASE WHEN kind != 'focus' THEN actual_seconds ELSE 0 END) AS break_seconds,
  SUM(CASE WHEN kind = 'focus' THEN interruptions ELSE 0 END) AS interruptions_total
FROM sessions
WHERE (?1 IS NULL OR started_at >= ?1)
"#,
        params![start_ts],
        |row| {
            let focus_sessions = row.get::<_, Option<i64>>("focus_sessions")?.unwrap_or(0);
            let focus_seconds = row.get::<_, Option<i64>>("focus_seconds")?.unwrap_or(0);

            let avg_focus_seconds = if focus_sessions > 0 {
                Some(focus_seconds / focus_sessions)
            } else {
                None
            };

            Ok(StatsSummary {
                sessions_total: row.get::<_, i64>("sessions_total")?,
                focus_sessions,
                break_sessions: row.get::<_, Option<i64>>("break_sessions")?.unwrap_or(0),
                focus_seconds,
                break_seconds: row.get::<_, Option<i64>>("break_seconds")?.unwrap_or(0),
                interruptions_total: row
                    .get::<_, Option<i64>>("interruptions_total")?
                    .unwrap_or(0),
                avg_focus_seconds,
            })
        },
    )
    .map_err(|e| format!("DB_ERROR: failed to query session summary: {e}"))
}

pub fn summary(db: &db::Db, range: &str) -> Result<StatsSummary, String> {
    let conn = db.open_connection()?;
    let range = parse_range(range)?;
    let start_ts = compute_start_ts(&conn, range)?;

    summary_query(&conn, start_ts)
}
