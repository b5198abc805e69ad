//! Usage: Completed-session history persistence backed by sqlite.

use crate::db;
use crate::shared::time::now_unix_seconds;
use crate::timer::{TimerKind, MAX_TASK_NAME_CHARS};
use rusqlite::{params, Connection};
use serde::Serialize;

const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 500;

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: i64,
    pub kind: String,
    pub task_name: Option<String>,
    pub planned_seconds: i64,
    pub actual_seconds: i64,
    pub interruptions: i64,
    pub started_at: i64,
    pub ended_at: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub kind: String,
    pub task_name: Option<String>,
    pub planned_seconds: i64,
    pub actual_seconds: i64,
    pub interruptions: i64,
    pub started_at: i64,
    pub ended_at: i64,
}

fn validate_new_session(input: &NewSession) -> Result<(TimerKind, Option<String>), String> {
    let kind = TimerKind::parse(&input.kind)?;

    let task_name = match input.task_name.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(trimmed) => {
            if trimmed.chars().count() > MAX_TASK_NAME_CHARS {
                return Err(format!(
                    "SEC_INVALID_INPUT: task name must be at most {MAX_TASK_NAME_CHARS} characters"
                ));
            }
            Some(trimmed.to_string())
        }
    };

    if input.planned_seconds <= 0 {
        return Err("SEC_INVALID_INPUT: planned_seconds must be positive".to_string());
    }
    if input.actual_seconds < 0 {
        return Err("SEC_INVALID_INPUT: actual_seconds must not be negative".to_string());
    }
    if input.started_at <= 0 {
        return Err("SEC_INVALID_INPUT: started_at must be a unix timestamp".to_string());
    }
    if input.ended_at < input.started_at {
        return Err("SEC_INVALID_INPUT: ended_at must not precede started_at".to_string());
    }
    if input.interruptions < 0 {
        return Err("SEC_INVALID_INPUT: interruptions must not be negative".to_string());
    }

    Ok((kind, task_name))
}

fn row_to_summary(row: &rusqlite::Row<'_>) -> Result<SessionSummary, rusqlite::Error> {
    Ok(SessionSummary {
        id: row.get("id")?,
        kind: row.get("kind")?,
        task_name: row.get("task_name")?,
        planned_seconds: row.get("planned_seconds")?,
        actual_seconds: row.get("actual_seconds")?,
        interruptions: row.get("interruptions")?,
        started_at: row.get("started_at")?,
        ended_at: row.get("ended_at")?,
        created_at: row.get("created_at")?,
    })
}

fn get_by_id(conn: &Connection, session_id: i64) -> Result<SessionSummary, String> {
    use rusqlite::OptionalExtension;

    conn.query_row(
        r#"
SELECT
  id,
  kind,
  task_name,
  planned_seconds,
  actual_seconds,
  interruptions,
  started_at,
  ended_at,
  created_at
FROM sessions
WHERE id = ?1
"#,
        params![session_id],
        row_to_summary,
    )
    .optional()
    .map_err(|e| format!("DB_ERROR: failed to query session: {e}"))?
    .ok_or_else(|| "DB_NOT_FOUND: session not found".to_string())
}

pub(crate) fn save_with_conn(
    conn: &Connection,
    input: &NewSession,
    now: i64,
) -> Result<SessionSummary, String> {
    let (kind, task_name) = validate_new_session(input)?;

    conn.execute(
        r#"
INSERT INTO sessions(
  kind,
  task_name,
  planned_seconds,
  actual_seconds,
  interruptions,
  started_at,
  ended_at,
  created_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#,
        params![
            kind.as_str(),
            task_name,
            input.planned_seconds,
            input.actual_seconds,
            input.interruptions,
            input.started_at,
            input.ended_at,
            now
        ],
    )
    .map_err(|e| format!("DB_ERROR: failed to insert session: {e}"))?;

    get_by_id(conn, conn.last_insert_rowid())
}

pub(crate) fn list_recent_with_conn(
    conn: &Connection,
    limit: Option<i64>,
) -> Result<Vec<SessionSummary>, String> {
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if limit < 1 {
        return Err("SEC_INVALID_INPUT: limit must be >= 1".to_string());
    }
    let limit = limit.min(MAX_LIST_LIMIT);

    let mut stmt = conn
        .prepare(
            r#"
SELECT
  id,
  kind,
  task_name,
  planned_seconds,
  actual_seconds,
  interruptions,
  started_at,
  ended_at,
  created_at
FROM sessions
ORDER BY started_at DESC, id DESC
LIMIT ?1
"#,
        )
        .map_err(|e| format!("DB_ERROR: failed to prepare query: {e}"))?;

    let rows = stmt
        .query_map(params![limit], row_to_summary)
        .map_err(|e| format!("DB_ERROR: failed to list sessions: {e}"))?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row.map_err(|e| format!("DB_ERROR: failed to read session row: {e}"))?);
    }

    Ok(items)
}

pub(crate) fn clear_all_with_conn(conn: &Connection) -> Result<i64, String> {
    let deleted = conn
        .execute("DELETE FROM sessions", [])
        .map_err(|e| format!("DB_ERROR: failed to clear sessions: {e}"))?;

    Ok(deleted as i64)
}

pub fn save(db: &db::Db, input: &NewSession) -> Result<SessionSummary, String> {
    let conn = db.open_connection()?;
    save_with_conn(&conn, input, now_unix_seconds())
}

pub fn list_recent(db: &db::Db, limit: Option<i64>) -> Result<Vec<SessionSummary>, String> {
    let conn = db.open_connection()?;
    list_recent_with_conn(&conn, limit)
}

/// Returns the number of deleted rows.
pub fn clear_all(db: &db::Db) -> Result<i64, String> {
    let conn = db.open_connection()?;
    clear_all_with_conn(&conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_sessions_conn;

    fn focus_session(started_at: i64) -> NewSession {
        NewSession {
            kind: "focus".to_string(),
            task_name: Some("write report".to_string()),
            planned_seconds: 1500,
            actual_seconds: 1500,
            interruptions: 1,
            started_at,
            ended_at: started_at + 1500,
        }
    }

    #[test]
    fn save_persists_and_returns_the_row() {
        let conn = setup_sessions_conn();

        let saved = save_with_conn(&conn, &focus_session(1_000_000), 1_000_600).expect("save");
        assert_eq!(saved.kind, "focus");
        assert_eq!(saved.task_name.as_deref(), Some("write report"));
        assert_eq!(saved.planned_seconds, 1500);
        assert_eq!(saved.interruptions, 1);
        assert_eq!(saved.created_at, 1_000_600);
    }

    #[test]
    fn save_trims_task_name_and_maps_blank_to_null() {
        let conn = setup_sessions_conn();

        let mut input = focus_session(1_000_000);
        input.task_name = Some("  review pr  ".to_string());
        let saved = save_with_conn(&conn, &input, 1_000_600).expect("save");
        assert_eq!(saved.task_name.as_deref(), Some("review pr"));

        input.task_name = Some("   ".to_string());
        let saved = save_with_conn(&conn, &input, 1_000_600).expect("save blank");
        assert_eq!(saved.task_name, None);
    }

    #[test]
    fn save_rejects_invalid_input() {
        let conn = setup_sessions_conn();

        let mut input = focus_session(1_000_000);
        input.kind = "nap".to_string();
        assert!(save_with_conn(&conn, &input, 0).is_err());

        let mut input = focus_session(1_000_000);
        input.planned_seconds = 0;
        assert!(save_with_conn(&conn, &input, 0).is_err());

        let mut input = focus_session(1_000_000);
        input.ended_at = input.started_at - 1;
        assert!(save_with_conn(&conn, &input, 0).is_err());

        let mut input = focus_session(1_000_000);
        input.task_name = Some("x".repeat(MAX_TASK_NAME_CHARS + 1));
        assert!(save_with_conn(&conn, &input, 0).is_err());
    }

    #[test]
    fn list_recent_orders_newest_first_and_honors_limit() {
        let conn = setup_sessions_conn();

        for offset in 0..5 {
            save_with_conn(&conn, &focus_session(1_000_000 + offset * 3600), 0).expect("save");
        }

        let items = list_recent_with_conn(&conn, None).expect("list");
        assert_eq!(items.len(), 5);
        assert!(items.windows(2).all(|w| w[0].started_at >= w[1].started_at));

        let items = list_recent_with_conn(&conn, Some(2)).expect("list limited");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].started_at, 1_000_000 + 4 * 3600);

        assert!(list_recent_with_conn(&conn, Some(0)).is_err());
    }

    #[test]
    fn clear_all_deletes_every_row() {
        let conn = setup_sessions_conn();

        for offset in 0..3 {
            save_with_conn(&conn, &focus_session(1_000_000 + offset), 0).expect("save");
        }

        assert_eq!(clear_all_with_conn(&conn).expect("clear"), 3);
        assert_eq!(clear_all_with_conn(&conn).expect("clear again"), 0);
        assert!(list_recent_with_conn(&conn, None)
            .expect("list")
            .is_empty());
    }
}
