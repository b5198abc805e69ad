use rusqlite::{params, Connection};

use super::StatsRange;

// Range starts are day boundaries in the user's local timezone, converted back
// to unix seconds for comparison against `started_at`.
pub(super) fn compute_start_ts(
    conn: &Connection,
    range: StatsRange,
) -> Result<Option<i64>, String> {
    let sql = match range {
        StatsRange::All => return Ok(None),
        StatsRange::Today => {
            "SELECT CAST(strftime('%s','now','localtime','start of day','utc') AS INTEGER)"
        }
        StatsRange::Last7 => {
            "SELECT CAST(strftime('%s','now','localtime','start of day','-6 days','utc') AS INTEGER)"
        }
        StatsRange::Last30 => {
            "SELECT CAST(strftime('%s','now','localtime','start of day','-29 days','utc') AS INTEGER)"
        }
    };

    let ts = conn
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .map_err(|e| format!("DB_ERROR: failed to compute range start ts: {e}"))?;

    Ok(Some(ts))
}

pub(super) fn compute_start_ts_last_n_days(conn: &Connection, days: u32) -> Result<i64, String> {
    if days < 1 {
        return Err("SEC_INVALID_INPUT: days must be >= 1".to_string());
    }
    let offset_days = days.saturating_sub(1);
    let modifier = format!("-{offset_days} days");

    let ts = conn
        .query_row(
            "SELECT CAST(strftime('%s','now','localtime','start of day', ?1,'utc') AS INTEGER)",
            params![modifier],
            |row| row.get::<_, i64>(0),
        )
        .map_err(|e| format!("DB_ERROR: failed to compute last-days start ts: {e}"))?;

    Ok(ts)
}
