//! Usage: SQLite schema migrations (user_version + incremental upgrades).

mod v0_to_v1;
mod v1_to_v2;
mod v2_to_v3;

use rusqlite::Connection;

const LATEST_SCHEMA_VERSION: i64 = 3;

pub(super) fn apply_migrations(conn: &mut Connection) -> Result<(), String> {
    let mut user_version = read_user_version(conn)?;

    if user_version < 0 || user_version > LATEST_SCHEMA_VERSION {
        return Err(format!(
            "unsupported sqlite schema version: user_version={user_version} (expected 0..={LATEST_SCHEMA_VERSION})"
        ));
    }

    while user_version < LATEST_SCHEMA_VERSION {
        match user_version {
            0 => v0_to_v1::migrate_v0_to_v1(conn)?,
            1 => v1_to_v2::migrate_v1_to_v2(conn)?,
            2 => v2_to_v3::migrate_v2_to_v3(conn)?,
            v => {
                return Err(format!(
                    "unsupported sqlite schema version: user_version={v} (expected 0..={LATEST_SCHEMA_VERSION})"
                ))
            }
        }
        user_version = read_user_version(conn)?;
    }

    Ok(())
}

fn read_user_version(conn: &Connection) -> Result<i64, String> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| format!("failed to read sqlite user_version: {e}"))
}

fn set_user_version(tx: &rusqlite::Transaction<'_>, version: i64) -> Result<(), String> {
    tx.pragma_update(None, "user_version", version)
        .map_err(|e| format!("failed to update sqlite user_version: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_bring_fresh_db_to_latest_version() {
        let mut conn = Connection::open_in_memory().expect("open in-memory sqlite");
        apply_migrations(&mut conn).expect("apply migrations");

        let version = read_user_version(&conn).expect("read user_version");
        assert_eq!(version, LATEST_SCHEMA_VERSION);

        // Re-running is a no-op.
        apply_migrations(&mut conn).expect("re-apply migrations");

        let recorded: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .expect("count schema_migrations");
        assert_eq!(recorded, LATEST_SCHEMA_VERSION);
    }

    #[test]
    fn migrations_reject_unknown_future_version() {
        let mut conn = Connection::open_in_memory().expect("open in-memory sqlite");
        conn.pragma_update(None, "user_version", 99)
            .expect("set user_version");

        let err = apply_migrations(&mut conn).expect_err("future schema must be rejected");
        assert!(err.contains("unsupported sqlite schema version"));
    }

    #[test]
    fn sessions_table_accepts_a_record_after_migration() {
        let mut conn = Connection::open_in_memory().expect("open in-memory sqlite");
        apply_migrations(&mut conn).expect("apply migrations");

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
) VALUES ('focus', 'write tests', 1500, 1500, 0, 1000, 2500, 2500)
"#,
            [],
        )
        .expect("insert session");

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .expect("count sessions");
        assert_eq!(count, 1);
    }
}
