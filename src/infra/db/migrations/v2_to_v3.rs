//! Usage: SQLite migration v2->v3.

use crate::shared::time::now_unix_seconds;
use rusqlite::Connection;

pub(super) fn migrate_v2_to_v3(conn: &mut Connection) -> Result<(), String> {
    const VERSION: i64 = 3;
    let tx = conn
        .transaction()
        .map_err(|e| format!("failed to start sqlite transaction: {e}"))?;

    // Keep schema_migrations available for troubleshooting/diagnostics.
    tx.execute_batch(
        r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
  version INTEGER PRIMARY KEY,
  applied_at INTEGER NOT NULL
);
"#,
    )
    .map_err(|e| format!("failed to migrate v2->v3: {e}"))?;

    let mut has_interruptions = false;
    {
        let mut stmt = tx
            .prepare("PRAGMA table_info(sessions)")
            .map_err(|e| format!("failed to prepare sessions table_info query: {e}"))?;
        let mut rows = stmt
            .query([])
            .map_err(|e| format!("failed to query sessions table_info: {e}"))?;

        while let Some(row) = rows
            .next()
            .map_err(|e| format!("failed to read sessions table_info row: {e}"))?
        {
            let name: String = row
                .get(1)
                .map_err(|e| format!("failed to read sessions column name: {e}"))?;
            if name == "interruptions" {
                has_interruptions = true;
                break;
            }
        }
    }

    if !has_interruptions {
        tx.execute_batch(
            r#"
ALTER TABLE sessions
ADD COLUMN interruptions INTEGER NOT NULL DEFAULT 0;
"#,
        )
        .map_err(|e| format!("failed to migrate v2->v3: {e}"))?;
    }

    let applied_at = now_unix_seconds();
    tx.execute(
        "INSERT OR IGNORE INTO schema_migrations(version, applied_at) VALUES (?1, ?2)",
        (VERSION, applied_at),
    )
    .map_err(|e| format!("failed to record migration: {e}"))?;

    super::set_user_version(&tx, VERSION)?;

    tx.commit()
        .map_err(|e| format!("failed to commit migration: {e}"))?;

    Ok(())
}
