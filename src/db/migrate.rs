use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a migration has already been recorded in the `log` table.
fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the `project` (singleton) and `laps` tables.
fn create_project_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS project (
            id                 INTEGER PRIMARY KEY CHECK(id = 1),
            process_name       TEXT NOT NULL DEFAULT '',
            element_work_name  TEXT NOT NULL DEFAULT '',
            video_path         TEXT NOT NULL DEFAULT '',
            video_duration_sec INTEGER NOT NULL DEFAULT 0,
            takt_sec           REAL NOT NULL DEFAULT 0,
            updated_at         TEXT NOT NULL
        );

        INSERT OR IGNORE INTO project (id, updated_at) VALUES (1, datetime('now'));

        CREATE TABLE IF NOT EXISTS laps (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            start_sec   INTEGER NOT NULL CHECK(start_sec >= 0),
            category    TEXT NOT NULL DEFAULT 'manual' CHECK(category IN ('manual','walk','auto')),
            work        TEXT NOT NULL DEFAULT '',
            key_point   TEXT NOT NULL DEFAULT '',
            reason      TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_laps_start ON laps(start_sec);
        "#,
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `DbPool::open` on every command that touches the project
/// database; versions already recorded in `log` are skipped.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Project + laps
    let version = "20260301_0001_create_project_and_laps";
    if !is_applied(conn, version)? {
        create_project_tables(conn)?;
        mark_applied(conn, version, "Created project and laps tables")?;
        success(format!("Migration applied: {}", version));
    }

    Ok(())
}
