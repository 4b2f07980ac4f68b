use crate::db::log::ttlog_quiet;
use rusqlite::{Connection, Error, OptionalExtension, Result};

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

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if `table` has a column named `column`.
fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `occurrences` table with the modern schema (including `locked`).
///
/// The UNIQUE constraint on (class_name, date, counselor_id) is the
/// authoritative guard against duplicate occurrences in a series.
fn create_occurrences_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS occurrences (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            group_name    TEXT NOT NULL,
            class_name    TEXT NOT NULL,
            date          TEXT NOT NULL,
            group_hours   TEXT NOT NULL,
            counselor_id  INTEGER NOT NULL,
            group_type    TEXT NOT NULL DEFAULT '',
            notes         TEXT NOT NULL DEFAULT '',
            location      TEXT NOT NULL DEFAULT '',
            recurring     INTEGER NOT NULL DEFAULT 0,
            frequency     TEXT,
            locked        INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL,
            UNIQUE (class_name, date, counselor_id)
        );
        "#,
    )?;
    Ok(())
}

fn create_occurrence_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_occurrences_series ON occurrences(class_name, counselor_id, date);
        CREATE INDEX IF NOT EXISTS idx_occurrences_anchor ON occurrences(recurring, date);
        "#,
    )?;
    Ok(())
}

/// Create attendees, groups, roster links and attendance tables.
fn create_people_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendees (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name  TEXT NOT NULL,
            code       TEXT NOT NULL UNIQUE,
            notes      TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS groups (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            name     TEXT NOT NULL UNIQUE,
            details  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS group_members (
            group_id     INTEGER NOT NULL,
            attendee_id  INTEGER NOT NULL,
            PRIMARY KEY (group_id, attendee_id),
            FOREIGN KEY (group_id) REFERENCES groups(id),
            FOREIGN KEY (attendee_id) REFERENCES attendees(id)
        );

        CREATE TABLE IF NOT EXISTS roster_links (
            occurrence_id  INTEGER NOT NULL,
            attendee_id    INTEGER NOT NULL,
            PRIMARY KEY (occurrence_id, attendee_id),
            FOREIGN KEY (occurrence_id) REFERENCES occurrences(id),
            FOREIGN KEY (attendee_id) REFERENCES attendees(id)
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            occurrence_id  INTEGER NOT NULL,
            attendee_id    INTEGER NOT NULL,
            time_in        TEXT,
            time_out       TEXT,
            status         TEXT NOT NULL DEFAULT 'Present',
            notes          TEXT NOT NULL DEFAULT '',
            location       TEXT NOT NULL DEFAULT '',
            UNIQUE (occurrence_id, attendee_id),
            FOREIGN KEY (occurrence_id) REFERENCES occurrences(id),
            FOREIGN KEY (attendee_id) REFERENCES attendees(id)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_occurrence ON attendance(occurrence_id);
        "#,
    )?;
    Ok(())
}

/// Whether a named migration has already been recorded in the log table.
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Databases created before per-occurrence locking lack the `locked` column.
fn migrate_add_locked_column(conn: &Connection) -> Result<(), Error> {
    let version = "20250601_0001_add_locked_flag";

    if migration_applied(conn, version)? || table_has_column(conn, "occurrences", "locked")? {
        return Ok(());
    }

    conn.execute(
        "ALTER TABLE occurrences ADD COLUMN locked INTEGER NOT NULL DEFAULT 0;",
        [],
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to add 'locked' column: {}", e)),
        )
    })?;

    mark_migration_applied(conn, version, "Added locked flag to occurrences")?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Occurrences: create, or upgrade a legacy table in place
    if !table_exists(conn, "occurrences")? {
        create_occurrences_table(conn)?;
        ttlog_quiet(conn, "init", "occurrences", "Created occurrences table (modern schema)");
    } else {
        migrate_add_locked_column(conn)?;
    }
    create_occurrence_indexes(conn)?;

    // 3) Attendees, groups, roster links, attendance
    create_people_tables(conn)?;

    Ok(())
}
