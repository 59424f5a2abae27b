//! Schema setup for the catalog database.

use rusqlite::Connection;

use crate::error::CatalogResult;

/// Create the catalog tables if they do not exist.
pub fn run_migrations(conn: &Connection) -> CatalogResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS recordings (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            file_path TEXT NOT NULL,
            duration_seconds REAL,
            processed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS clips (
            id TEXT PRIMARY KEY,
            recording_id TEXT NOT NULL,
            title TEXT NOT NULL,
            start_time REAL NOT NULL,
            end_time REAL NOT NULL,
            file_path TEXT NOT NULL,
            transcript TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            role TEXT NOT NULL DEFAULT 'general',
            views INTEGER NOT NULL DEFAULT 0,
            likes INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            FOREIGN KEY (recording_id) REFERENCES recordings(id)
        );

        CREATE INDEX IF NOT EXISTS idx_clips_recording
            ON clips(recording_id, start_time);
        "#,
    )?;
    Ok(())
}
