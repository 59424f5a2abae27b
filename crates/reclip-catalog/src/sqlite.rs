//! SQLite-backed catalog store.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use reclip_models::{Clip, ClipId, Recording, RecordingId, RoleCategory};

use crate::error::{CatalogError, CatalogResult};
use crate::metrics::record_write;
use crate::migrations;
use crate::store::CatalogStore;

/// Catalog store backed by a single SQLite connection.
///
/// Row operations are short and never await, so a plain mutex around
/// the connection is enough to serialize writes per row.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open (or create) the catalog database at `db_path`.
    pub fn open(db_path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations::run_migrations(&conn)?;

        info!(path = %db_path.display(), "Catalog database ready");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory catalog, for tests.
    pub fn in_memory() -> CatalogResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_connection<F, T>(&self, f: F) -> CatalogResult<T>
    where
        F: FnOnce(&Connection) -> CatalogResult<T>,
    {
        let conn = self.conn.lock().map_err(|_| CatalogError::LockPoisoned)?;
        f(&conn)
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn create_recording(&self, recording: &Recording) -> CatalogResult<()> {
        self.with_connection(|conn| {
            conn.execute(
                r#"
                INSERT INTO recordings (id, title, description, file_path, duration_seconds, processed, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    recording.id.as_str(),
                    recording.title,
                    recording.description,
                    recording.file_path,
                    recording.duration_seconds,
                    recording.processed,
                    recording.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })?;
        record_write("create_recording");
        Ok(())
    }

    async fn get_recording(&self, id: &RecordingId) -> CatalogResult<Option<Recording>> {
        self.with_connection(|conn| {
            let row = conn
                .query_row(
                    r#"
                    SELECT id, title, description, file_path, duration_seconds, processed, created_at
                    FROM recordings WHERE id = ?1
                    "#,
                    params![id.as_str()],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, Option<String>>(2)?,
                            row.get::<_, String>(3)?,
                            row.get::<_, Option<f64>>(4)?,
                            row.get::<_, bool>(5)?,
                            row.get::<_, String>(6)?,
                        ))
                    },
                )
                .optional()?;

            row.map(|(id, title, description, file_path, duration, processed, created_at)| {
                Ok(Recording {
                    id: RecordingId::from(id),
                    title,
                    description,
                    file_path,
                    duration_seconds: duration,
                    processed,
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .transpose()
        })
    }

    async fn update_recording_duration(
        &self,
        id: &RecordingId,
        duration_seconds: f64,
    ) -> CatalogResult<()> {
        self.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE recordings SET duration_seconds = ?1 WHERE id = ?2",
                params![duration_seconds, id.as_str()],
            )?;
            if changed == 0 {
                return Err(CatalogError::recording_not_found(id.as_str()));
            }
            Ok(())
        })?;
        record_write("update_recording_duration");
        Ok(())
    }

    async fn mark_recording_processed(&self, id: &RecordingId) -> CatalogResult<()> {
        self.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE recordings SET processed = 1 WHERE id = ?1",
                params![id.as_str()],
            )?;
            if changed == 0 {
                return Err(CatalogError::recording_not_found(id.as_str()));
            }
            Ok(())
        })?;
        record_write("mark_recording_processed");
        Ok(())
    }

    async fn insert_clip(&self, clip: &Clip) -> CatalogResult<()> {
        let tags_json = serde_json::to_string(&clip.tags)?;
        self.with_connection(|conn| {
            conn.execute(
                r#"
                INSERT INTO clips (id, recording_id, title, start_time, end_time, file_path,
                                   transcript, tags, role, views, likes, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
                params![
                    clip.id.as_str(),
                    clip.recording_id.as_str(),
                    clip.title,
                    clip.start_time,
                    clip.end_time,
                    clip.file_path,
                    clip.transcript,
                    tags_json,
                    clip.role.as_str(),
                    clip.view_count,
                    clip.like_count,
                    clip.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })?;
        record_write("insert_clip");
        Ok(())
    }

    async fn update_clip_enrichment(
        &self,
        id: &ClipId,
        transcript: &str,
        tags: &[String],
    ) -> CatalogResult<()> {
        let tags_json = serde_json::to_string(tags)?;
        self.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE clips SET transcript = ?1, tags = ?2 WHERE id = ?3",
                params![transcript, tags_json, id.as_str()],
            )?;
            if changed == 0 {
                return Err(CatalogError::clip_not_found(id.as_str()));
            }
            Ok(())
        })?;
        record_write("update_clip_enrichment");
        Ok(())
    }

    async fn list_clips(&self, recording_id: &RecordingId) -> CatalogResult<Vec<Clip>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, recording_id, title, start_time, end_time, file_path,
                       transcript, tags, role, views, likes, created_at
                FROM clips WHERE recording_id = ?1
                ORDER BY start_time ASC
                "#,
            )?;

            let rows = stmt.query_map(params![recording_id.as_str()], |row| {
                Ok(RawClipRow {
                    id: row.get(0)?,
                    recording_id: row.get(1)?,
                    title: row.get(2)?,
                    start_time: row.get(3)?,
                    end_time: row.get(4)?,
                    file_path: row.get(5)?,
                    transcript: row.get(6)?,
                    tags: row.get(7)?,
                    role: row.get(8)?,
                    views: row.get(9)?,
                    likes: row.get(10)?,
                    created_at: row.get(11)?,
                })
            })?;

            let mut clips = Vec::new();
            for row in rows {
                clips.push(row?.into_clip()?);
            }
            Ok(clips)
        })
    }
}

/// Intermediate row shape before JSON/timestamp decoding.
struct RawClipRow {
    id: String,
    recording_id: String,
    title: String,
    start_time: f64,
    end_time: f64,
    file_path: String,
    transcript: Option<String>,
    tags: String,
    role: String,
    views: u32,
    likes: u32,
    created_at: String,
}

impl RawClipRow {
    fn into_clip(self) -> CatalogResult<Clip> {
        Ok(Clip {
            id: ClipId::from(self.id),
            recording_id: RecordingId::from(self.recording_id),
            title: self.title,
            start_time: self.start_time,
            end_time: self.end_time,
            file_path: self.file_path,
            transcript: self.transcript,
            tags: serde_json::from_str(&self.tags)?,
            role: RoleCategory::parse(&self.role),
            view_count: self.views,
            like_count: self.likes,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

fn parse_timestamp(s: &str) -> CatalogResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CatalogError::InvalidValue(format!("bad timestamp {s:?}: {e}")))
}
