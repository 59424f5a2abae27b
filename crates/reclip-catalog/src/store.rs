//! The catalog store boundary used by the pipeline.

use async_trait::async_trait;

use reclip_models::{Clip, ClipId, Recording, RecordingId};

use crate::error::CatalogResult;

/// Single writer of record for recordings and clips.
///
/// Every method is an atomic single-row operation; updates are
/// field-scoped so concurrent readers never observe a half-written row
/// beyond the fields being updated.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a recording row (performed by the upload collaborator).
    async fn create_recording(&self, recording: &Recording) -> CatalogResult<()>;

    /// Fetch a recording by ID.
    async fn get_recording(&self, id: &RecordingId) -> CatalogResult<Option<Recording>>;

    /// Persist the probed duration of a recording.
    async fn update_recording_duration(
        &self,
        id: &RecordingId,
        duration_seconds: f64,
    ) -> CatalogResult<()>;

    /// Mark a recording as fully processed.
    async fn mark_recording_processed(&self, id: &RecordingId) -> CatalogResult<()>;

    /// Insert a freshly materialized clip row.
    async fn insert_clip(&self, clip: &Clip) -> CatalogResult<()>;

    /// Update a clip's transcript and tags in place.
    async fn update_clip_enrichment(
        &self,
        id: &ClipId,
        transcript: &str,
        tags: &[String],
    ) -> CatalogResult<()>;

    /// List a recording's clips ordered by start time.
    async fn list_clips(&self, recording_id: &RecordingId) -> CatalogResult<Vec<Clip>>;
}
