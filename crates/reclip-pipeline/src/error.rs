//! Pipeline error types.
//!
//! Only probe failures and catalog/setup problems surface out of a run;
//! transcode, extraction and capability failures are absorbed per clip
//! inside the orchestrator.

use thiserror::Error;

use reclip_catalog::CatalogError;
use reclip_media::MediaError;
use reclip_models::RecordingId;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Recording not found: {0}")]
    RecordingNotFound(RecordingId),

    #[error("Recording already processed: {0}")]
    AlreadyProcessed(RecordingId),

    #[error("Probe failed: {0}")]
    Probe(#[source] MediaError),

    #[error("Transcode failed: {0}")]
    Transcode(#[source] MediaError),

    #[error("Audio extraction failed: {0}")]
    Extraction(#[source] MediaError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error aborts the whole run rather than one clip.
    pub fn is_run_fatal(&self) -> bool {
        !matches!(
            self,
            PipelineError::Transcode(_) | PipelineError::Extraction(_)
        )
    }
}
