//! Capability boundaries the orchestrator depends on.
//!
//! The traits here are the injection points for tests: the pipeline is
//! handed `Arc<dyn ...>` implementations at construction time instead of
//! reaching for process-wide clients.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use reclip_media::MediaResult;
use reclip_models::EncodingConfig;

/// Why a capability call produced no usable result.
///
/// Never propagated past the enrichment stage; both variants degrade to
/// sentinel values.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("capability not configured")]
    Unavailable,

    #[error("capability call failed: {0}")]
    Failed(String),
}

impl CapabilityError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Transcoding capability: probing, cutting, audio stripping.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Determine the duration of a source file in seconds.
    async fn probe_duration(&self, source: &Path) -> MediaResult<f64>;

    /// Cut `[start, start + length)` from `source` into `output`.
    async fn cut(
        &self,
        source: &Path,
        output: &Path,
        start_secs: f64,
        length_secs: f64,
    ) -> MediaResult<()>;

    /// Strip `clip` down to an audio-only file at `output`.
    async fn strip_to_audio(&self, clip: &Path, output: &Path) -> MediaResult<()>;
}

/// Transcription capability.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &Path) -> CapabilityResult<String>;
}

/// Tag suggestion capability.
#[async_trait]
pub trait Tagger: Send + Sync {
    async fn suggest_tags(&self, transcript: &str, title: &str) -> CapabilityResult<Vec<String>>;
}

/// FFmpeg-backed transcoder.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    encoding: EncodingConfig,
    timeout_secs: u64,
}

impl FfmpegTranscoder {
    pub fn new(encoding: EncodingConfig, timeout_secs: u64) -> Self {
        Self {
            encoding,
            timeout_secs,
        }
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn probe_duration(&self, source: &Path) -> MediaResult<f64> {
        reclip_media::get_duration(source).await
    }

    async fn cut(
        &self,
        source: &Path,
        output: &Path,
        start_secs: f64,
        length_secs: f64,
    ) -> MediaResult<()> {
        reclip_media::cut_segment(
            source,
            output,
            start_secs,
            length_secs,
            &self.encoding,
            Some(self.timeout_secs),
        )
        .await
    }

    async fn strip_to_audio(&self, clip: &Path, output: &Path) -> MediaResult<()> {
        reclip_media::extract_audio(clip, output, Some(self.timeout_secs)).await
    }
}
