//! Pipeline configuration.

use std::path::PathBuf;

use reclip_models::{EncodingConfig, DEFAULT_CLIP_LENGTH_SECS};

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fixed clip length in seconds
    pub clip_length_secs: f64,
    /// Directory clip files (and transient audio extracts) are written to
    pub output_dir: PathBuf,
    /// Timeout for a single FFmpeg cut or audio strip
    pub transcode_timeout_secs: u64,
    /// Timeout for a single transcription/tagging request
    pub capability_timeout_secs: u64,
    /// How many clips may be enriched concurrently within one run
    pub max_enrichment_parallel: usize,
    /// Encoding settings for clip materialization
    pub encoding: EncodingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            clip_length_secs: DEFAULT_CLIP_LENGTH_SECS,
            output_dir: PathBuf::from("./data/clips"),
            transcode_timeout_secs: 600,
            capability_timeout_secs: 60,
            max_enrichment_parallel: 2,
            encoding: EncodingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            clip_length_secs: std::env::var("RECLIP_CLIP_LENGTH_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|v: &f64| *v > 0.0)
                .unwrap_or(DEFAULT_CLIP_LENGTH_SECS),
            output_dir: std::env::var("RECLIP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/clips")),
            transcode_timeout_secs: std::env::var("RECLIP_TRANSCODE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
            capability_timeout_secs: std::env::var("RECLIP_CAPABILITY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            max_enrichment_parallel: std::env::var("RECLIP_MAX_ENRICH_PARALLEL")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|v: &usize| *v > 0)
                .unwrap_or(2),
            encoding: EncodingConfig::default(),
        }
    }
}
