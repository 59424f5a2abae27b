//! Recording-to-clips processing pipeline.
//!
//! This crate provides:
//! - The pipeline orchestrator ([`RecordingProcessor`])
//! - Capability traits for transcoding, transcription and tagging
//! - OpenAI-backed transcription/tagging implementations
//! - The degrade-not-fail enrichment stage

pub mod capabilities;
pub mod config;
pub mod enrich;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod openai;
pub mod processor;

pub use capabilities::{
    CapabilityError, CapabilityResult, FfmpegTranscoder, Tagger, Transcoder, Transcriber,
};
pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use logging::RunLogger;
pub use openai::OpenAiClient;
pub use processor::{RecordingProcessor, RunSummary};
