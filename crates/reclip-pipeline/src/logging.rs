//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for pipeline runs with
//! tracing spans and contextual information. One logger follows a
//! recording through its run; stage-scoped copies are derived with
//! [`RunLogger::with_stage`].

use tracing::{error, info, warn, Span};

use reclip_models::RecordingId;

/// Run logger for structured logging with consistent formatting.
///
/// Every message carries the recording ID and the pipeline stage it
/// came from.
#[derive(Debug, Clone)]
pub struct RunLogger {
    recording_id: String,
    stage: String,
}

impl RunLogger {
    /// Create a new run logger for a specific recording and stage.
    pub fn new(recording_id: &RecordingId, stage: &str) -> Self {
        Self {
            recording_id: recording_id.to_string(),
            stage: stage.to_string(),
        }
    }

    /// Derive a logger for the same recording in a different stage.
    pub fn with_stage(&self, stage: &str) -> Self {
        Self {
            recording_id: self.recording_id.clone(),
            stage: stage.to_string(),
        }
    }

    /// Log the start of a run stage.
    pub fn log_start(&self, message: &str) {
        info!(
            recording_id = %self.recording_id,
            stage = %self.stage,
            "Run started: {}", message
        );
    }

    /// Log a progress update during a run.
    pub fn log_progress(&self, message: &str) {
        info!(
            recording_id = %self.recording_id,
            stage = %self.stage,
            "Run progress: {}", message
        );
    }

    /// Log a warning during a run.
    pub fn log_warning(&self, message: &str) {
        warn!(
            recording_id = %self.recording_id,
            stage = %self.stage,
            "Run warning: {}", message
        );
    }

    /// Log an error during a run.
    pub fn log_error(&self, message: &str) {
        error!(
            recording_id = %self.recording_id,
            stage = %self.stage,
            "Run error: {}", message
        );
    }

    /// Log the completion of a run stage.
    pub fn log_completion(&self, message: &str) {
        info!(
            recording_id = %self.recording_id,
            stage = %self.stage,
            "Run completed: {}", message
        );
    }

    /// Create a tracing span covering this run; the orchestrator
    /// instruments the whole run future with it.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "run",
            recording_id = %self.recording_id,
            stage = %self.stage
        )
    }
}
