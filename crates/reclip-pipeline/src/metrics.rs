//! Pipeline metrics collection.
//!
//! Provides standardized metrics for monitoring pipeline runs:
//! - Run counters by terminal status
//! - Clip outcome counters (materialized, skipped, degraded)
//! - Run latency histograms

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Total pipeline runs by terminal status.
    pub const RUNS_TOTAL: &str = "pipeline_runs_total";

    /// Total clips successfully materialized.
    pub const CLIPS_MATERIALIZED_TOTAL: &str = "pipeline_clips_materialized_total";

    /// Total planned clips skipped due to transcode failures.
    pub const CLIPS_SKIPPED_TOTAL: &str = "pipeline_clips_skipped_total";

    /// Total clips persisted with degraded enrichment.
    pub const CLIPS_DEGRADED_TOTAL: &str = "pipeline_clips_degraded_total";

    /// End-to-end run latency in seconds.
    pub const RUN_LATENCY_SECONDS: &str = "pipeline_run_latency_seconds";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record a completed (or failed) pipeline run.
pub fn record_run(status: &str, latency_ms: f64) {
    counter!(
        names::RUNS_TOTAL,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(names::RUN_LATENCY_SECONDS).record(latency_ms / 1000.0);
}

/// Record the per-clip outcome counts of one run.
pub fn record_clip_outcomes(materialized: u64, skipped: u64, degraded: u64) {
    counter!(names::CLIPS_MATERIALIZED_TOTAL).increment(materialized);
    counter!(names::CLIPS_SKIPPED_TOTAL).increment(skipped);
    counter!(names::CLIPS_DEGRADED_TOTAL).increment(degraded);
}

// =============================================================================
// Tests
// =============================================================================
