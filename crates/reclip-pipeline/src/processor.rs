//! Recording processing orchestrator.
//!
//! Drives one recording through the full pipeline: probe, plan,
//! materialize clips, extract audio, enrich, persist. Materialization is
//! strictly sequential so a single FFmpeg invocation owns the machine;
//! enrichment fans out with bounded concurrency since it is I/O bound.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{info, Instrument};

use reclip_catalog::CatalogStore;
use reclip_models::{plan_clips, Clip, RecordingId};

use crate::capabilities::{Tagger, Transcoder, Transcriber};
use crate::config::PipelineConfig;
use crate::enrich::{self, is_sentinel_transcript};
use crate::error::{PipelineError, PipelineResult};
use crate::logging::RunLogger;
use crate::metrics;

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub recording_id: RecordingId,
    pub duration_seconds: f64,
    pub planned_clips: usize,
    pub materialized_clips: usize,
    pub skipped_clips: usize,
    pub degraded_clips: usize,
}

/// Orchestrates the recording-to-clips pipeline.
pub struct RecordingProcessor {
    catalog: Arc<dyn CatalogStore>,
    transcoder: Arc<dyn Transcoder>,
    transcriber: Arc<dyn Transcriber>,
    tagger: Arc<dyn Tagger>,
    config: PipelineConfig,
}

impl RecordingProcessor {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        transcoder: Arc<dyn Transcoder>,
        transcriber: Arc<dyn Transcriber>,
        tagger: Arc<dyn Tagger>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            catalog,
            transcoder,
            transcriber,
            tagger,
            config,
        }
    }

    /// Process one recording end to end.
    ///
    /// Fails the run only for missing/already-processed recordings, probe
    /// failures, and catalog errors. Per-clip transcode failures skip the
    /// clip; enrichment failures degrade the clip. Both are reflected in
    /// the returned [`RunSummary`], never as an `Err`.
    pub async fn process_recording(&self, id: &RecordingId) -> PipelineResult<RunSummary> {
        let started = Instant::now();
        let logger = RunLogger::new(id, "processing");
        let result = self.run(id, &logger).instrument(logger.create_span()).await;

        let status = match &result {
            Ok(_) => "completed",
            Err(e) => {
                if matches!(e, PipelineError::AlreadyProcessed(_)) {
                    "rejected"
                } else {
                    "failed"
                }
            }
        };
        metrics::record_run(status, started.elapsed().as_secs_f64() * 1000.0);

        result
    }

    async fn run(&self, id: &RecordingId, logger: &RunLogger) -> PipelineResult<RunSummary> {
        let recording = self
            .catalog
            .get_recording(id)
            .await?
            .ok_or_else(|| PipelineError::RecordingNotFound(id.clone()))?;

        if recording.processed {
            return Err(PipelineError::AlreadyProcessed(id.clone()));
        }

        logger.log_start(&format!("Processing recording '{}'", recording.title));

        // Probe failures are fatal: no duration means no plan.
        let duration = self
            .transcoder
            .probe_duration(Path::new(&recording.file_path))
            .await
            .map_err(PipelineError::Probe)?;

        // Persist duration before any clip work so partial runs still
        // leave the recording row accurate.
        self.catalog.update_recording_duration(id, duration).await?;

        let ranges = plan_clips(duration, self.config.clip_length_secs);
        logger.log_progress(&format!(
            "Planned {} clips from {:.1}s of video",
            ranges.len(),
            duration
        ));

        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        let output_dir = self.config.output_dir.to_string_lossy().to_string();
        let source = PathBuf::from(&recording.file_path);

        let mut clips = Vec::with_capacity(ranges.len());
        let mut skipped = 0usize;

        for range in &ranges {
            let clip = Clip::from_range(&recording, range, &output_dir);
            match self
                .transcoder
                .cut(
                    &source,
                    Path::new(&clip.file_path),
                    range.start,
                    range.length(),
                )
                .await
            {
                Ok(()) => {
                    self.catalog.insert_clip(&clip).await?;
                    logger.log_progress(&format!(
                        "Materialized clip {}/{} ({:.1}s-{:.1}s)",
                        range.sequence,
                        ranges.len(),
                        range.start,
                        range.end
                    ));
                    clips.push(clip);
                }
                Err(e) => {
                    // One bad segment never aborts the run; the clip is
                    // simply absent from the catalog.
                    let err = PipelineError::Transcode(e);
                    debug_assert!(!err.is_run_fatal());
                    skipped += 1;
                    logger.log_warning(&format!(
                        "Skipping clip {} ({:.1}s-{:.1}s): {}",
                        range.sequence, range.start, range.end, err
                    ));
                }
            }
        }

        let degraded = stream::iter(clips.iter().map(|clip| self.enrich_one(clip, logger)))
            .buffer_unordered(self.config.max_enrichment_parallel)
            .fold(0usize, |acc, was_degraded| async move {
                acc + usize::from(was_degraded)
            })
            .await;

        self.catalog.mark_recording_processed(id).await?;

        let summary = RunSummary {
            recording_id: id.clone(),
            duration_seconds: duration,
            planned_clips: ranges.len(),
            materialized_clips: clips.len(),
            skipped_clips: skipped,
            degraded_clips: degraded,
        };

        metrics::record_clip_outcomes(
            summary.materialized_clips as u64,
            summary.skipped_clips as u64,
            summary.degraded_clips as u64,
        );
        logger.log_completion(&format!(
            "{} of {} clips materialized, {} skipped, {} degraded",
            summary.materialized_clips, summary.planned_clips, skipped, degraded
        ));

        Ok(summary)
    }

    /// Enrich one materialized clip. Returns whether the clip ended up
    /// degraded. Never fails: every path writes some enrichment or logs
    /// and moves on.
    async fn enrich_one(&self, clip: &Clip, logger: &RunLogger) -> bool {
        let logger = logger.with_stage("enrichment");
        let audio = PathBuf::from(clip.audio_path());

        let (transcript, tags, degraded) = match self
            .transcoder
            .strip_to_audio(Path::new(&clip.file_path), &audio)
            .await
        {
            Ok(()) => {
                let (transcript, tags) = enrich::enrich_clip(
                    self.transcriber.as_ref(),
                    self.tagger.as_ref(),
                    &audio,
                    &clip.title,
                )
                .await;
                let degraded = is_sentinel_transcript(&transcript);
                (transcript, tags, degraded)
            }
            Err(e) => {
                let err = PipelineError::Extraction(e);
                logger.log_warning(&format!("Degrading clip {}: {}", clip.id, err));
                (
                    enrich::TRANSCRIPT_FAILED.to_string(),
                    enrich::DEFAULT_TAGS_FAILED
                        .iter()
                        .map(|t| t.to_string())
                        .collect(),
                    true,
                )
            }
        };

        // The audio extract is transient regardless of outcome.
        let _ = tokio::fs::remove_file(&audio).await;

        match self
            .catalog
            .update_clip_enrichment(&clip.id, &transcript, &tags)
            .await
        {
            Ok(()) => {
                info!(clip_id = %clip.id, degraded, "Clip enrichment persisted");
                degraded
            }
            Err(e) => {
                logger.log_error(&format!(
                    "Failed to persist enrichment for clip {}: {}",
                    clip.id, e
                ));
                true
            }
        }
    }
}
