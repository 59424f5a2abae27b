//! Clip materialization: cutting a time range out of a source file.

use std::path::Path;
use tracing::info;

use reclip_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Cut `[start, start + length)` out of `source`, re-encoding to the
/// configured codec pair.
///
/// The cut is not retried on failure; a bad range fails the same way
/// every time, so the caller records the failure and moves on.
pub async fn cut_segment(
    source: impl AsRef<Path>,
    output: impl AsRef<Path>,
    start_secs: f64,
    length_secs: f64,
    encoding: &EncodingConfig,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let source = source.as_ref();
    let output = output.as_ref();

    if !source.exists() {
        return Err(MediaError::FileNotFound(source.to_path_buf()));
    }

    info!(
        source = %source.display(),
        output = %output.display(),
        start = start_secs,
        length = length_secs,
        "Cutting segment"
    );

    let cmd = FfmpegCommand::new(source, output)
        .seek(start_secs)
        .duration(length_secs)
        .output_args(encoding.to_ffmpeg_args());

    let mut runner = FfmpegRunner::new();
    if let Some(secs) = timeout_secs {
        runner = runner.with_timeout(secs);
    }
    runner.run(&cmd).await
}
