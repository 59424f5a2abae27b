//! Audio extraction for transcription.

use std::path::Path;
use tracing::info;

use reclip_models::encoding::EXTRACT_AUDIO_CODEC;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Strip the video stream from a clip and re-encode the audio to MP3.
///
/// The output is a transient file; the pipeline deletes it once the
/// enrichment stage has consumed it.
pub async fn extract_audio(
    clip: impl AsRef<Path>,
    output: impl AsRef<Path>,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let clip = clip.as_ref();
    let output = output.as_ref();

    if !clip.exists() {
        return Err(MediaError::FileNotFound(clip.to_path_buf()));
    }

    info!(
        clip = %clip.display(),
        output = %output.display(),
        "Extracting audio"
    );

    let cmd = FfmpegCommand::new(clip, output)
        .no_video()
        .audio_codec(EXTRACT_AUDIO_CODEC);

    let mut runner = FfmpegRunner::new();
    if let Some(secs) = timeout_secs {
        runner = runner.with_timeout(secs);
    }
    runner.run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extract_missing_clip_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_audio(
            dir.path().join("missing.mp4"),
            dir.path().join("out.mp3"),
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
