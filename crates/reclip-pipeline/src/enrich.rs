//! Enrichment stage: transcript + tags for one clip.
//!
//! Deliberately degrade-not-fail: a clip without a transcript is still a
//! usable clip, so capability failures substitute well-known sentinel
//! values and the run continues. Nothing in this module returns an error.

use std::path::Path;

use tracing::warn;

use crate::capabilities::{CapabilityError, Tagger, Transcriber};

/// Transcript sentinel when no transcription capability is configured.
pub const TRANSCRIPT_UNAVAILABLE: &str =
    "Transcription unavailable - please configure OpenAI API key";

/// Transcript sentinel when the transcription call failed.
pub const TRANSCRIPT_FAILED: &str = "Transcription failed";

/// Default tags when the tagging capability is not configured.
pub const DEFAULT_TAGS_UNAVAILABLE: &[&str] = &["onboarding", "workflow"];

/// Default tags when the tagging call failed or returned malformed output.
pub const DEFAULT_TAGS_FAILED: &[&str] = &["onboarding", "workflow", "tutorial"];

/// Whether a transcript is one of the degrade sentinels.
pub fn is_sentinel_transcript(transcript: &str) -> bool {
    transcript == TRANSCRIPT_UNAVAILABLE || transcript == TRANSCRIPT_FAILED
}

fn default_tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

/// Produce a `(transcript, tags)` pair for a clip.
///
/// Always returns a usable pair; tagging still runs against the sentinel
/// transcript when transcription degrades, which simply yields generic
/// tags.
pub async fn enrich_clip(
    transcriber: &dyn Transcriber,
    tagger: &dyn Tagger,
    audio: &Path,
    title: &str,
) -> (String, Vec<String>) {
    let transcript = match transcriber.transcribe(audio).await {
        Ok(text) => text,
        Err(CapabilityError::Unavailable) => {
            warn!(audio = %audio.display(), "Transcription capability not configured, using sentinel");
            TRANSCRIPT_UNAVAILABLE.to_string()
        }
        Err(CapabilityError::Failed(msg)) => {
            warn!(audio = %audio.display(), error = %msg, "Transcription failed, using sentinel");
            TRANSCRIPT_FAILED.to_string()
        }
    };

    let tags = match tagger.suggest_tags(&transcript, title).await {
        Ok(tags) => tags,
        Err(CapabilityError::Unavailable) => default_tags(DEFAULT_TAGS_UNAVAILABLE),
        Err(CapabilityError::Failed(msg)) => {
            warn!(title = %title, error = %msg, "Tag suggestion failed, using default tags");
            default_tags(DEFAULT_TAGS_FAILED)
        }
    };

    (transcript, tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;

    use crate::capabilities::CapabilityResult;

    enum Behavior {
        Succeed,
        Unavailable,
        Fail,
    }

    struct FakeTranscriber(Behavior);

    #[async_trait]
    impl Transcriber for FakeTranscriber {
        async fn transcribe(&self, _audio: &Path) -> CapabilityResult<String> {
            match self.0 {
                Behavior::Succeed => Ok("we open the dashboard and click deploy".to_string()),
                Behavior::Unavailable => Err(CapabilityError::Unavailable),
                Behavior::Fail => Err(CapabilityError::failed("boom")),
            }
        }
    }

    struct FakeTagger(Behavior);

    #[async_trait]
    impl Tagger for FakeTagger {
        async fn suggest_tags(
            &self,
            _transcript: &str,
            _title: &str,
        ) -> CapabilityResult<Vec<String>> {
            match self.0 {
                Behavior::Succeed => Ok(vec!["deploy".to_string(), "dashboard".to_string()]),
                Behavior::Unavailable => Err(CapabilityError::Unavailable),
                Behavior::Fail => Err(CapabilityError::failed("bad json")),
            }
        }
    }

    fn audio() -> PathBuf {
        PathBuf::from("/tmp/clip.mp3")
    }

    #[tokio::test]
    async fn test_both_succeed() {
        let (transcript, tags) = enrich_clip(
            &FakeTranscriber(Behavior::Succeed),
            &FakeTagger(Behavior::Succeed),
            &audio(),
            "Part 1",
        )
        .await;
        assert_eq!(transcript, "we open the dashboard and click deploy");
        assert_eq!(tags, vec!["deploy", "dashboard"]);
        assert!(!is_sentinel_transcript(&transcript));
    }

    #[tokio::test]
    async fn test_transcription_unavailable_still_tags() {
        let (transcript, tags) = enrich_clip(
            &FakeTranscriber(Behavior::Unavailable),
            &FakeTagger(Behavior::Succeed),
            &audio(),
            "Part 1",
        )
        .await;
        assert_eq!(transcript, TRANSCRIPT_UNAVAILABLE);
        // Tagging ran against the sentinel and still produced tags
        assert_eq!(tags, vec!["deploy", "dashboard"]);
    }

    #[tokio::test]
    async fn test_transcription_failed_sentinel() {
        let (transcript, _) = enrich_clip(
            &FakeTranscriber(Behavior::Fail),
            &FakeTagger(Behavior::Succeed),
            &audio(),
            "Part 1",
        )
        .await;
        assert_eq!(transcript, TRANSCRIPT_FAILED);
        assert!(is_sentinel_transcript(&transcript));
    }

    #[tokio::test]
    async fn test_tagger_unavailable_uses_default_set() {
        let (_, tags) = enrich_clip(
            &FakeTranscriber(Behavior::Succeed),
            &FakeTagger(Behavior::Unavailable),
            &audio(),
            "Part 1",
        )
        .await;
        assert_eq!(tags, vec!["onboarding", "workflow"]);
    }

    #[tokio::test]
    async fn test_tagger_failure_uses_fallback_set() {
        let (_, tags) = enrich_clip(
            &FakeTranscriber(Behavior::Succeed),
            &FakeTagger(Behavior::Fail),
            &audio(),
            "Part 1",
        )
        .await;
        assert_eq!(tags, vec!["onboarding", "workflow", "tutorial"]);
    }

    #[tokio::test]
    async fn test_double_degrade_never_yields_empty_fields() {
        let (transcript, tags) = enrich_clip(
            &FakeTranscriber(Behavior::Unavailable),
            &FakeTagger(Behavior::Unavailable),
            &audio(),
            "Part 1",
        )
        .await;
        assert!(!transcript.is_empty());
        assert!(!tags.is_empty());
    }
}
