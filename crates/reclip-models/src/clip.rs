//! Clip metadata models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::plan::ClipRange;
use crate::recording::{Recording, RecordingId};

/// Unique identifier for a clip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ClipId(pub String);

impl ClipId {
    /// Generate a new random clip ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ClipId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ClipId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Role category a clip is filed under in the catalog.
///
/// Defaults to `General`; the pipeline never assigns anything else,
/// re-categorization is a catalog-UI concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoleCategory {
    Frontend,
    Backend,
    Devops,
    Design,
    Product,
    Qa,
    #[default]
    General,
}

impl RoleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Frontend => "frontend",
            RoleCategory::Backend => "backend",
            RoleCategory::Devops => "devops",
            RoleCategory::Design => "design",
            RoleCategory::Product => "product",
            RoleCategory::Qa => "qa",
            RoleCategory::General => "general",
        }
    }

    /// Parse a stored role string; unknown values fall back to `General`.
    pub fn parse(s: &str) -> Self {
        match s {
            "frontend" => RoleCategory::Frontend,
            "backend" => RoleCategory::Backend,
            "devops" => RoleCategory::Devops,
            "design" => RoleCategory::Design,
            "product" => RoleCategory::Product,
            "qa" => RoleCategory::Qa,
            _ => RoleCategory::General,
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A clip cut from a recording, as persisted in the catalog.
///
/// `transcript` and `tags` stay empty until the enrichment stage
/// completes; `view_count` and `like_count` belong to the catalog UI
/// and are never written by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Clip {
    /// Unique clip ID
    pub id: ClipId,

    /// Recording this clip was cut from
    pub recording_id: RecordingId,

    /// Human-readable title (`"{recording title} - Part {n}"`)
    pub title: String,

    /// Start offset in the recording, seconds
    pub start_time: f64,

    /// End offset in the recording, seconds
    pub end_time: f64,

    /// Path to the rendered clip file
    pub file_path: String,

    /// Transcript text; `None` until enrichment completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,

    /// Tags; empty until enrichment completes
    #[serde(default)]
    pub tags: Vec<String>,

    /// Role category
    #[serde(default)]
    pub role: RoleCategory,

    /// View counter, owned by the catalog UI
    #[serde(default)]
    pub view_count: u32,

    /// Like counter, owned by the catalog UI
    #[serde(default)]
    pub like_count: u32,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Clip {
    /// Create a clip row for one planned range of a recording.
    ///
    /// The output filename is the clip ID, so paths stay unique across
    /// re-runs without coordination.
    pub fn from_range(recording: &Recording, range: &ClipRange, output_dir: &str) -> Self {
        let id = ClipId::new();
        let file_path = format!("{}/{}.mp4", output_dir.trim_end_matches('/'), id);
        Self {
            id,
            recording_id: recording.id.clone(),
            title: format!("{} - Part {}", recording.title, range.sequence),
            start_time: range.start,
            end_time: range.end,
            file_path,
            transcript: None,
            tags: Vec::new(),
            role: RoleCategory::General,
            view_count: 0,
            like_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Duration of the clip in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Path of the transient audio extract for this clip.
    pub fn audio_path(&self) -> String {
        match self.file_path.strip_suffix(".mp4") {
            Some(stem) => format!("{}.mp3", stem),
            None => format!("{}.mp3", self.file_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recording() -> Recording {
        Recording::new("Deploy walkthrough", "/uploads/deploy.webm")
    }

    #[test]
    fn test_clip_from_range() {
        let rec = sample_recording();
        let range = ClipRange {
            start: 30.0,
            end: 60.0,
            sequence: 2,
        };
        let clip = Clip::from_range(&rec, &range, "/data/clips/");

        assert_eq!(clip.title, "Deploy walkthrough - Part 2");
        assert_eq!(clip.recording_id, rec.id);
        assert!(clip.transcript.is_none());
        assert!(clip.tags.is_empty());
        assert_eq!(clip.role, RoleCategory::General);
        assert_eq!(clip.file_path, format!("/data/clips/{}.mp4", clip.id));
        assert!((clip.duration_seconds() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_audio_path_swaps_extension() {
        let rec = sample_recording();
        let range = ClipRange {
            start: 0.0,
            end: 30.0,
            sequence: 1,
        };
        let clip = Clip::from_range(&rec, &range, "/data/clips");
        assert_eq!(clip.audio_path(), format!("/data/clips/{}.mp3", clip.id));
    }

    #[test]
    fn test_role_parse_unknown_is_general() {
        assert_eq!(RoleCategory::parse("backend"), RoleCategory::Backend);
        assert_eq!(RoleCategory::parse("astronaut"), RoleCategory::General);
    }
}
