//! Recording metadata models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an uploaded recording.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RecordingId(pub String);

impl RecordingId {
    /// Generate a new random recording ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An uploaded screen recording, as persisted in the catalog.
///
/// The pipeline only ever mutates `duration_seconds` and `processed`;
/// everything else is written once at upload time and read back by
/// the catalog UI.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Recording {
    /// Unique recording ID
    pub id: RecordingId,

    /// Human-readable title
    pub title: String,

    /// Optional description provided at upload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Path to the uploaded source file
    pub file_path: String,

    /// Total duration in seconds; unknown until probed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,

    /// Whether the processing pipeline has completed for this recording
    #[serde(default)]
    pub processed: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Recording {
    /// Create a new unprocessed recording.
    pub fn new(title: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            id: RecordingId::new(),
            title: title.into(),
            description: None,
            file_path: file_path.into(),
            duration_seconds: None,
            processed: false,
            created_at: Utc::now(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_recording_is_unprocessed() {
        let rec = Recording::new("Demo session", "/uploads/demo.webm");
        assert!(!rec.processed);
        assert!(rec.duration_seconds.is_none());
        assert_eq!(rec.title, "Demo session");
    }

    #[test]
    fn test_recording_id_roundtrip() {
        let id = RecordingId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: RecordingId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
