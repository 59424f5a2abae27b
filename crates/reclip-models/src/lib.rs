//! Shared data models for the reclip backend.
//!
//! This crate provides Serde-serializable types for:
//! - Recordings (uploaded source videos) and clips cut from them
//! - The pure fixed-duration clip planner
//! - Encoding configuration for FFmpeg invocations

pub mod clip;
pub mod encoding;
pub mod plan;
pub mod recording;

// Re-export common types
pub use clip::{Clip, ClipId, RoleCategory};
pub use encoding::EncodingConfig;
pub use plan::{plan_clips, ClipRange, DEFAULT_CLIP_LENGTH_SECS};
pub use recording::{Recording, RecordingId};
