//! Fixed-duration clip planning.
//!
//! The planner is a pure function from `(duration, clip_length)` to an
//! ordered list of time ranges. It does no I/O; materializing the ranges
//! into files is the media crate's job.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default clip length in seconds.
pub const DEFAULT_CLIP_LENGTH_SECS: f64 = 30.0;

/// One planned time range of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipRange {
    /// Start offset in seconds (inclusive)
    pub start: f64,
    /// End offset in seconds (exclusive)
    pub end: f64,
    /// 1-based position in the plan, used for clip titles
    pub sequence: u32,
}

impl ClipRange {
    /// Length of the range in seconds.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// Compute the clip plan for a recording of `duration` seconds.
///
/// Ranges are contiguous, non-overlapping, and cover `[0, duration]`
/// exactly; the final range may be shorter than `clip_length`. A
/// non-positive duration yields an empty plan rather than an error.
pub fn plan_clips(duration: f64, clip_length: f64) -> Vec<ClipRange> {
    assert!(clip_length > 0.0, "clip_length must be positive");

    if duration <= 0.0 {
        return Vec::new();
    }

    let count = (duration / clip_length).ceil() as u32;
    (0..count)
        .map(|i| {
            let start = f64::from(i) * clip_length;
            ClipRange {
                start,
                end: (start + clip_length).min(duration),
                sequence: i + 1,
            }
        })
        .collect()
}
